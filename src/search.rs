//! Lead search.
//!
//! The matching engine does not exist yet: every query waits a fixed delay
//! and returns the same fixture. The caller contract is the part that must
//! survive (a free-text query in, a delayed list of [`LeadResult`] out) so
//! a real engine can be dropped in without touching any caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

/// Fixed processing delay emulating the future matching backend.
pub const SEARCH_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadResult {
    pub name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
}

/// Stand-in lookup: ignores the query content and returns the canned fixture
/// after [`SEARCH_DELAY`].
pub async fn find_leads(_query: &str) -> Vec<LeadResult> {
    sleep(SEARCH_DELAY).await;

    lead_fixture()
}

pub fn lead_fixture() -> Vec<LeadResult> {
    [
        (
            "Alice Johnson",
            "Senior Product Manager",
            "TechNova Inc.",
            "San Francisco, CA",
            "https://www.linkedin.com/in/alicejohnson",
        ),
        (
            "Brian Chen",
            "Head of Engineering",
            "CodeWave Labs",
            "New York, NY",
            "https://www.linkedin.com/in/brianc",
        ),
        (
            "Clara Martinez",
            "Marketing Director",
            "BrightSpark Media",
            "Austin, TX",
            "https://www.linkedin.com/in/claramartinez",
        ),
        (
            "David Kim",
            "UX Designer",
            "PixelWorks Studio",
            "Seattle, WA",
            "https://www.linkedin.com/in/davidkimux",
        ),
        (
            "Eva Thompson",
            "Sales Manager",
            "GrowthEdge Solutions",
            "Chicago, IL",
            "https://www.linkedin.com/in/evathompson",
        ),
    ]
    .into_iter()
    .map(|(name, title, company, location, url)| LeadResult {
        name: name.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        url: url.to_string(),
    })
    .collect()
}
