use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

/// Upper bound on the best-effort geolocation call. The enclosing request
/// must never stall behind the lookup service.
pub const GEO_TIMEOUT: Duration = Duration::from_millis(1500);

pub const UNKNOWN_COUNTRY: &str = "unknown";

#[derive(Deserialize)]
struct GeoResponse {
    country: Option<String>,
}

/// Resolves a client address to a coarse country label. Best effort: any
/// failure (timeout, transport error, bad status, malformed body) degrades
/// to [`UNKNOWN_COUNTRY`] and never fails the enclosing request.
pub async fn lookup_country(http: &Client, endpoint: &str, address: &str) -> String {
    match try_lookup(http, endpoint, address).await {
        Ok(country) => country,
        Err(err) => {
            warn!("Geo lookup for {address} failed: {err}");
            UNKNOWN_COUNTRY.to_string()
        }
    }
}

async fn try_lookup(http: &Client, endpoint: &str, address: &str) -> Result<String, reqwest::Error> {
    let url = format!("{}/{address}", endpoint.trim_end_matches('/'));

    let response = http
        .get(&url)
        .timeout(GEO_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;

    let geo: GeoResponse = response.json().await?;
    Ok(geo.country.unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()))
}
