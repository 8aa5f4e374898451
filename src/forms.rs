//! Form controllers.
//!
//! Each interactive form on the sites (search box, feedback dialog, contact
//! form) is a small state machine: `Idle → Validating → Submitting →
//! {Success | Failed} → Idle`. Validation runs synchronously before any
//! request; a single in-flight request is issued with no cancellation and no
//! automatic retry. Success clears the inputs, failure preserves them for
//! correction, and both outcomes surface through the shared [`Snackbar`].

use std::sync::Arc;

use tracing::warn;

use crate::{
    client::LeadApi,
    contact::valid_email,
    notify::{Severity, Snackbar, SnackbarMessage},
    search::LeadResult,
};

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

pub const MIN_FEEDBACK_LEN: usize = 5;
pub const MIN_CONTACT_MESSAGE_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// Terminal result of one submit attempt. `Rejected` means a local
/// validation rule failed and no request was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Rejected,
    Success,
    Failed,
}

pub struct SearchBox {
    api: Arc<dyn LeadApi>,
    snackbar: Snackbar,
    pub query: String,
    pub results: Vec<LeadResult>,
    phase: Phase,
}

impl SearchBox {
    pub fn new(api: Arc<dyn LeadApi>, snackbar: Snackbar) -> Self {
        Self {
            api,
            snackbar,
            query: String::new(),
            results: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs one search round trip. The query is kept either way; results
    /// are replaced only on success.
    pub async fn submit(&mut self) -> Outcome {
        if self.phase == Phase::Submitting {
            return Outcome::Rejected;
        }

        self.phase = Phase::Validating;
        if self.query.trim().is_empty() {
            self.reject("Please enter a search query.");
            return Outcome::Rejected;
        }

        self.phase = Phase::Submitting;
        let outcome = match self.api.search(&self.query).await {
            Ok(results) => {
                self.results = results;
                self.phase = Phase::Success;
                Outcome::Success
            }
            Err(err) => {
                warn!("Search request failed: {err}");
                self.snackbar
                    .show(SnackbarMessage::new(GENERIC_FAILURE, Severity::Error));
                self.phase = Phase::Failed;
                Outcome::Failed
            }
        };

        self.phase = Phase::Idle;
        outcome
    }

    fn reject(&mut self, rule: &str) {
        self.snackbar.show(SnackbarMessage::new(rule, Severity::Error));
        self.phase = Phase::Idle;
    }
}

pub struct FeedbackForm {
    api: Arc<dyn LeadApi>,
    snackbar: Snackbar,
    pub message: String,
    pub open: bool,
    phase: Phase,
}

impl FeedbackForm {
    pub fn new(api: Arc<dyn LeadApi>, snackbar: Snackbar) -> Self {
        Self {
            api,
            snackbar,
            message: String::new(),
            open: false,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the dialog without submitting. The draft text is kept.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    pub async fn submit(&mut self) -> Outcome {
        if self.phase == Phase::Submitting {
            return Outcome::Rejected;
        }

        self.phase = Phase::Validating;
        let trimmed = self.message.trim();
        if trimmed.is_empty() {
            self.reject("Feedback message is required.");
            return Outcome::Rejected;
        }
        if trimmed.len() < MIN_FEEDBACK_LEN {
            self.reject("Please tell us a little more.");
            return Outcome::Rejected;
        }

        self.phase = Phase::Submitting;
        let outcome = match self.api.send_feedback(&self.message).await {
            Ok(()) => {
                self.message.clear();
                self.open = false;
                self.snackbar.show(SnackbarMessage::new(
                    "Thanks for your feedback!",
                    Severity::Success,
                ));
                self.phase = Phase::Success;
                Outcome::Success
            }
            Err(err) => {
                warn!("Feedback request failed: {err}");
                self.snackbar
                    .show(SnackbarMessage::new(GENERIC_FAILURE, Severity::Error));
                self.phase = Phase::Failed;
                Outcome::Failed
            }
        };

        self.phase = Phase::Idle;
        outcome
    }

    fn reject(&mut self, rule: &str) {
        self.snackbar.show(SnackbarMessage::new(rule, Severity::Error));
        self.phase = Phase::Idle;
    }
}

#[derive(Default, Clone)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Hidden field; a real visitor never fills it in.
    pub honeypot: String,
}

pub struct ContactForm {
    api: Arc<dyn LeadApi>,
    snackbar: Snackbar,
    pub fields: ContactFields,
    phase: Phase,
}

impl ContactForm {
    pub fn new(api: Arc<dyn LeadApi>, snackbar: Snackbar) -> Self {
        Self {
            api,
            snackbar,
            fields: ContactFields::default(),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub async fn submit(&mut self) -> Outcome {
        if self.phase == Phase::Submitting {
            return Outcome::Rejected;
        }

        self.phase = Phase::Validating;

        // Filled honeypot: act exactly like a successful submission, but
        // send nothing.
        if !self.fields.honeypot.is_empty() {
            self.finish_success();
            self.phase = Phase::Idle;
            return Outcome::Success;
        }

        if self.fields.name.trim().is_empty() {
            self.reject("Please enter your name.");
            return Outcome::Rejected;
        }
        if !valid_email(&self.fields.email) {
            self.reject("Please enter a valid email address.");
            return Outcome::Rejected;
        }
        if self.fields.message.trim().len() < MIN_CONTACT_MESSAGE_LEN {
            self.reject("Please enter a message of at least 10 characters.");
            return Outcome::Rejected;
        }

        self.phase = Phase::Submitting;
        let outcome = match self
            .api
            .send_contact(
                &self.fields.name,
                &self.fields.email,
                &self.fields.message,
            )
            .await
        {
            Ok(()) => {
                self.finish_success();
                Outcome::Success
            }
            Err(err) => {
                warn!("Contact request failed: {err}");
                self.snackbar
                    .show(SnackbarMessage::new(GENERIC_FAILURE, Severity::Error));
                self.phase = Phase::Failed;
                Outcome::Failed
            }
        };

        self.phase = Phase::Idle;
        outcome
    }

    fn finish_success(&mut self) {
        self.fields = ContactFields::default();
        self.snackbar
            .show(SnackbarMessage::new("Message sent!", Severity::Success));
        self.phase = Phase::Success;
    }

    fn reject(&mut self, rule: &str) {
        self.snackbar.show(SnackbarMessage::new(rule, Severity::Error));
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::client::ApiError;
    use crate::search::lead_fixture;

    #[derive(Default)]
    struct StubApi {
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call.into());
            if self.fail {
                Err(ApiError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl LeadApi for StubApi {
        async fn search(&self, query: &str) -> Result<Vec<LeadResult>, ApiError> {
            self.record(format!("search:{query}"))?;
            Ok(lead_fixture())
        }

        async fn send_feedback(&self, message: &str) -> Result<(), ApiError> {
            self.record(format!("feedback:{message}"))
        }

        async fn send_contact(
            &self,
            name: &str,
            _email: &str,
            _message: &str,
        ) -> Result<(), ApiError> {
            self.record(format!("contact:{name}"))
        }
    }

    #[tokio::test]
    async fn empty_search_query_issues_no_request() {
        let api = Arc::new(StubApi::default());
        let snackbar = Snackbar::new();
        let mut form = SearchBox::new(api.clone(), snackbar.clone());
        form.query = "   ".to_string();

        assert_eq!(form.submit().await, Outcome::Rejected);
        assert!(api.calls().is_empty());
        assert_eq!(
            snackbar.current().map(|m| m.severity),
            Some(Severity::Error)
        );
    }

    #[tokio::test]
    async fn successful_search_stores_results_and_settles_idle() {
        let api = Arc::new(StubApi::default());
        let mut form = SearchBox::new(api.clone(), Snackbar::new());
        form.query = "ceo fintech germany".to_string();

        assert_eq!(form.submit().await, Outcome::Success);
        assert_eq!(form.results, lead_fixture());
        assert_eq!(form.phase(), Phase::Idle);
        assert_eq!(api.calls(), ["search:ceo fintech germany"]);
    }

    #[tokio::test]
    async fn failed_search_preserves_query_and_raises_generic_error() {
        let api = Arc::new(StubApi::failing());
        let snackbar = Snackbar::new();
        let mut form = SearchBox::new(api, snackbar.clone());
        form.query = "ceo".to_string();

        assert_eq!(form.submit().await, Outcome::Failed);
        assert_eq!(form.query, "ceo");
        assert!(form.results.is_empty());
        assert_eq!(
            snackbar.current().map(|m| m.text),
            Some(GENERIC_FAILURE.into())
        );
    }

    #[tokio::test]
    async fn feedback_success_clears_text_and_closes_dialog() {
        let api = Arc::new(StubApi::default());
        let snackbar = Snackbar::new();
        let mut form = FeedbackForm::new(api.clone(), snackbar.clone());
        form.open();
        form.message = "Great tool!".to_string();

        assert_eq!(form.submit().await, Outcome::Success);
        assert!(form.message.is_empty());
        assert!(!form.open);
        assert_eq!(api.calls(), ["feedback:Great tool!"]);
        assert_eq!(
            snackbar.current().map(|m| m.severity),
            Some(Severity::Success)
        );
    }

    #[tokio::test]
    async fn feedback_failure_preserves_the_draft() {
        let api = Arc::new(StubApi::failing());
        let mut form = FeedbackForm::new(api, Snackbar::new());
        form.open();
        form.message = "Great tool!".to_string();

        assert_eq!(form.submit().await, Outcome::Failed);
        assert_eq!(form.message, "Great tool!");
        assert!(form.open);
    }

    #[tokio::test]
    async fn short_feedback_is_rejected_locally() {
        let api = Arc::new(StubApi::default());
        let mut form = FeedbackForm::new(api.clone(), Snackbar::new());
        form.message = "ok".to_string();

        assert_eq!(form.submit().await, Outcome::Rejected);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn contact_honeypot_fakes_success_without_a_request() {
        let api = Arc::new(StubApi::default());
        let snackbar = Snackbar::new();
        let mut form = ContactForm::new(api.clone(), snackbar.clone());
        form.fields.honeypot = "https://spam.example".to_string();

        assert_eq!(form.submit().await, Outcome::Success);
        assert!(api.calls().is_empty());
        assert_eq!(
            snackbar.current().map(|m| m.severity),
            Some(Severity::Success)
        );
    }

    #[tokio::test]
    async fn contact_rejects_invalid_email_before_any_request() {
        let api = Arc::new(StubApi::default());
        let mut form = ContactForm::new(api.clone(), Snackbar::new());
        form.fields.name = "Jane".to_string();
        form.fields.email = "not-an-email".to_string();
        form.fields.message = "I would like to know more.".to_string();

        assert_eq!(form.submit().await, Outcome::Rejected);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn contact_success_clears_all_fields() {
        let api = Arc::new(StubApi::default());
        let mut form = ContactForm::new(api.clone(), Snackbar::new());
        form.fields.name = "Jane".to_string();
        form.fields.email = "jane@example.com".to_string();
        form.fields.message = "I would like to know more.".to_string();

        assert_eq!(form.submit().await, Outcome::Success);
        assert!(form.fields.name.is_empty());
        assert!(form.fields.email.is_empty());
        assert!(form.fields.message.is_empty());
        assert_eq!(api.calls(), ["contact:Jane"]);
    }
}
