use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use thiserror::Error;

use crate::search::LeadResult;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Backend seam for the form controllers. Implemented by [`ApiClient`]
/// against the real routes, and by stubs in tests.
#[async_trait]
pub trait LeadApi: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<LeadResult>, ApiError>;
    async fn send_feedback(&self, message: &str) -> Result<(), ApiError>;
    async fn send_contact(&self, name: &str, email: &str, message: &str) -> Result<(), ApiError>;
}

pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<(), ApiError> {
        let response = self.http.post(self.endpoint(path)).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<LeadResult>,
}

#[async_trait]
impl LeadApi for ApiClient {
    async fn search(&self, query: &str) -> Result<Vec<LeadResult>, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/search"))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.results)
    }

    async fn send_feedback(&self, message: &str) -> Result<(), ApiError> {
        self.post_json("/api/feedback", serde_json::json!({ "message": message }))
            .await
    }

    async fn send_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<(), ApiError> {
        self.post_json(
            "/api/contact",
            serde_json::json!({ "name": name, "email": email, "message": message }),
        )
        .await
    }
}
