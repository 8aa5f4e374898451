use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// User-facing message for any backend failure. Internal detail stays in the
/// server logs.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Validation rules are user-authored constraints, safe to echo back.
            AppError::Validation(rule) => (StatusCode::BAD_REQUEST, rule.clone()),
            AppError::Config(_) | AppError::Internal(_) => {
                error!("Request failed: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_rule_text() {
        let response =
            AppError::Validation("Feedback message is required.".into()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Feedback message is required.");
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let response =
            AppError::internal(std::io::Error::other("connection reset by peer")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], GENERIC_ERROR);
        assert!(!body.to_string().contains("connection reset"));
    }
}
