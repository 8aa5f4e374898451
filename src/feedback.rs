use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub const FEEDBACK_REQUIRED: &str = "Feedback message is required.";

/// One piece of free-text feedback. Inserted once, never mutated.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub message: String,
    pub created_at: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<String>,
    pub origin_country: String,
}

impl FeedbackRecord {
    pub fn new(message: String, origin_address: Option<String>, origin_country: String) -> Self {
        Self {
            message,
            created_at: DateTime::now(),
            origin_address,
            origin_country,
        }
    }
}

/// Extracts the feedback message from a request body. The message must be a
/// string that is non-empty after trimming; the returned value keeps the
/// submitted whitespace untouched.
pub fn validate_message(body: &Value) -> Result<String, AppError> {
    match body.get("message").and_then(Value::as_str) {
        Some(message) if !message.trim().is_empty() => Ok(message.to_string()),
        _ => Err(AppError::Validation(FEEDBACK_REQUIRED.to_string())),
    }
}
