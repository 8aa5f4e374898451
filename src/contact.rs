use mongodb::bson::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_INVALID: &str = "A valid email address is required.";
pub const MESSAGE_REQUIRED: &str = "Message is required.";

/// Hidden form field legitimate users never fill in. A non-empty value marks
/// the submission as automated.
pub const HONEYPOT_FIELD: &str = "website";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern"));

pub fn valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// One contact-form submission. Inserted once, never mutated.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime,
}

impl ContactRecord {
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            name,
            email,
            message,
            created_at: DateTime::now(),
        }
    }
}

/// True when the honeypot field carries a value. Such submissions are
/// answered as if they succeeded, without being persisted.
pub fn is_automated(body: &Value) -> bool {
    body.get(HONEYPOT_FIELD)
        .and_then(Value::as_str)
        .is_some_and(|v| !v.is_empty())
}

/// Validates a contact-form body and builds the record to persist.
pub fn validate_contact(body: &Value) -> Result<ContactRecord, AppError> {
    let name = required_text(body, "name", NAME_REQUIRED)?;
    let email = required_text(body, "email", EMAIL_INVALID)?;
    if !valid_email(&email) {
        return Err(AppError::Validation(EMAIL_INVALID.to_string()));
    }
    let message = required_text(body, "message", MESSAGE_REQUIRED)?;

    Ok(ContactRecord::new(name, email, message))
}

fn required_text(body: &Value, key: &str, rule: &str) -> Result<String, AppError> {
    match body.get(key).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(AppError::Validation(rule.to_string())),
    }
}
