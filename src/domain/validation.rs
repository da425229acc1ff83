//! Shared field validators for flow requests and model replies.
//!
//! Request-side failures are [`AppError::InvalidRequest`] and happen before
//! any external call; reply-side failures are [`AppError::InvalidReply`] and
//! reject the model's output as a whole. No partial results survive.

use serde::de::DeserializeOwned;

use crate::domain::AppError;

/// Reject a blank request field.
pub fn require_request_field(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_request(field, "must not be blank"));
    }
    Ok(())
}

/// Coerce a raw model reply into the flow's typed output record.
pub fn parse_reply<T: DeserializeOwned>(
    flow: &str,
    value: serde_json::Value,
) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::malformed_reply(flow, e.to_string()))
}

/// Reject an empty reply array or one containing blank items.
pub fn require_non_empty(field: &str, items: &[String]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::invalid_reply(field, "must contain at least one item"));
    }
    require_no_blank_items(field, items)
}

/// Reject blank items in a reply array that is allowed to be empty.
pub fn require_no_blank_items(field: &str, items: &[String]) -> Result<(), AppError> {
    if let Some(idx) = items.iter().position(|item| item.trim().is_empty()) {
        return Err(AppError::invalid_reply(field, format!("item {} is blank", idx + 1)));
    }
    Ok(())
}

/// Reject a blank reply field.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_reply(field, "must not be blank"));
    }
    Ok(())
}
