//! Raw request body helpers.
//!
//! Handlers take the body as bytes so that a missing body, malformed JSON and
//! missing fields each map to their own envelope code instead of axum's
//! extractor rejections.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde_json::Value;

use crate::error::AppError;

/// Buffered body, with extractor rejections mapped into the envelope.
pub fn buffered(body: Result<Bytes, BytesRejection>) -> Result<Bytes, AppError> {
    body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => AppError::BodyUnreadable,
    })
}

/// Parse a JSON body. Empty, whitespace-only and `null` bodies are `None`.
pub fn parse_json_body(body: &[u8]) -> Result<Option<Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(AppError::InvalidJson),
    }
}

/// String field `key` of a JSON object, if present and non-empty.
pub fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
