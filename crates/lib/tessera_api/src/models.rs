//! Request/response envelopes.
//!
//! Every response is `{success, data, count?}` on success and
//! `{success: false, error: {message, code}}` on failure.

use serde::Serialize;

/// Successful response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
        }
    }
}

impl<T> SuccessResponse<Vec<T>> {
    /// Listing envelope; `count` is the length of `data`.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            success: true,
            data,
            count: Some(count),
        }
    }
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                message: message.into(),
                code: code.into(),
            },
        }
    }
}

/// `POST /auth/token` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTokens {
    /// Id token.
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

/// `POST /auth/refresh` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedToken {
    /// Id token.
    pub token: String,
    pub expires_in: i64,
}

/// `GET /health` payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn list_envelope_counts_items() {
        let json = serde_json::to_value(SuccessResponse::list(vec!["a", "b"])).unwrap();
        assert_eq!(json, json!({"success": true, "data": ["a", "b"], "count": 2}));
    }

    #[test]
    fn single_envelope_has_no_count() {
        let json = serde_json::to_value(SuccessResponse::new("x")).unwrap();
        assert_eq!(json, json!({"success": true, "data": "x"}));
    }

    #[test]
    fn error_envelope_shape() {
        let json = serde_json::to_value(ErrorResponse::new("Body is required", "BODY_REQUIRED"))
            .unwrap();
        assert_eq!(
            json,
            json!({
                "success": false,
                "error": {"message": "Body is required", "code": "BODY_REQUIRED"}
            })
        );
    }

    #[test]
    fn refreshed_token_uses_camel_case() {
        let json = serde_json::to_value(RefreshedToken {
            token: "id".into(),
            expires_in: 3600,
        })
        .unwrap();
        assert_eq!(json, json!({"token": "id", "expiresIn": 3600}));
    }
}
