//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status and envelope code mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Body is required")]
    BodyRequired,

    #[error("Body must be valid JSON")]
    InvalidJson,

    #[error("Username and password are required")]
    UsernamePasswordRequired,

    #[error("Refresh token and sub are required")]
    RefreshTokenSubRequired,

    #[error("Missing required fields")]
    InvalidRequest,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Body is too large")]
    PayloadTooLarge,

    /// The body stream failed before it was fully read.
    #[error("Body could not be read")]
    BodyUnreadable,

    /// Failure reported by (or while reaching) the identity service,
    /// surfaced to the caller as-is.
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        code: String,
        message: String,
    },

    #[error("Could not retrieve items")]
    ItemsRetrieval,

    #[error("Could not create item")]
    ItemCreation,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BodyRequired
            | AppError::InvalidJson
            | AppError::UsernamePasswordRequired
            | AppError::RefreshTokenSubRequired
            | AppError::InvalidRequest
            | AppError::BodyUnreadable => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upstream { status, .. } => *status,
            AppError::ItemsRetrieval | AppError::ItemCreation => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &str {
        match self {
            AppError::BodyRequired => "BODY_REQUIRED",
            AppError::InvalidJson => "INVALID_JSON",
            AppError::UsernamePasswordRequired => "USERNAME_PASSWORD_REQUIRED",
            AppError::RefreshTokenSubRequired => "REFRESH_TOKEN_SUB_REQUIRED",
            AppError::InvalidRequest => "INVALID_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound => "NOT_FOUND",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            AppError::BodyUnreadable => "BODY_UNREADABLE",
            AppError::Upstream { code, .. } => code.as_str(),
            AppError::ItemsRetrieval => "ITEMS_RETRIEVAL_ERROR",
            AppError::ItemCreation => "ITEM_CREATION_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), code = self.code(), "{}", self);
        } else {
            warn!(status = status.as_u16(), code = self.code(), "{}", self);
        }
        let body = Json(ErrorResponse::new(self.to_string(), self.code()));
        (status, body).into_response()
    }
}
