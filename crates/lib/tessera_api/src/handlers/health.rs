//! Health endpoint.

use axum::Json;

use crate::error::AppError;
use crate::models::{HealthStatus, SuccessResponse};

/// `GET /health`: liveness only; touches no external service.
pub async fn health_handler() -> Json<SuccessResponse<HealthStatus>> {
    Json(SuccessResponse::new(HealthStatus {
        status: "ok",
        version: tessera_core::version(),
    }))
}

/// Fallback for unknown routes, so 404s carry the JSON envelope too.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}

/// Fallback for known paths hit with the wrong method.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
