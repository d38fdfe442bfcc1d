//! Trusted-claims middleware.
//!
//! Tokens are verified upstream (gateway authorizer), which forwards the
//! verified claims as a JSON object in the configured header. This service
//! trusts that header and never re-verifies the token, so the gateway must
//! strip any client-supplied copy of it.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tessera_core::models::auth::VerifiedClaims;
use tracing::debug;

use crate::AppState;
use crate::error::AppError;

/// Key used to store the caller's claims in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub VerifiedClaims);

/// Axum middleware: reads the forwarded claims, requires a non-empty `sub`,
/// and injects `AuthenticatedCaller` into request extensions.
pub async fn require_claims(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let raw = request
        .headers()
        .get(state.config.claims_header.as_str())
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization claims".into()))?;

    let claims: VerifiedClaims = serde_json::from_str(raw)
        .map_err(|_| AppError::Unauthorized("Invalid authorization claims".into()))?;

    if claims.sub.is_empty() {
        return Err(AppError::Unauthorized("Missing authorization claims".into()));
    }

    debug!(sub = %claims.sub, "caller claims accepted");
    request.extensions_mut().insert(AuthenticatedCaller(claims));

    Ok(next.run(request).await)
}
