//! Authentication request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;

use crate::AppState;
use crate::body::{buffered, non_empty_str, parse_json_body};
use crate::error::{AppError, AppResult};
use crate::models::{IssuedTokens, RefreshedToken, SuccessResponse};
use crate::services::auth;

/// `POST /auth/token`: sign in with username + password.
pub async fn token_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<SuccessResponse<IssuedTokens>>> {
    let body = buffered(body)?;
    let payload = parse_json_body(&body)?.ok_or(AppError::BodyRequired)?;
    let (Some(username), Some(password)) = (
        non_empty_str(&payload, "username"),
        non_empty_str(&payload, "password"),
    ) else {
        return Err(AppError::UsernamePasswordRequired);
    };

    let tokens =
        auth::issue_tokens(state.identity.as_ref(), &state.config, username, password).await?;
    Ok(Json(SuccessResponse::new(tokens)))
}

/// `POST /auth/refresh`: exchange a refresh token for a new id token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<SuccessResponse<RefreshedToken>>> {
    let body = buffered(body)?;
    let payload = parse_json_body(&body)?.ok_or(AppError::BodyRequired)?;
    let (Some(refresh_token), Some(sub)) = (
        non_empty_str(&payload, "refreshToken"),
        non_empty_str(&payload, "sub"),
    ) else {
        return Err(AppError::RefreshTokenSubRequired);
    };

    let token =
        auth::refresh_token(state.identity.as_ref(), &state.config, refresh_token, sub).await?;
    Ok(Json(SuccessResponse::new(token)))
}
