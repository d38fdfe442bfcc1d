//! Item request handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::Value;
use tessera_core::models::item::{Item, ItemSummary};

use crate::AppState;
use crate::body::{buffered, non_empty_str, parse_json_body};
use crate::error::{AppError, AppResult};
use crate::middleware::claims::AuthenticatedCaller;
use crate::models::SuccessResponse;
use crate::services::items;

/// `GET /items`: list every item (owners omitted).
pub async fn list_items_handler(
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse<Vec<ItemSummary>>>> {
    let items = items::list_items(state.store.as_ref()).await?;
    Ok(Json(SuccessResponse::list(items)))
}

/// `POST /items`: create an item owned by the authenticated caller.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedCaller>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<(StatusCode, Json<SuccessResponse<Item>>)> {
    let body = buffered(body)?;
    // Every other body problem is reported as a missing field here.
    let payload = parse_json_body(&body)
        .ok()
        .flatten()
        .ok_or(AppError::InvalidRequest)?;
    let item_name = non_empty_str(&payload, "itemName").ok_or(AppError::InvalidRequest)?;
    let description = match payload.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => return Err(AppError::InvalidRequest),
    };

    let item = items::create_item(
        state.store.as_ref(),
        &state.record_ids,
        &caller.0,
        item_name,
        description,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(item))))
}
