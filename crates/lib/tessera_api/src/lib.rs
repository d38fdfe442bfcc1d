//! # tessera_api
//!
//! HTTP API library for Tessera.

pub mod body;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tessera_core::identity::IdentityService;
use tessera_core::record_id::RecordIdGenerator;
use tessera_core::store::RecordStore;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, health, items};

/// Route paths.
pub mod routes {
    pub const GET_HEALTH: &str = "/health";
    pub const POST_AUTH_TOKEN: &str = "/auth/token";
    pub const POST_AUTH_REFRESH: &str = "/auth/refresh";
    pub const ITEMS: &str = "/items";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Identity service client, built once at startup.
    pub identity: Arc<dyn IdentityService>,
    /// Item collection.
    pub store: Arc<dyn RecordStore>,
    /// Item id source.
    pub record_ids: Arc<RecordIdGenerator>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        store: Arc<dyn RecordStore>,
        config: ApiConfig,
    ) -> Self {
        Self {
            identity,
            store,
            record_ids: Arc::new(RecordIdGenerator::new()),
            config,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Creating an item requires caller claims; listing does not.
    let create_item = post(items::create_item_handler).route_layer(
        axum::middleware::from_fn_with_state(state.clone(), middleware::claims::require_claims),
    );

    Router::new()
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_TOKEN, post(auth::token_handler))
        .route(routes::POST_AUTH_REFRESH, post(auth::refresh_handler))
        .route(
            routes::ITEMS,
            get(items::list_items_handler).merge(create_item),
        )
        .fallback(health::not_found_handler)
        .method_not_allowed_fallback(health::method_not_allowed_handler)
        .layer(cors)
        .with_state(state)
}
