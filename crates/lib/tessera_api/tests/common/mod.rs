//! Shared fixtures for router tests: stub identity service, failing store,
//! and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tessera_api::AppState;
use tessera_api::config::ApiConfig;
use tessera_core::identity::{
    IdentityError, IdentityService, PasswordAuthRequest, RefreshAuthRequest,
};
use tessera_core::models::auth::{AuthenticationResult, UserAttribute, UserProfile};
use tessera_core::models::item::{Item, ItemSummary};
use tessera_core::store::{MemoryRecordStore, RecordStore, StoreError};
use tower::ServiceExt;

pub const CLIENT_ID: &str = "client-1";
pub const CLIENT_SECRET: &str = "client-secret";
pub const SUB: &str = "0b7c6a2e-sub";

/// What a stubbed identity call should return.
#[derive(Clone, Debug)]
pub enum Outcome {
    Tokens(AuthenticationResult),
    Reject {
        status: u16,
        code: &'static str,
        message: &'static str,
    },
    /// Sign-in answered with a challenge instead of tokens.
    Challenge(&'static str),
}

impl Outcome {
    fn into_result(self) -> Result<AuthenticationResult, IdentityError> {
        match self {
            Outcome::Tokens(t) => Ok(t),
            Outcome::Reject {
                status,
                code,
                message,
            } => Err(IdentityError::Upstream {
                status,
                code: Some(code.into()),
                message: Some(message.into()),
            }),
            Outcome::Challenge(name) => Err(IdentityError::ChallengeRequired(name.into())),
        }
    }
}

/// One recorded identity call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Password {
        client_id: String,
        username: String,
        password: String,
        secret_hash: String,
    },
    Refresh {
        client_id: String,
        refresh_token: String,
        secret_hash: String,
    },
    Profile {
        access_token: String,
    },
}

/// Identity service stub that records every call.
pub struct StubIdentity {
    pub outcome: Outcome,
    pub calls: Mutex<Vec<Call>>,
}

impl StubIdentity {
    pub fn accepting() -> Self {
        Self::with(Outcome::Tokens(tokens()))
    }

    pub fn rejecting(status: u16, code: &'static str, message: &'static str) -> Self {
        Self::with(Outcome::Reject {
            status,
            code,
            message,
        })
    }

    pub fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn tokens() -> AuthenticationResult {
    AuthenticationResult {
        access_token: "access-1".into(),
        id_token: "id-1".into(),
        refresh_token: Some("refresh-1".into()),
        expires_in: 3600,
        token_type: Some("Bearer".into()),
    }
}

#[async_trait]
impl IdentityService for StubIdentity {
    async fn authenticate_with_password(
        &self,
        request: PasswordAuthRequest<'_>,
    ) -> Result<AuthenticationResult, IdentityError> {
        self.calls.lock().unwrap().push(Call::Password {
            client_id: request.client_id.into(),
            username: request.username.into(),
            password: request.password.into(),
            secret_hash: request.secret_hash.into(),
        });
        self.outcome.clone().into_result()
    }

    async fn authenticate_with_refresh_token(
        &self,
        request: RefreshAuthRequest<'_>,
    ) -> Result<AuthenticationResult, IdentityError> {
        self.calls.lock().unwrap().push(Call::Refresh {
            client_id: request.client_id.into(),
            refresh_token: request.refresh_token.into(),
            secret_hash: request.secret_hash.into(),
        });
        self.outcome.clone().into_result().map(|mut t| {
            t.refresh_token = None;
            t
        })
    }

    async fn get_profile(&self, access_token: &str) -> Result<UserProfile, IdentityError> {
        self.calls.lock().unwrap().push(Call::Profile {
            access_token: access_token.into(),
        });
        Ok(UserProfile {
            username: "alice".into(),
            attributes: vec![
                UserAttribute {
                    name: "email".into(),
                    value: "alice@example.com".into(),
                },
                UserAttribute {
                    name: "sub".into(),
                    value: SUB.into(),
                },
            ],
        })
    }
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn list_all(&self) -> Result<Vec<ItemSummary>, StoreError> {
        Err(StoreError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        Err(StoreError::Duplicate(item.item_id.clone()))
    }
}

pub fn configured() -> ApiConfig {
    ApiConfig {
        client_id: Some(CLIENT_ID.into()),
        client_secret: Some(CLIENT_SECRET.into()),
        ..ApiConfig::default()
    }
}

pub fn app(
    identity: Arc<dyn IdentityService>,
    store: Arc<dyn RecordStore>,
    config: ApiConfig,
) -> Router {
    tessera_api::router(AppState::new(identity, store, config))
}

pub fn items_app(store: Arc<MemoryRecordStore>) -> Router {
    app(Arc::new(StubIdentity::accepting()), store, configured())
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Send a request and return status, content type and parsed JSON body.
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).expect("parse JSON");
    (status, content_type, json)
}

pub fn assert_error(json: &Value, code: &str, message: &str) {
    assert_eq!(json["success"], false, "{json}");
    assert_eq!(json["error"]["code"], code, "{json}");
    assert_eq!(json["error"]["message"], message, "{json}");
}
