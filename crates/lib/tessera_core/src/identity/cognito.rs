//! User-pool identity client.
//!
//! Speaks the user-pool JSON protocol: every operation is a `POST /` with an
//! `X-Amz-Target` header naming the operation and an
//! `application/x-amz-json-1.1` body. `InitiateAuth` and `GetUser` are
//! unsigned operations, so no request signing is involved.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::{IdentityError, IdentityService, PasswordAuthRequest, RefreshAuthRequest};
use crate::models::auth::{AuthenticationResult, UserAttribute, UserProfile};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "eu-west-3";

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const AMZ_JSON: &str = "application/x-amz-json-1.1";

const FLOW_PASSWORD: &str = "USER_PASSWORD_AUTH";
const FLOW_REFRESH: &str = "REFRESH_TOKEN_AUTH";

/// Public endpoint of the identity service in `region`.
pub fn regional_endpoint(region: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("https://cognito-idp.{region}.amazonaws.com/"))
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthInput<'a> {
    auth_flow: &'static str,
    client_id: &'a str,
    auth_parameters: BTreeMap<&'static str, &'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthOutput {
    #[serde(default)]
    authentication_result: Option<AuthenticationResultWire>,
    #[serde(default)]
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResultWire {
    access_token: String,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
    #[serde(default)]
    token_type: Option<String>,
}

impl From<AuthenticationResultWire> for AuthenticationResult {
    fn from(w: AuthenticationResultWire) -> Self {
        Self {
            access_token: w.access_token,
            id_token: w.id_token,
            refresh_token: w.refresh_token,
            expires_in: w.expires_in,
            token_type: w.token_type,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserInput<'a> {
    access_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserOutput {
    username: String,
    #[serde(default)]
    user_attributes: Vec<AttributeWire>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeWire {
    name: String,
    #[serde(default)]
    value: String,
}

/// Error document, e.g. `{"__type":"NotAuthorizedException","message":"..."}`.
#[derive(Deserialize)]
struct ErrorDocument {
    #[serde(default, rename = "__type")]
    kind: Option<String>,
    #[serde(default, alias = "Message")]
    message: Option<String>,
}

/// Strip the namespace from an error type (`ns.v1#NotAuthorized` → `NotAuthorized`).
fn error_code(kind: &str) -> &str {
    kind.rsplit('#').next().unwrap_or(kind)
}

// =============================================================================
// Client
// =============================================================================

/// [`IdentityService`] over the user-pool JSON protocol.
#[derive(Debug, Clone)]
pub struct CognitoIdentityClient {
    http: Client,
    endpoint: Url,
}

impl CognitoIdentityClient {
    /// Client talking to `endpoint` (regional endpoint or a stand-in).
    pub fn new(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Client talking to the public endpoint of `region`.
    pub fn for_region(http: Client, region: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(http, regional_endpoint(region)?))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn call<I, O>(&self, operation: &str, input: &I) -> Result<O, IdentityError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let body = serde_json::to_vec(input)
            .map_err(|e| IdentityError::Encode(format!("{operation}: {e}")))?;

        debug!(operation, endpoint = %self.endpoint, "calling identity service");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, AMZ_JSON)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{operation}"))
            .body(body)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !status.is_success() {
            let doc = serde_json::from_slice::<ErrorDocument>(&bytes).ok();
            let (code, message) = match doc {
                Some(d) => (d.kind.map(|k| error_code(&k).to_string()), d.message),
                None => (None, None),
            };
            warn!(
                operation,
                status = status.as_u16(),
                code = code.as_deref().unwrap_or("-"),
                "identity service rejected request"
            );
            return Err(IdentityError::Upstream {
                status: status.as_u16(),
                code,
                message,
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| IdentityError::MalformedResponse(format!("{operation}: {e}")))
    }

    async fn initiate_auth(
        &self,
        input: InitiateAuthInput<'_>,
    ) -> Result<AuthenticationResult, IdentityError> {
        let output: InitiateAuthOutput = self.call("InitiateAuth", &input).await?;
        match output {
            InitiateAuthOutput {
                authentication_result: Some(result),
                ..
            } => Ok(result.into()),
            InitiateAuthOutput {
                challenge_name: Some(challenge),
                ..
            } => Err(IdentityError::ChallengeRequired(challenge)),
            _ => Err(IdentityError::MalformedResponse(
                "InitiateAuth: no AuthenticationResult".into(),
            )),
        }
    }
}

#[async_trait]
impl IdentityService for CognitoIdentityClient {
    async fn authenticate_with_password(
        &self,
        request: PasswordAuthRequest<'_>,
    ) -> Result<AuthenticationResult, IdentityError> {
        let auth_parameters = BTreeMap::from([
            ("USERNAME", request.username),
            ("PASSWORD", request.password),
            ("SECRET_HASH", request.secret_hash),
        ]);
        self.initiate_auth(InitiateAuthInput {
            auth_flow: FLOW_PASSWORD,
            client_id: request.client_id,
            auth_parameters,
        })
        .await
    }

    async fn authenticate_with_refresh_token(
        &self,
        request: RefreshAuthRequest<'_>,
    ) -> Result<AuthenticationResult, IdentityError> {
        let auth_parameters = BTreeMap::from([
            ("REFRESH_TOKEN", request.refresh_token),
            ("SECRET_HASH", request.secret_hash),
        ]);
        self.initiate_auth(InitiateAuthInput {
            auth_flow: FLOW_REFRESH,
            client_id: request.client_id,
            auth_parameters,
        })
        .await
    }

    async fn get_profile(&self, access_token: &str) -> Result<UserProfile, IdentityError> {
        let output: GetUserOutput = self.call("GetUser", &GetUserInput { access_token }).await?;
        Ok(UserProfile {
            username: output.username,
            attributes: output
                .user_attributes
                .into_iter()
                .map(|a| UserAttribute {
                    name: a.name,
                    value: a.value,
                })
                .collect(),
        })
    }
}
