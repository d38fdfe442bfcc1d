//! Authentication service: token issue and refresh flows delegating to the
//! identity service.

use axum::http::StatusCode;
use tessera_core::identity::{
    IdentityError, IdentityService, PasswordAuthRequest, RefreshAuthRequest, secret_hash,
};
use tracing::{error, info, warn};

use crate::config::{ApiConfig, ClientCredentials};
use crate::error::{AppError, AppResult};
use crate::models::{IssuedTokens, RefreshedToken};

const MISSING_CONFIG: &str = "Missing required environment variables";

const ISSUE_DEFAULT_MESSAGE: &str = "Internal server error";
const ISSUE_DEFAULT_CODE: &str = "INTERNAL_SERVER_ERROR";

const REFRESH_DEFAULT_MESSAGE: &str = "Error refreshing token";
const REFRESH_DEFAULT_CODE: &str = "REFRESH_TOKEN_ERROR";

/// Which flow an identity failure came from; picks the fallback message/code.
#[derive(Debug, Clone, Copy)]
enum Flow {
    Issue,
    Refresh,
}

impl Flow {
    fn default_message(self) -> &'static str {
        match self {
            Flow::Issue => ISSUE_DEFAULT_MESSAGE,
            Flow::Refresh => REFRESH_DEFAULT_MESSAGE,
        }
    }

    fn default_code(self) -> &'static str {
        match self {
            Flow::Issue => ISSUE_DEFAULT_CODE,
            Flow::Refresh => REFRESH_DEFAULT_CODE,
        }
    }
}

/// Surface an identity failure with the service's own status, code and
/// message, falling back to the flow defaults.
fn identity_failure(flow: Flow, err: IdentityError) -> AppError {
    error!(?flow, error = %err, "identity service call failed");
    let status = err
        .status()
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    AppError::Upstream {
        status,
        code: err.code().unwrap_or(flow.default_code()).to_string(),
        message: err
            .message()
            .unwrap_or_else(|| flow.default_message().to_string()),
    }
}

fn credentials(config: &ApiConfig, flow: Flow) -> AppResult<ClientCredentials<'_>> {
    config.client_credentials().ok_or_else(|| {
        error!(?flow, "identity client id or secret is not configured");
        AppError::Upstream {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: flow.default_code().to_string(),
            message: MISSING_CONFIG.to_string(),
        }
    })
}

/// Sign in with username + password, then resolve the caller's subject.
///
/// The secret hash is computed over `username + client_id`.
pub async fn issue_tokens(
    identity: &dyn IdentityService,
    config: &ApiConfig,
    username: &str,
    password: &str,
) -> AppResult<IssuedTokens> {
    let creds = credentials(config, Flow::Issue)?;
    let hash = secret_hash(username, creds.client_id, creds.client_secret);

    let result = identity
        .authenticate_with_password(PasswordAuthRequest {
            client_id: creds.client_id,
            username,
            password,
            secret_hash: &hash,
        })
        .await
        .map_err(|e| identity_failure(Flow::Issue, e))?;

    let profile = identity
        .get_profile(&result.access_token)
        .await
        .map_err(|e| identity_failure(Flow::Issue, e))?;

    let sub = profile.subject().map(str::to_string);
    match &sub {
        Some(sub) => info!(sub = %sub, "issued tokens"),
        None => warn!(username = %profile.username, "profile has no sub attribute"),
    }

    Ok(IssuedTokens {
        token: result.id_token,
        refresh_token: result.refresh_token,
        expires_in: result.expires_in,
        sub,
    })
}

/// Exchange a refresh token for a new id token.
///
/// The secret hash is computed over `sub + client_id`, not the username.
pub async fn refresh_token(
    identity: &dyn IdentityService,
    config: &ApiConfig,
    refresh_token: &str,
    sub: &str,
) -> AppResult<RefreshedToken> {
    let creds = credentials(config, Flow::Refresh)?;
    let hash = secret_hash(sub, creds.client_id, creds.client_secret);

    let result = identity
        .authenticate_with_refresh_token(RefreshAuthRequest {
            client_id: creds.client_id,
            refresh_token,
            secret_hash: &hash,
        })
        .await
        .map_err(|e| identity_failure(Flow::Refresh, e))?;

    info!(sub, "refreshed token");

    Ok(RefreshedToken {
        token: result.id_token,
        expires_in: result.expires_in,
    })
}
