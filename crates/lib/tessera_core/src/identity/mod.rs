//! Identity service capability.
//!
//! The API never talks to a vendor SDK directly: it goes through
//! [`IdentityService`], implemented here by [`cognito::CognitoIdentityClient`]
//! for the user-pool JSON protocol.

pub mod cognito;
pub mod secret_hash;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::auth::{AuthenticationResult, UserProfile};

pub use secret_hash::secret_hash;

/// Identity service errors.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The service answered with an error status.
    #[error("{}", .message.as_deref().unwrap_or("Identity service error"))]
    Upstream {
        /// HTTP status reported by the service.
        status: u16,
        /// Error type, stripped of its namespace.
        code: Option<String>,
        message: Option<String>,
    },

    /// The request could not be encoded; nothing was sent.
    #[error("Could not encode identity service request: {0}")]
    Encode(String),

    #[error("Identity service unreachable: {0}")]
    Transport(String),

    #[error("Malformed identity service response: {0}")]
    MalformedResponse(String),

    /// The service wants another round trip (e.g. `NEW_PASSWORD_REQUIRED`).
    #[error("Authentication challenge required: {0}")]
    ChallengeRequired(String),
}

impl IdentityError {
    /// HTTP status reported by the service, if it reported one.
    pub fn status(&self) -> Option<u16> {
        match self {
            IdentityError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream error code, if the service reported one.
    pub fn code(&self) -> Option<&str> {
        match self {
            IdentityError::Upstream { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Message to show the caller. Upstream errors only carry one when the
    /// service sent it; local failures always describe themselves.
    pub fn message(&self) -> Option<String> {
        match self {
            IdentityError::Upstream { message, .. } => message.clone(),
            other => Some(other.to_string()),
        }
    }
}

/// `USER_PASSWORD_AUTH` request.
#[derive(Debug, Clone, Copy)]
pub struct PasswordAuthRequest<'a> {
    pub client_id: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    /// Secret hash over `username + client_id`.
    pub secret_hash: &'a str,
}

/// `REFRESH_TOKEN_AUTH` request.
#[derive(Debug, Clone, Copy)]
pub struct RefreshAuthRequest<'a> {
    pub client_id: &'a str,
    pub refresh_token: &'a str,
    /// Secret hash over `sub + client_id`.
    pub secret_hash: &'a str,
}

/// External identity provider.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Exchange a username/password pair for tokens.
    async fn authenticate_with_password(
        &self,
        request: PasswordAuthRequest<'_>,
    ) -> Result<AuthenticationResult, IdentityError>;

    /// Exchange a refresh token for a new id/access token.
    async fn authenticate_with_refresh_token(
        &self,
        request: RefreshAuthRequest<'_>,
    ) -> Result<AuthenticationResult, IdentityError>;

    /// Fetch the profile owning `access_token`.
    async fn get_profile(&self, access_token: &str) -> Result<UserProfile, IdentityError>;
}
