//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API's response
//! envelopes and from the identity provider's wire format.

use serde::{Deserialize, Serialize};

/// Tokens issued by the identity service after a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub id_token: String,
    /// Only present for the password flow; the refresh flow does not rotate it.
    pub refresh_token: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub token_type: Option<String>,
}

/// A single user-pool attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

/// Profile returned by the identity service for an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub attributes: Vec<UserAttribute>,
}

impl UserProfile {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Stable subject identifier (`sub` attribute).
    pub fn subject(&self) -> Option<&str> {
        self.attribute("sub")
    }
}

/// Claims already verified by the upstream authorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedClaims {
    /// Subject (standard JWT `sub` claim).
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "cognito:username",
        skip_serializing_if = "Option::is_none"
    )]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_reads_sub_attribute() {
        let profile = UserProfile {
            username: "alice".into(),
            attributes: vec![
                UserAttribute {
                    name: "email".into(),
                    value: "alice@example.com".into(),
                },
                UserAttribute {
                    name: "sub".into(),
                    value: "4f1c-sub".into(),
                },
            ],
        };
        assert_eq!(profile.subject(), Some("4f1c-sub"));
        assert_eq!(profile.attribute("email"), Some("alice@example.com"));
        assert_eq!(profile.attribute("phone_number"), None);
    }

    #[test]
    fn claims_accept_pool_username_alias() {
        let claims: VerifiedClaims = serde_json::from_str(
            r#"{"sub":"abc","cognito:username":"alice","token_use":"id"}"#,
        )
        .unwrap();
        assert_eq!(claims.sub, "abc");
        assert_eq!(claims.username.as_deref(), Some("alice"));
        assert_eq!(claims.email, None);
    }
}
