//! API server configuration.

/// Header an upstream authorizer uses to forward verified JWT claims.
pub const DEFAULT_CLAIMS_HEADER: &str = "x-authorizer-claims";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Identity pool app client id.
    pub client_id: Option<String>,
    /// Identity pool app client secret.
    pub client_secret: Option<String>,
    /// Request header carrying the verified claims as a JSON object.
    pub claims_header: String,
}

/// App client id and secret, both present.
#[derive(Clone, Copy, Debug)]
pub struct ClientCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl ApiConfig {
    /// Client id and secret, or `None` if either is missing or empty.
    pub fn client_credentials(&self) -> Option<ClientCredentials<'_>> {
        let client_id = self.client_id.as_deref().filter(|s| !s.is_empty())?;
        let client_secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some(ClientCredentials {
            client_id,
            client_secret,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            client_id: None,
            client_secret: None,
            claims_header: DEFAULT_CLAIMS_HEADER.into(),
        }
    }
}
