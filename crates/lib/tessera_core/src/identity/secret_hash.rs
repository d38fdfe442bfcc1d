//! Secret hash for app clients that carry a client secret.
//!
//! `base64(HMAC-SHA256(key = client_secret, message = principal + client_id))`.
//! The principal is the username for password sign-in and the subject (`sub`)
//! for refresh; the provider recomputes it from exactly that input.

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the secret hash for `principal` under the given client.
pub fn secret_hash(principal: &str, client_id: &str, client_secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(client_secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(principal.as_bytes());
    mac.update(client_id.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
