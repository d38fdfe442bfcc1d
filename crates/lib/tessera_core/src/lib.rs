//! # tessera_core
//!
//! Core domain logic for Tessera: the identity and record-store capabilities
//! the API delegates to, plus the few local pieces of logic (secret hash,
//! record id generation).

pub mod identity;
pub mod models;
pub mod record_id;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
