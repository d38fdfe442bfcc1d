//! Domain models.
//!
//! Wire names follow the persisted item layout (`itemId`, `itemName`, ...),
//! so the same types serialize straight into API responses.

pub mod auth;
pub mod item;
