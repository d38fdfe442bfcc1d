//! Record store capability.
//!
//! Items live in one flat collection keyed by `itemId`. The API only needs a
//! full listing and a single put; both go through [`RecordStore`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::item::{Item, ItemSummary};

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Item already exists: {0}")]
    Duplicate(String),

    #[error("Invalid table name: {0:?}")]
    InvalidTable(String),
}

/// External item collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every item, projected without its owner.
    async fn list_all(&self) -> Result<Vec<ItemSummary>, StoreError>;

    /// Write a new item. Fails with [`StoreError::Duplicate`] if the id is taken.
    async fn put(&self, item: &Item) -> Result<(), StoreError>;
}

/// Check that `name` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes).
pub fn validate_table_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid_head && valid_tail && name.len() <= 63 {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(name.to_string()))
    }
}
