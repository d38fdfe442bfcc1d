//! In-memory record store.
//!
//! Used for local development (`--store memory`) and tests. Contents are lost
//! on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError};
use crate::models::item::{Item, ItemSummary};

/// Items held in process memory, keyed by id.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Full item (owner included) by id.
    pub async fn get(&self, item_id: &str) -> Option<Item> {
        self.items.read().await.get(item_id).cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_all(&self) -> Result<Vec<ItemSummary>, StoreError> {
        let items = self.items.read().await;
        Ok(items.values().cloned().map(ItemSummary::from).collect())
    }

    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.item_id) {
            return Err(StoreError::Duplicate(item.item_id.clone()));
        }
        items.insert(item.item_id.clone(), item.clone());
        Ok(())
    }
}
