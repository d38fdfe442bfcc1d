//! Item service: listing and creation over the record store.
//!
//! Store failures never reach the caller in detail; they are logged here and
//! replaced by the generic items errors.

use tessera_core::models::auth::VerifiedClaims;
use tessera_core::models::item::{Item, ItemSummary, created_at_now};
use tessera_core::record_id::RecordIdGenerator;
use tessera_core::store::RecordStore;
use tracing::{error, info};

use crate::error::{AppError, AppResult};

/// Every item, without owners.
pub async fn list_items(store: &dyn RecordStore) -> AppResult<Vec<ItemSummary>> {
    store.list_all().await.map_err(|e| {
        error!(error = %e, "could not list items");
        AppError::ItemsRetrieval
    })
}

/// Create an item owned by `owner`.
pub async fn create_item(
    store: &dyn RecordStore,
    ids: &RecordIdGenerator,
    owner: &VerifiedClaims,
    item_name: &str,
    description: Option<&str>,
) -> AppResult<Item> {
    let created_at = created_at_now();
    let item = Item {
        item_id: ids.next_at(created_at),
        item_name: item_name.to_string(),
        description: description.map(str::to_string),
        created_at,
        user_id: owner.sub.clone(),
    };

    store.put(&item).await.map_err(|e| {
        error!(error = %e, item_id = %item.item_id, "could not create item");
        AppError::ItemCreation
    })?;

    info!(item_id = %item.item_id, user_id = %item.user_id, "created item");
    Ok(item)
}
