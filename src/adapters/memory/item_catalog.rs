use crate::domain::{
    booking::ItemSnapshot,
    value_objects::{ItemId, UserId},
};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory implementation of ItemCatalog
///
/// Holds each item's owner and availability.
/// The in-memory BookingStore resolves item owners through this catalog.
pub struct ItemCatalog {
    items: Mutex<HashMap<ItemId, ItemSnapshot>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Register an item (replaces an existing entry)
    pub fn add_item(&self, item_id: ItemId, owner_id: UserId, available: bool) {
        self.items.lock().unwrap_or_else(|e| e.into_inner()).insert(
            item_id,
            ItemSnapshot {
                item_id,
                owner_id,
                available,
            },
        );
    }

    /// Change an item's availability
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self
            .items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(&item_id)
        {
            item.available = available;
        }
    }

    /// IDs of the items owned by a user
    pub(super) fn items_owned_by(&self, owner_id: UserId) -> Vec<ItemId> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|item| item.owner_id == owner_id)
            .map(|item| item.item_id)
            .collect()
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    async fn get(&self, item_id: ItemId) -> Result<Option<ItemSnapshot>> {
        Ok(self
            .items
            .lock()
            .map_err(|e| e.to_string())?
            .get(&item_id)
            .copied())
    }
}
