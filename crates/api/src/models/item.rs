//! Item domain type.

use storekeep_core::{ItemId, Price, StoreId};

/// A priced item owned by exactly one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Globally unique item name.
    pub name: String,
    /// Current price.
    pub price: Price,
    /// Store that owns this item.
    pub store_id: StoreId,
}
