//! Store domain type.

use storekeep_core::StoreId;

/// A named store. Items reference it by ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
}
