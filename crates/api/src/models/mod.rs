//! Domain models for the API.
//!
//! These are validated domain objects, separate from database row types and
//! from the JSON shapes returned by route handlers.

pub mod item;
pub mod store;
pub mod user;

pub use item::Item;
pub use store::Store;
pub use user::User;
