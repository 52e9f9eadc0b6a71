//! User domain type.
//!
//! The password hash is deliberately not a field here; it is only loaded
//! alongside the user when verifying credentials.

use chrono::{DateTime, Utc};

use storekeep_core::UserId;

/// An API user (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID, used as the access token subject.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
