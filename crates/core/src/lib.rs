//! Storekeep Core - Shared types library.
//!
//! This crate provides common types used across all Storekeep components:
//! - `api` - The REST service for stores, items, and users
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! Database encoding for IDs is available behind the `sqlite` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
