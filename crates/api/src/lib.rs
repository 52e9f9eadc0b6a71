//! Storekeep API library.
//!
//! REST service for stores, items, and users. The binary in `main.rs` wires
//! configuration, logging, and the listener around [`app::build_app`]; the
//! integration tests drive the same router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
