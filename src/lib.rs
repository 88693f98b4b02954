// ABOUTME: Library root for stratus - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod api;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod health;
pub mod inspect;
pub mod monitor;
pub mod output;
pub mod reconcile;
pub mod types;
