//! Core library surface for the ticklist TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces.
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by `main.rs` to initialize the embedded SQLite store and
/// preload data.
pub use store::{fetch_collections, open_store, StoreError};

/// The two primary domain types that other layers manipulate.
pub use models::{Collection, Entry};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
