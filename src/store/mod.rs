//! Persistence module split across logical submodules.

mod collections;
mod connection;
mod entries;
mod error;

pub use collections::{create_collection, delete_collection, fetch_collections};
pub use connection::{data_dir, open_in_memory, open_store, open_store_at};
pub use entries::{create_entry, delete_entry, fetch_entries, search_entries, set_entry_done};
pub use error::{StoreError, StoreResult};
