use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use super::error::{StoreError, StoreResult};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".ticklist";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "todos.sqlite";

/// Open the on-disk store at its default location, creating the data
/// directory and schema on first run. Failures here are treated as fatal by
/// the caller; there is nothing sensible to retry.
pub fn open_store() -> StoreResult<Connection> {
    open_store_at(&db_path()?)
}

/// Open (or create) the store at an explicit path. Split out from
/// [`open_store`] so tests can point the same bootstrap at a scratch
/// directory.
pub fn open_store_at(db_path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(db_path).map_err(|source| StoreError::Open {
        path: db_path.to_path_buf(),
        source,
    })?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// In-memory store with the schema applied. Used by tests and nothing else;
/// behavior matches the on-disk store statement for statement.
pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory().map_err(StoreError::query("open in-memory store"))?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// Run the lazy migrations. `PRAGMA foreign_keys = ON` is set on every
/// connection so the cascade from collections to entries behaves the same
/// during tests and production runs.
fn apply_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

         CREATE TABLE IF NOT EXISTS collections (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             name TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS entries (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             collection_id INTEGER NOT NULL
                 REFERENCES collections(id) ON DELETE CASCADE,
             title TEXT NOT NULL,
             done INTEGER NOT NULL DEFAULT 0,
             created_at TEXT
         );",
    )
    .map_err(StoreError::query("apply schema"))
}

/// The per-user application data directory. The SQLite file and the log
/// files both live here.
pub fn data_dir() -> StoreResult<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::NoHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> StoreResult<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}
