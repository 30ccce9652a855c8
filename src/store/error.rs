use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias used throughout the persistence layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// The one error taxonomy the store surfaces. Opening failures are fatal to
/// the application; query failures are logged by the caller and the attempted
/// operation is dropped.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file or its directory could not be created or opened.
    #[error("failed to open the to-do store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The per-user data directory could not be resolved.
    #[error("could not locate home directory")]
    NoHomeDir,

    /// Creating the data directory on disk failed.
    #[error("failed to create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single statement failed: I/O error, write conflict, or schema
    /// mismatch. `op` names the operation for the log line.
    #[error("{op} failed: {source}")]
    Query {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A mutation matched zero rows. Surfaced instead of silently succeeding
    /// so callers can tell a stale id from a completed write.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl StoreError {
    /// Wrap a rusqlite error with the name of the failing operation. Written
    /// as a closure factory so call sites stay one `map_err` long.
    pub(crate) fn query(op: &'static str) -> impl FnOnce(rusqlite::Error) -> StoreError {
        move |source| StoreError::Query { op, source }
    }
}
