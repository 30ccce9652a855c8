//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These types stay light-weight data holders so the other layers can
//! focus on presentation and persistence logic.

use std::fmt;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
/// A named list of to-dos. Collections display in insertion order, so the
/// rowid doubles as the sorting key.
pub struct Collection {
    /// Primary key from the database. Kept around even when the UI only needs
    /// display information because delete flows bubble the id back to the
    /// persistence layer.
    pub id: i64,
    /// User-entered label. Nothing enforces uniqueness or non-emptiness; the
    /// store accepts whatever the prompt hands it.
    pub name: String,
}

impl fmt::Display for Collection {
    /// Write the collection name to any formatter so the type plays nicely
    /// with Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone)]
/// A single to-do belonging to exactly one collection. Entries are created
/// inside a collection and never re-parented.
pub struct Entry {
    /// Primary key from the SQLite store.
    pub id: i64,
    /// Owning collection. The schema cascades deletes from the parent, so an
    /// entry row never outlives its collection.
    pub collection_id: i64,
    /// Title displayed in lists and search results.
    pub title: String,
    /// Whether the to-do has been checked off. Starts out false.
    pub done: bool,
    /// Stamped when the entry is created. Optional because rows written by
    /// earlier revisions of the schema may predate the column.
    pub created_at: Option<DateTime<Utc>>,
}
