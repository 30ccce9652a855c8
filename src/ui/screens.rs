//! Screen state for the two list views.
//!
//! Each screen owns its records plus a [`ListPane`] and re-fetches from the
//! store after every mutation; the in-memory copy is never trusted to have
//! applied an optimistic write. A failed reload keeps the previous rows on
//! screen (stale but consistent) and the caller logs the error.

use rusqlite::Connection;

use crate::models::{Collection, Entry};
use crate::store::{
    delete_collection, delete_entry, fetch_collections, fetch_entries, search_entries,
    set_entry_done, StoreError, StoreResult,
};

use super::list::{DeleteAt, ListPane, RowItem};

/// Backing state for the top-level list of collections.
pub(crate) struct CollectionsScreen {
    pub(crate) collections: Vec<Collection>,
    pub(crate) pane: ListPane,
}

impl CollectionsScreen {
    pub(crate) fn new(collections: Vec<Collection>) -> Self {
        let mut screen = Self {
            collections,
            pane: ListPane::new("No lists yet. Press '+' to add one."),
        };
        screen.rebuild_rows();
        screen
    }

    /// Re-fetch from the store and rebuild the pane. When `focus_id` names a
    /// known collection the selection jumps there, which keeps a freshly
    /// added list under the cursor.
    pub(crate) fn reload(&mut self, conn: &Connection, focus_id: Option<i64>) -> StoreResult<()> {
        self.collections = fetch_collections(conn)?;
        self.rebuild_rows();
        if let Some(id) = focus_id {
            if let Some(idx) = self.collections.iter().position(|c| c.id == id) {
                self.pane.select(idx);
            }
        }
        Ok(())
    }

    pub(crate) fn current(&self) -> Option<&Collection> {
        self.collections.get(self.pane.selected())
    }

    /// Delete the selected collection through the pane's capability hook.
    pub(crate) fn delete_selected(&mut self, conn: &Connection) -> StoreResult<bool> {
        let mut rows = CollectionRows {
            conn,
            collections: &mut self.collections,
        };
        self.pane.delete_current(&mut rows)
    }

    fn rebuild_rows(&mut self) {
        let rows = self
            .collections
            .iter()
            .map(|c| RowItem::plain(c.name.clone()))
            .collect();
        self.pane.set_rows(rows);
    }
}

/// `DeleteAt` adapter over the collection vec. The pane hands back a
/// position; this resolves it to a record and removes it from the store
/// first, then from memory, so a store failure leaves both sides untouched.
struct CollectionRows<'a> {
    conn: &'a Connection,
    collections: &'a mut Vec<Collection>,
}

impl DeleteAt for CollectionRows<'_> {
    fn delete_at(&mut self, position: usize) -> Result<(), StoreError> {
        let collection = self
            .collections
            .get(position)
            .ok_or(StoreError::NotFound("collection"))?;
        delete_collection(self.conn, collection.id)?;
        self.collections.remove(position);
        Ok(())
    }
}

/// Backing state for the to-dos inside one collection, including the
/// optional search filter.
pub(crate) struct EntriesScreen {
    pub(crate) collection: Collection,
    pub(crate) entries: Vec<Entry>,
    pub(crate) filter: Option<String>,
    pub(crate) pane: ListPane,
}

impl EntriesScreen {
    pub(crate) fn new(collection: Collection, entries: Vec<Entry>) -> Self {
        let mut screen = Self {
            collection,
            entries,
            filter: None,
            pane: ListPane::new("No to-dos yet. Press '+' to add one."),
        };
        screen.rebuild_rows();
        screen
    }

    /// Re-query the store: the filtered search when a filter is active, the
    /// full collection-scoped list otherwise. Clearing the filter therefore
    /// restores exactly the entries belonging to the active collection.
    pub(crate) fn reload(&mut self, conn: &Connection) -> StoreResult<()> {
        self.entries = match &self.filter {
            Some(query) => search_entries(conn, self.collection.id, query)?,
            None => fetch_entries(conn, self.collection.id)?,
        };
        self.rebuild_rows();
        Ok(())
    }

    /// Replace the active filter and re-run the store query. `None` or a
    /// blank query drops back to the unfiltered list.
    pub(crate) fn set_filter(&mut self, conn: &Connection, filter: Option<String>) -> StoreResult<()> {
        self.filter = filter.filter(|q| !q.trim().is_empty());
        self.reload(conn)
    }

    pub(crate) fn current(&self) -> Option<&Entry> {
        self.entries.get(self.pane.selected())
    }

    /// Flip the `done` flag of the selected entry and persist it, then
    /// re-fetch so the display reflects exactly what the store holds.
    /// Returns the new flag value, or `None` when no row is selected.
    pub(crate) fn toggle_selected(&mut self, conn: &Connection) -> StoreResult<Option<bool>> {
        let Some(entry) = self.current() else {
            return Ok(None);
        };
        let flipped = !entry.done;
        set_entry_done(conn, entry.id, flipped)?;
        self.reload(conn)?;
        Ok(Some(flipped))
    }

    /// Delete the selected entry through the pane's capability hook.
    pub(crate) fn delete_selected(&mut self, conn: &Connection) -> StoreResult<bool> {
        let mut rows = EntryRows {
            conn,
            entries: &mut self.entries,
        };
        self.pane.delete_current(&mut rows)
    }

    fn rebuild_rows(&mut self) {
        let rows = self
            .entries
            .iter()
            .map(|e| RowItem::checkable(e.title.clone(), e.done))
            .collect();
        self.pane.set_rows(rows);
    }
}

/// `DeleteAt` adapter over the entry vec, mirroring [`CollectionRows`].
struct EntryRows<'a> {
    conn: &'a Connection,
    entries: &'a mut Vec<Entry>,
}

impl DeleteAt for EntryRows<'_> {
    fn delete_at(&mut self, position: usize) -> Result<(), StoreError> {
        let entry = self
            .entries
            .get(position)
            .ok_or(StoreError::NotFound("entry"))?;
        delete_entry(self.conn, entry.id)?;
        self.entries.remove(position);
        Ok(())
    }
}
