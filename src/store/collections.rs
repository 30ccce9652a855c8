use rusqlite::{params, Connection};

use crate::models::Collection;

use super::error::{StoreError, StoreResult};

/// Retrieve every collection in insertion order. The query is the single
/// source of truth for how collections are ordered in the UI.
pub fn fetch_collections(conn: &Connection) -> StoreResult<Vec<Collection>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM collections ORDER BY id")
        .map_err(StoreError::query("prepare collection query"))?;

    let collections = stmt
        .query_map([], |row| {
            Ok(Collection {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(StoreError::query("load collections"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreError::query("collect collections"))?;

    Ok(collections)
}

/// Insert a new collection row, returning the hydrated struct so the caller
/// can focus the new row without re-querying. Empty names are accepted; the
/// prompt deliberately carries no validation.
pub fn create_collection(conn: &Connection, name: &str) -> StoreResult<Collection> {
    conn.execute("INSERT INTO collections (name) VALUES (?1)", params![name])
        .map_err(StoreError::query("insert collection"))?;

    let id = conn.last_insert_rowid();
    Ok(Collection {
        id,
        name: name.to_string(),
    })
}

/// Remove a collection row. The schema cascades to `entries`, so the
/// children disappear without manual cleanup.
pub fn delete_collection(conn: &Connection, id: i64) -> StoreResult<()> {
    let deleted = conn
        .execute("DELETE FROM collections WHERE id = ?1", params![id])
        .map_err(StoreError::query("delete collection"))?;

    if deleted == 0 {
        Err(StoreError::NotFound("collection"))
    } else {
        Ok(())
    }
}
