use chrono::Utc;
use rusqlite::{params, Connection, Row};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::Entry;

use super::error::{StoreError, StoreResult};

/// Get every entry belonging to one collection, ascending by title so
/// mixed-case to-dos group together in the UI.
pub fn fetch_entries(conn: &Connection, collection_id: i64) -> StoreResult<Vec<Entry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, collection_id, title, done, created_at
             FROM entries
             WHERE collection_id = ?1
             ORDER BY title COLLATE NOCASE, id",
        )
        .map_err(StoreError::query("prepare entries query"))?;

    let entries = stmt
        .query_map([collection_id], entry_from_row)
        .map_err(StoreError::query("load entries"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreError::query("collect entries"))?;

    Ok(entries)
}

/// Substring search over entry titles within one collection, case- and
/// diacritic-insensitive ("cafe" matches "Café Run"). A blank query is the
/// same as [`fetch_entries`], which is what lets the UI clear a filter by
/// re-running the search with whatever is left in the input.
///
/// SQLite's `LIKE`/`NOCASE` cannot fold diacritics without extensions, so
/// the match runs in Rust over the collection-scoped, title-ordered rows.
pub fn search_entries(conn: &Connection, collection_id: i64, query: &str) -> StoreResult<Vec<Entry>> {
    let entries = fetch_entries(conn, collection_id)?;

    let needle = fold_for_search(query);
    if needle.trim().is_empty() {
        return Ok(entries);
    }

    Ok(entries
        .into_iter()
        .filter(|entry| fold_for_search(&entry.title).contains(&needle))
        .collect())
}

/// Insert a brand new entry into a collection, stamping the creation time.
/// The hydrated struct is echoed back so the caller can show the row without
/// re-querying.
pub fn create_entry(conn: &Connection, collection_id: i64, title: &str) -> StoreResult<Entry> {
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO entries (collection_id, title, done, created_at)
         VALUES (?1, ?2, 0, ?3)",
        params![collection_id, title, created_at],
    )
    .map_err(StoreError::query("insert entry"))?;

    let id = conn.last_insert_rowid();
    Ok(Entry {
        id,
        collection_id,
        title: title.to_string(),
        done: false,
        created_at: Some(created_at),
    })
}

/// Write the `done` flag for one entry. An explicit field mutation rather
/// than a whole-row update: the flag is the only thing the UI ever changes
/// on an existing entry.
pub fn set_entry_done(conn: &Connection, id: i64, done: bool) -> StoreResult<()> {
    let updated = conn
        .execute(
            "UPDATE entries SET done = ?1 WHERE id = ?2",
            params![done, id],
        )
        .map_err(StoreError::query("update entry done flag"))?;

    if updated == 0 {
        Err(StoreError::NotFound("entry"))
    } else {
        Ok(())
    }
}

/// Permanently delete one entry.
pub fn delete_entry(conn: &Connection, id: i64) -> StoreResult<()> {
    let deleted = conn
        .execute("DELETE FROM entries WHERE id = ?1", params![id])
        .map_err(StoreError::query("delete entry"))?;

    if deleted == 0 {
        Err(StoreError::NotFound("entry"))
    } else {
        Ok(())
    }
}

/// Map one result row onto the domain struct. Shared by the fetch paths so
/// the column order lives in exactly one place per query and one mapper.
fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        collection_id: row.get(1)?,
        title: row.get(2)?,
        done: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Normalize text for matching: NFD-decompose, drop combining marks, then
/// lowercase. Folding both the needle and the haystack makes the search
/// insensitive to case and accents at once.
fn fold_for_search(text: &str) -> String {
    text.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::fold_for_search;

    #[test]
    fn folding_strips_accents_and_case() {
        assert_eq!(fold_for_search("Café Run"), "cafe run");
        assert_eq!(fold_for_search("ÀÉÎÕÜ"), "aeiou");
        assert_eq!(fold_for_search("plain"), "plain");
    }

    #[test]
    fn folding_leaves_non_latin_text_intact() {
        assert_eq!(fold_for_search("買い物"), "買い物");
    }
}
