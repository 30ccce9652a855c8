use ticklist::store::{
    create_collection, create_entry, delete_entry, fetch_entries, open_in_memory, set_entry_done,
    StoreError,
};

#[test]
fn new_entries_start_undone_with_a_timestamp() {
    let conn = open_in_memory().unwrap();
    let list = create_collection(&conn, "Inbox").unwrap();

    let entry = create_entry(&conn, list.id, "Water plants").unwrap();
    assert!(!entry.done);
    assert!(entry.created_at.is_some());

    // What the store hands back on re-fetch matches the echo.
    let fetched = fetch_entries(&conn, list.id).unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, entry.id);
    assert_eq!(fetched[0].title, "Water plants");
    assert!(!fetched[0].done);
    assert_eq!(fetched[0].created_at, entry.created_at);
}

#[test]
fn entries_are_scoped_to_their_collection_and_sorted_by_title() {
    let conn = open_in_memory().unwrap();
    let work = create_collection(&conn, "Work").unwrap();
    let home = create_collection(&conn, "Home").unwrap();

    create_entry(&conn, work.id, "prepare slides").unwrap();
    create_entry(&conn, work.id, "Book meeting room").unwrap();
    create_entry(&conn, home.id, "Mow lawn").unwrap();

    let titles: Vec<String> = fetch_entries(&conn, work.id)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    // Ascending by title, case-insensitively.
    assert_eq!(titles, vec!["Book meeting room", "prepare slides"]);

    let home_titles: Vec<String> = fetch_entries(&conn, home.id)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(home_titles, vec!["Mow lawn"]);
}

#[test]
fn double_toggle_restores_the_original_done_value() {
    let conn = open_in_memory().unwrap();
    let list = create_collection(&conn, "Inbox").unwrap();
    let entry = create_entry(&conn, list.id, "Ship release").unwrap();

    set_entry_done(&conn, entry.id, !entry.done).unwrap();
    let flipped = &fetch_entries(&conn, list.id).unwrap()[0];
    assert!(flipped.done);

    set_entry_done(&conn, entry.id, !flipped.done).unwrap();
    let restored = &fetch_entries(&conn, list.id).unwrap()[0];
    assert_eq!(restored.done, entry.done);
}

#[test]
fn toggling_a_missing_entry_reports_not_found() {
    let conn = open_in_memory().unwrap();

    let err = set_entry_done(&conn, 99, true).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn deleting_an_entry_removes_exactly_one_row() {
    let conn = open_in_memory().unwrap();
    let list = create_collection(&conn, "Inbox").unwrap();

    create_entry(&conn, list.id, "alpha").unwrap();
    let beta = create_entry(&conn, list.id, "beta").unwrap();
    create_entry(&conn, list.id, "gamma").unwrap();

    delete_entry(&conn, beta.id).unwrap();

    let titles: Vec<String> = fetch_entries(&conn, list.id)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    // One fewer row, positions after the deleted one shifted down.
    assert_eq!(titles, vec!["alpha", "gamma"]);
}

#[test]
fn create_toggle_delete_round_trip() {
    let conn = open_in_memory().unwrap();

    let work = create_collection(&conn, "Work").unwrap();
    let email = create_entry(&conn, work.id, "Email boss").unwrap();

    set_entry_done(&conn, email.id, true).unwrap();
    let rows = fetch_entries(&conn, work.id).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].done);

    delete_entry(&conn, rows[0].id).unwrap();
    assert!(fetch_entries(&conn, work.id).unwrap().is_empty());
}
