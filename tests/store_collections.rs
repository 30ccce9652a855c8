use ticklist::store::{
    create_collection, create_entry, delete_collection, fetch_collections, fetch_entries,
    open_in_memory, open_store_at, StoreError,
};

#[test]
fn every_add_shows_up_in_the_fetched_list() {
    let conn = open_in_memory().unwrap();

    for name in ["Home", "Work", "Groceries"] {
        create_collection(&conn, name).unwrap();
    }

    let collections = fetch_collections(&conn).unwrap();
    assert_eq!(collections.len(), 3);
    // Insertion order is display order.
    let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Home", "Work", "Groceries"]);
}

#[test]
fn empty_names_are_accepted_as_is() {
    let conn = open_in_memory().unwrap();

    create_collection(&conn, "").unwrap();
    create_collection(&conn, "   ").unwrap();

    let collections = fetch_collections(&conn).unwrap();
    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0].name, "");
    assert_eq!(collections[1].name, "   ");
}

#[test]
fn duplicate_names_are_allowed() {
    let conn = open_in_memory().unwrap();

    create_collection(&conn, "Chores").unwrap();
    create_collection(&conn, "Chores").unwrap();

    assert_eq!(fetch_collections(&conn).unwrap().len(), 2);
}

#[test]
fn deleting_removes_exactly_one_collection() {
    let conn = open_in_memory().unwrap();

    let keep = create_collection(&conn, "Keep").unwrap();
    let gone = create_collection(&conn, "Drop").unwrap();

    delete_collection(&conn, gone.id).unwrap();

    let remaining = fetch_collections(&conn).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
}

#[test]
fn deleting_a_missing_collection_reports_not_found() {
    let conn = open_in_memory().unwrap();

    let err = delete_collection(&conn, 42).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn deleting_a_collection_cascades_to_its_entries() {
    let conn = open_in_memory().unwrap();

    let doomed = create_collection(&conn, "Doomed").unwrap();
    let survivor = create_collection(&conn, "Survivor").unwrap();
    create_entry(&conn, doomed.id, "goes away").unwrap();
    create_entry(&conn, survivor.id, "stays put").unwrap();

    delete_collection(&conn, doomed.id).unwrap();

    let orphan_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM entries WHERE collection_id = ?1",
            [doomed.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphan_count, 0);
    assert_eq!(fetch_entries(&conn, survivor.id).unwrap().len(), 1);
}

#[test]
fn on_disk_store_is_created_under_the_given_path() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("todos.sqlite");

    let conn = open_store_at(&db_path).unwrap();
    create_collection(&conn, "Persisted").unwrap();
    drop(conn);

    assert!(db_path.exists());

    // Re-opening sees the same data.
    let conn = open_store_at(&db_path).unwrap();
    let collections = fetch_collections(&conn).unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "Persisted");
}
