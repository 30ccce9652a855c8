use ticklist::store::{create_collection, create_entry, open_in_memory, search_entries};

fn titles(entries: Vec<ticklist::Entry>) -> Vec<String> {
    entries.into_iter().map(|e| e.title).collect()
}

#[test]
fn search_matches_substrings_case_insensitively() {
    let conn = open_in_memory().unwrap();
    let list = create_collection(&conn, "Errands").unwrap();
    create_entry(&conn, list.id, "Buy milk").unwrap();
    create_entry(&conn, list.id, "buy stamps").unwrap();
    create_entry(&conn, list.id, "Call plumber").unwrap();

    let hits = search_entries(&conn, list.id, "BUY").unwrap();
    assert_eq!(titles(hits), vec!["Buy milk", "buy stamps"]);
}

#[test]
fn search_ignores_diacritics_in_both_directions() {
    let conn = open_in_memory().unwrap();
    let list = create_collection(&conn, "Errands").unwrap();
    create_entry(&conn, list.id, "Café Run").unwrap();
    create_entry(&conn, list.id, "Send resume").unwrap();

    // Plain needle, accented title.
    let hits = search_entries(&conn, list.id, "cafe").unwrap();
    assert_eq!(titles(hits), vec!["Café Run"]);

    // Accented needle, plain title.
    let hits = search_entries(&conn, list.id, "résumé").unwrap();
    assert_eq!(titles(hits), vec!["Send resume"]);
}

#[test]
fn blank_query_restores_the_full_collection_scoped_list() {
    let conn = open_in_memory().unwrap();
    let mine = create_collection(&conn, "Mine").unwrap();
    let other = create_collection(&conn, "Other").unwrap();
    create_entry(&conn, mine.id, "zebra").unwrap();
    create_entry(&conn, mine.id, "apple").unwrap();
    create_entry(&conn, other.id, "unrelated").unwrap();

    for needle in ["", "   "] {
        let all = search_entries(&conn, mine.id, needle).unwrap();
        // Exactly this collection's entries, ascending by title.
        assert_eq!(titles(all), vec!["apple", "zebra"]);
    }
}

#[test]
fn search_results_keep_the_title_ordering() {
    let conn = open_in_memory().unwrap();
    let list = create_collection(&conn, "Reading").unwrap();
    create_entry(&conn, list.id, "read Sutton").unwrap();
    create_entry(&conn, list.id, "Read Knuth").unwrap();
    create_entry(&conn, list.id, "buy bookmarks").unwrap();

    let hits = search_entries(&conn, list.id, "read").unwrap();
    assert_eq!(titles(hits), vec!["Read Knuth", "read Sutton"]);
}

#[test]
fn no_match_yields_an_empty_result_without_error() {
    let conn = open_in_memory().unwrap();
    let list = create_collection(&conn, "Errands").unwrap();
    create_entry(&conn, list.id, "Buy milk").unwrap();

    assert!(search_entries(&conn, list.id, "xyzzy").unwrap().is_empty());
}
