use graffiti_core::db::open_db_in_memory;
use graffiti_core::{EntryService, NewGraffitiEntry, SqliteEntryRepository};
use rusqlite::Connection;

fn seed(conn: &Connection, titles: &[&str]) {
    let service = EntryService::new(SqliteEntryRepository::try_new(conn).unwrap());
    for title in titles {
        let entry = NewGraffitiEntry::new(*title, None, 1.0, 1.0, "/img/x.png", "tester");
        assert!(service.add_entry(&entry).is_success());
    }
}

fn search(conn: &Connection, keyword: &str) -> Vec<String> {
    let service = EntryService::new(SqliteEntryRepository::try_new(conn).unwrap());
    service
        .search_by_title(keyword)
        .ok()
        .unwrap()
        .into_iter()
        .map(|entry| entry.title)
        .collect()
}

#[test]
fn search_matches_substring_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Graffiti Wall", "Street Art", "GRAFitti2"]);

    assert_eq!(search(&conn, "graf"), vec!["Graffiti Wall", "GRAFitti2"]);
    assert_eq!(search(&conn, "ART"), vec!["Street Art"]);
}

#[test]
fn empty_keyword_matches_everything() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["one", "two", "three"]);

    assert_eq!(search(&conn, ""), vec!["one", "two", "three"]);
}

#[test]
fn no_match_returns_empty_sequence() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["Graffiti Wall"]);

    assert!(search(&conn, "stencil").is_empty());
}

#[test]
fn pattern_metacharacters_are_not_escaped() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &["100% Wall", "Bridge", "a_b", "axb"]);

    // `%` matches any run of characters, `_` any single character.
    assert_eq!(search(&conn, "%"), vec!["100% Wall", "Bridge", "a_b", "axb"]);
    assert_eq!(search(&conn, "a_b"), vec!["a_b", "axb"]);
}
