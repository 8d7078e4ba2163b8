use graffiti_core::db::migrations::latest_version;
use graffiti_core::db::{open_db, open_db_in_memory, open_store, DbError};
use graffiti_core::DatabaseLocation;
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "graffiti_entries");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graffiti.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO graffiti_entries (title, latitude, longitude, image_url, created_by)
             VALUES ('kept', 1.0, 2.0, '/img/k.png', 'bob');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM graffiti_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn open_store_follows_configured_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.db");

    let conn = open_store(&DatabaseLocation::File(path.clone())).unwrap();
    assert_table_exists(&conn, "graffiti_entries");
    assert!(path.exists());

    let memory = open_store(&DatabaseLocation::Memory).unwrap();
    assert_table_exists(&memory, "graffiti_entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn created_at_defaults_to_insert_time() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO graffiti_entries (title, latitude, longitude, image_url, created_by)
         VALUES ('stamp', 0.5, 0.5, '/img/s.png', 'eve');",
        [],
    )
    .unwrap();

    let created_at: i64 = conn
        .query_row("SELECT created_at FROM graffiti_entries;", [], |row| {
            row.get(0)
        })
        .unwrap();
    // 2020-01-01T00:00:00Z in epoch milliseconds.
    assert!(created_at > 1_577_836_800_000);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
