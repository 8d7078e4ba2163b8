//! Graffiti entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and title-search APIs over `graffiti_entries` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - No input validation happens here; constraint violations come from the
//!   store itself and surface as `RepoError::Db`.
//! - `update_entry` and `delete_entry` look the row up and then mutate it in
//!   the same default (deferred) transaction. No stronger isolation is
//!   requested, so a concurrent writer may remove the row in between; the
//!   mutation then reports `NotFound`.
//! - Title search passes the keyword into a `LIKE` pattern unescaped, so `%`
//!   and `_` in the keyword act as wildcards.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::entry::{EntryId, EntryUpdate, GraffitiEntry, NewGraffitiEntry};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_TABLE: &str = "graffiti_entries";

const ENTRY_COLUMNS: [&str; 8] = [
    "id",
    "title",
    "description",
    "latitude",
    "longitude",
    "image_url",
    "created_at",
    "created_by",
];

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    latitude,
    longitude,
    image_url,
    created_at,
    created_by
FROM graffiti_entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EntryId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "graffiti entry not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for graffiti entry operations.
pub trait EntryRepository {
    /// Inserts a new entry and returns the store-assigned id.
    fn create_entry(&self, entry: &NewGraffitiEntry) -> RepoResult<EntryId>;
    /// Returns every entry in ascending id order.
    fn list_entries(&self) -> RepoResult<Vec<GraffitiEntry>>;
    /// Gets one entry by primary key.
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<GraffitiEntry>>;
    /// Applies a partial update to an existing entry.
    fn update_entry(&self, id: EntryId, update: &EntryUpdate) -> RepoResult<()>;
    /// Removes an entry permanently.
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    /// Returns entries whose title contains `keyword`, ASCII case-insensitive.
    fn search_by_title(&self, keyword: &str) -> RepoResult<Vec<GraffitiEntry>>;
}

/// SQLite-backed entry repository over a caller-owned connection.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the table shape
    ///   does not match the entry model.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, entry: &NewGraffitiEntry) -> RepoResult<EntryId> {
        in_transaction(self.conn, "create", |tx| {
            tx.execute(
                "INSERT INTO graffiti_entries (
                    title,
                    description,
                    latitude,
                    longitude,
                    image_url,
                    created_by
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    entry.title.as_str(),
                    entry.description.as_deref(),
                    entry.latitude,
                    entry.longitude,
                    entry.image_url.as_str(),
                    entry.created_by.as_str(),
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn list_entries(&self) -> RepoResult<Vec<GraffitiEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<GraffitiEntry>> {
        fetch_entry(self.conn, id)
    }

    fn update_entry(&self, id: EntryId, update: &EntryUpdate) -> RepoResult<()> {
        in_transaction(self.conn, "update", |tx| {
            let Some(mut entry) = fetch_entry(tx, id)? else {
                return Err(RepoError::NotFound(id));
            };
            update.apply_to(&mut entry);

            let changed = tx.execute(
                "UPDATE graffiti_entries
                 SET
                    title = ?1,
                    description = ?2,
                    latitude = ?3,
                    longitude = ?4,
                    image_url = ?5
                 WHERE id = ?6;",
                params![
                    entry.title.as_str(),
                    entry.description.as_deref(),
                    entry.latitude,
                    entry.longitude,
                    entry.image_url.as_str(),
                    id,
                ],
            )?;

            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }

            Ok(())
        })
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        in_transaction(self.conn, "delete", |tx| {
            if fetch_entry(tx, id)?.is_none() {
                return Err(RepoError::NotFound(id));
            }

            let changed = tx.execute("DELETE FROM graffiti_entries WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }

            Ok(())
        })
    }

    fn search_by_title(&self, keyword: &str) -> RepoResult<Vec<GraffitiEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE title LIKE '%' || ?1 || '%'
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([keyword])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }
}

/// Runs `f` in a transaction, committing on success and rolling back on error.
fn in_transaction<T>(
    conn: &Connection,
    op: &'static str,
    f: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = conn.unchecked_transaction()?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(
                    "event=entry_rollback module=repo status=error op={} error={}",
                    op, rollback_err
                );
            } else {
                warn!(
                    "event=entry_rollback module=repo status=ok op={} cause={}",
                    op, err
                );
            }
            Err(err)
        }
    }
}

fn fetch_entry(conn: &Connection, id: EntryId) -> RepoResult<Option<GraffitiEntry>> {
    let mut stmt = conn.prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_entry_row(row)?));
    }

    Ok(None)
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<GraffitiEntry> {
    Ok(GraffitiEntry {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        image_url: row.get("image_url")?,
        created_at: row.get("created_at")?,
        created_by: row.get("created_by")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, ENTRY_TABLE)? {
        return Err(RepoError::MissingRequiredTable(ENTRY_TABLE));
    }

    for column in ENTRY_COLUMNS {
        if !table_has_column(conn, ENTRY_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: ENTRY_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let name: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(name.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
