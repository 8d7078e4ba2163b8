//! Shared request state.
//!
//! # Responsibility
//! - Own the long-lived store connection shared by all requests.
//! - Run each data-access call off the async executor.
//!
//! # Invariants
//! - The connection is locked for exactly one service call per request.
//! - Lock poisoning and task failures surface as persistence failures.

use graffiti_core::{CatalogResponse, EntryService, FailureResponse, SqliteEntryRepository};
use log::error;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against a fresh service bound to the shared connection.
    pub async fn with_service<T, F>(&self, op: F) -> CatalogResponse<T>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&EntryService<SqliteEntryRepository<'conn>>) -> CatalogResponse<T>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            let guard = match conn.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    return CatalogResponse::Failure(FailureResponse::persistence(
                        "store connection is unavailable",
                    ))
                }
            };
            match SqliteEntryRepository::try_new(&guard) {
                Ok(repo) => op(&EntryService::new(repo)),
                Err(err) => CatalogResponse::Failure(err.into()),
            }
        })
        .await;

        match joined {
            Ok(response) => response,
            Err(err) => {
                error!("event=store_task module=web status=error error={}", err);
                CatalogResponse::Failure(FailureResponse::persistence(err.to_string()))
            }
        }
    }
}
