//! Core domain logic for the graffiti catalogue.
//! This crate is the single source of truth for entry storage and the
//! data-access contract used by presentation layers.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError, DatabaseLocation, Environment};
pub use logging::{init_logging, logging_status};
pub use model::entry::{EntryId, EntryUpdate, GraffitiEntry, NewGraffitiEntry};
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use service::entry_service::EntryService;
pub use service::response::{ActionReceipt, CatalogResponse, FailureKind, FailureResponse};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
