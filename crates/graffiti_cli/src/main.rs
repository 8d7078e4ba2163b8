//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `graffiti_core` linkage and the configured record store.
//! - Keep output deterministic for quick local sanity checks.

use graffiti_core::db::open_store;
use graffiti_core::{AppConfig, EntryService, SqliteEntryRepository};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("graffiti_core ping={}", graffiti_core::ping());
    println!("graffiti_core version={}", graffiti_core::core_version());

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let conn = match open_store(&config.database) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("store error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteEntryRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("store error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match EntryService::new(repo).list_entries().into_result() {
        Ok(entries) => {
            println!("graffiti_store entries={}", entries.len());
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("store error: {}", failure.message);
            ExitCode::FAILURE
        }
    }
}
