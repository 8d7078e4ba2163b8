//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts over the `graffiti_entries` table.
//! - Isolate SQLite query details from the service layer.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Every mutation runs in its own transaction and is rolled back on error.

pub mod entry_repo;
