//! Domain model for catalogued graffiti artwork.
//!
//! # Responsibility
//! - Define the canonical record persisted in `graffiti_entries`.
//! - Define write-side inputs for create and partial update use-cases.
//!
//! # Invariants
//! - Every persisted entry is identified by a store-assigned `EntryId`.
//! - Entries are flat; no entry references another.

pub mod entry;
