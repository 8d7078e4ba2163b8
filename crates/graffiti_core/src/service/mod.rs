//! Data-access use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into catalogue-level operations.
//! - Convert every repository fault into a uniform response envelope.
//!
//! # See also
//! - `response` for the wire shape shared by all operations.

pub mod entry_service;
pub mod response;
