//! Uniform response envelope for catalogue operations.
//!
//! # Responsibility
//! - Model the success/failure outcome of every data-access call.
//! - Serialize to the flat JSON shapes consumed by the presentation layer.
//!
//! # Invariants
//! - Failures always serialize as `{"success": false, "message": ...}`.
//! - Action receipts always serialize with `"success": true`.
//! - Successful reads serialize as the bare record or record array.

use crate::model::entry::EntryId;
use crate::repo::entry_repo::RepoError;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// Message returned whenever a lookup by id finds no row.
pub const NOT_FOUND_MESSAGE: &str = "Entry not found.";

/// Outcome of one data-access operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogResponse<T> {
    Success(T),
    Failure(FailureResponse),
}

impl<T> CatalogResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the failure payload, if any.
    pub fn failure(&self) -> Option<&FailureResponse> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Returns the success payload, dropping failure details.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<T, FailureResponse> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Failure category carried alongside the message.
///
/// Not serialized; callers branch on it to pick transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Requested id has no matching entry.
    NotFound,
    /// Any underlying store error.
    Persistence,
}

/// Failure payload with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureResponse {
    pub kind: FailureKind,
    pub message: String,
}

impl FailureResponse {
    pub fn not_found() -> Self {
        Self {
            kind: FailureKind::NotFound,
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Persistence,
            message: message.into(),
        }
    }
}

impl From<RepoError> for FailureResponse {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::not_found(),
            other => Self::persistence(other.to_string()),
        }
    }
}

impl Serialize for FailureResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FailureResponse", 2)?;
        state.serialize_field("success", &false)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// Success payload for mutating operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReceipt {
    pub message: String,
    /// Set only by create.
    pub entry_id: Option<EntryId>,
}

impl ActionReceipt {
    pub fn created(message: impl Into<String>, entry_id: EntryId) -> Self {
        Self {
            message: message.into(),
            entry_id: Some(entry_id),
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            entry_id: None,
        }
    }
}

impl Serialize for ActionReceipt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.entry_id.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("ActionReceipt", len)?;
        state.serialize_field("success", &true)?;
        state.serialize_field("message", &self.message)?;
        if let Some(entry_id) = self.entry_id {
            state.serialize_field("entry_id", &entry_id)?;
        }
        state.end()
    }
}
