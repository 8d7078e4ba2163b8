//! Graffiti entry data-access service.
//!
//! # Responsibility
//! - Provide the create/list/get/update/delete/search entry points used by
//!   the presentation layer.
//! - Convert repository errors into [`CatalogResponse::Failure`].
//!
//! # Invariants
//! - No method returns `Err` or panics; every fault becomes a failure payload.
//! - Each call makes a single attempt. There is no retry.
//! - The service holds no entries between calls.

use crate::model::entry::{EntryId, EntryUpdate, GraffitiEntry, NewGraffitiEntry};
use crate::repo::entry_repo::{EntryRepository, RepoResult};
use crate::service::response::{ActionReceipt, CatalogResponse, FailureResponse};
use log::{debug, info, warn};

pub const ENTRY_CREATED_MESSAGE: &str = "Graffiti entry added successfully!";
pub const ENTRY_UPDATED_MESSAGE: &str = "Entry updated successfully!";
pub const ENTRY_DELETED_MESSAGE: &str = "Entry deleted successfully!";

/// Data-access service over an injected entry repository.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new entry and reports the store-assigned id.
    ///
    /// Required-field and length constraints are left to the store.
    pub fn add_entry(&self, entry: &NewGraffitiEntry) -> CatalogResponse<ActionReceipt> {
        match self.repo.create_entry(entry) {
            Ok(entry_id) => {
                info!(
                    "event=entry_create module=service status=ok entry_id={}",
                    entry_id
                );
                CatalogResponse::Success(ActionReceipt::created(ENTRY_CREATED_MESSAGE, entry_id))
            }
            Err(err) => failure("entry_create", err.into()),
        }
    }

    /// Lists every entry as flat records.
    pub fn list_entries(&self) -> CatalogResponse<Vec<GraffitiEntry>> {
        collect("entry_list", self.repo.list_entries())
    }

    /// Gets one entry by id, or the not-found failure.
    pub fn get_entry(&self, entry_id: EntryId) -> CatalogResponse<GraffitiEntry> {
        match self.repo.get_entry(entry_id) {
            Ok(Some(entry)) => CatalogResponse::Success(entry),
            Ok(None) => failure("entry_get", FailureResponse::not_found()),
            Err(err) => failure("entry_get", err.into()),
        }
    }

    /// Applies a partial update.
    ///
    /// Fields that are absent, empty or zero keep their stored value, so this
    /// operation cannot clear a field. `created_by` and `created_at` are not
    /// reachable from [`EntryUpdate`].
    pub fn update_entry(
        &self,
        entry_id: EntryId,
        update: &EntryUpdate,
    ) -> CatalogResponse<ActionReceipt> {
        match self.repo.update_entry(entry_id, update) {
            Ok(()) => {
                info!(
                    "event=entry_update module=service status=ok entry_id={} noop={}",
                    entry_id,
                    update.is_noop()
                );
                CatalogResponse::Success(ActionReceipt::done(ENTRY_UPDATED_MESSAGE))
            }
            Err(err) => failure("entry_update", err.into()),
        }
    }

    /// Removes an entry permanently.
    pub fn delete_entry(&self, entry_id: EntryId) -> CatalogResponse<ActionReceipt> {
        match self.repo.delete_entry(entry_id) {
            Ok(()) => {
                info!(
                    "event=entry_delete module=service status=ok entry_id={}",
                    entry_id
                );
                CatalogResponse::Success(ActionReceipt::done(ENTRY_DELETED_MESSAGE))
            }
            Err(err) => failure("entry_delete", err.into()),
        }
    }

    /// Returns entries whose title contains `keyword`.
    ///
    /// Matching is ASCII case-insensitive. An empty keyword matches every
    /// entry. `%` and `_` inside the keyword are pattern wildcards.
    pub fn search_by_title(&self, keyword: &str) -> CatalogResponse<Vec<GraffitiEntry>> {
        collect("entry_search", self.repo.search_by_title(keyword))
    }
}

fn collect(
    event: &'static str,
    result: RepoResult<Vec<GraffitiEntry>>,
) -> CatalogResponse<Vec<GraffitiEntry>> {
    match result {
        Ok(entries) => {
            debug!(
                "event={} module=service status=ok count={}",
                event,
                entries.len()
            );
            CatalogResponse::Success(entries)
        }
        Err(err) => failure(event, err.into()),
    }
}

fn failure<T>(event: &'static str, failure: FailureResponse) -> CatalogResponse<T> {
    warn!(
        "event={} module=service status=error kind={:?} message={}",
        event, failure.kind, failure.message
    );
    CatalogResponse::Failure(failure)
}
