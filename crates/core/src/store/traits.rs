//! Async store traits.

use async_trait::async_trait;
use pennywise_shared::YearMonth;
use pennywise_shared::types::{EntryId, ExclusionId, PageRequest, PageResponse};

use super::error::StoreError;
use crate::entry::{Entry, EntryKind, EntryPatch, Exclusion, NewEntry};

/// Persistence of entries, one collection per kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Lists entries of `kind` in stable store order.
    async fn list_entries(
        &self,
        kind: EntryKind,
        page: PageRequest,
    ) -> Result<PageResponse<Entry>, StoreError>;

    /// Fetches one entry.
    async fn get_entry(&self, id: EntryId) -> Result<Entry, StoreError>;

    /// Creates an entry and returns it with its assigned id.
    async fn create_entry(&self, input: NewEntry) -> Result<Entry, StoreError>;

    /// Applies a partial update and returns the stored result.
    async fn update_entry(&self, id: EntryId, patch: EntryPatch) -> Result<Entry, StoreError>;

    /// Deletes an entry.
    async fn delete_entry(&self, id: EntryId) -> Result<(), StoreError>;
}

/// Persistence of exclusions, one collection per kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExclusionStore: Send + Sync {
    /// Lists all exclusions for entries of `kind`.
    async fn list_exclusions(&self, kind: EntryKind) -> Result<Vec<Exclusion>, StoreError>;

    /// Records that `entry_id` has no occurrence in `month`.
    async fn create_exclusion(
        &self,
        kind: EntryKind,
        entry_id: EntryId,
        month: YearMonth,
    ) -> Result<Exclusion, StoreError>;

    /// Deletes an exclusion.
    async fn delete_exclusion(&self, kind: EntryKind, id: ExclusionId) -> Result<(), StoreError>;
}
