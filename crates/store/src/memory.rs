//! In-memory store.
//!
//! Listing order is insertion order, tracked with a sequence number because
//! `DashMap` iteration order is arbitrary. One-shot failures can be armed per
//! operation to exercise the editor's partial-failure handling.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use pennywise_core::entry::{Entry, EntryKind, EntryPatch, Exclusion, NewEntry};
use pennywise_core::store::{EntryStore, ExclusionStore, StoreError};
use pennywise_shared::YearMonth;
use pennywise_shared::types::{EntryId, ExclusionId, PageRequest, PageResponse};
use tracing::debug;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// `list_entries`.
    ListEntries,
    /// `get_entry`.
    GetEntry,
    /// `create_entry`.
    CreateEntry,
    /// `update_entry`.
    UpdateEntry,
    /// `delete_entry`.
    DeleteEntry,
    /// `list_exclusions`.
    ListExclusions,
    /// `create_exclusion`.
    CreateExclusion,
    /// `delete_exclusion`.
    DeleteExclusion,
}

#[derive(Debug, Clone)]
struct Sequenced<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Clone)]
struct KindedExclusion {
    kind: EntryKind,
    exclusion: Exclusion,
}

/// Concurrent in-memory entry and exclusion store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<EntryId, Sequenced<Entry>>,
    exclusions: DashMap<ExclusionId, Sequenced<KindedExclusion>>,
    sequence: AtomicU64,
    faults: DashMap<StoreOp, usize>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry as-is, bypassing validation. Replaces any entry with the same id.
    pub fn insert_entry(&self, entry: Entry) {
        let seq = self.next_seq();
        self.entries.insert(entry.id, Sequenced { seq, value: entry });
    }

    /// Inserts an exclusion as-is.
    pub fn insert_exclusion(&self, kind: EntryKind, exclusion: Exclusion) {
        let seq = self.next_seq();
        self.exclusions.insert(
            exclusion.id,
            Sequenced {
                seq,
                value: KindedExclusion { kind, exclusion },
            },
        );
    }

    /// Makes the next call of `op` fail with `StoreError::Unavailable`.
    pub fn fail_next(&self, op: StoreOp) {
        self.fail_times(op, 1);
    }

    /// Makes the next `times` calls of `op` fail.
    pub fn fail_times(&self, op: StoreOp, times: usize) {
        *self.faults.entry(op).or_insert(0) += times;
    }

    /// Number of stored entries of both kinds.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of stored exclusions of both kinds.
    #[must_use]
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }

    fn next_seq(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if let Some(mut remaining) = self.faults.get_mut(&op)
            && *remaining > 0
        {
            *remaining -= 1;
            debug!(?op, "Injected store failure");
            return Err(StoreError::Unavailable(format!("injected failure on {op:?}")));
        }
        Ok(())
    }

    fn sorted_entries(&self, kind: EntryKind) -> Vec<Entry> {
        let mut rows: Vec<(u64, Entry)> = self
            .entries
            .iter()
            .filter(|row| row.value.kind == kind)
            .map(|row| (row.seq, row.value.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, entry)| entry).collect()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list_entries(
        &self,
        kind: EntryKind,
        page: PageRequest,
    ) -> Result<PageResponse<Entry>, StoreError> {
        self.check(StoreOp::ListEntries)?;
        Ok(page.paginate(self.sorted_entries(kind)))
    }

    async fn get_entry(&self, id: EntryId) -> Result<Entry, StoreError> {
        self.check(StoreOp::GetEntry)?;
        self.entries
            .get(&id)
            .map(|row| row.value.clone())
            .ok_or_else(|| StoreError::entry_not_found(id))
    }

    async fn create_entry(&self, input: NewEntry) -> Result<Entry, StoreError> {
        self.check(StoreOp::CreateEntry)?;
        let entry = input.into_entry(EntryId::new());
        self.insert_entry(entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, id: EntryId, patch: EntryPatch) -> Result<Entry, StoreError> {
        self.check(StoreOp::UpdateEntry)?;
        let mut row = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| StoreError::entry_not_found(id))?;
        patch.apply_to(&mut row.value);
        Ok(row.value.clone())
    }

    async fn delete_entry(&self, id: EntryId) -> Result<(), StoreError> {
        self.check(StoreOp::DeleteEntry)?;
        self.entries
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::entry_not_found(id))
    }
}

#[async_trait]
impl ExclusionStore for MemoryStore {
    async fn list_exclusions(&self, kind: EntryKind) -> Result<Vec<Exclusion>, StoreError> {
        self.check(StoreOp::ListExclusions)?;
        let mut rows: Vec<(u64, Exclusion)> = self
            .exclusions
            .iter()
            .filter(|row| row.value.kind == kind)
            .map(|row| (row.seq, row.value.exclusion.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        Ok(rows.into_iter().map(|(_, exclusion)| exclusion).collect())
    }

    async fn create_exclusion(
        &self,
        kind: EntryKind,
        entry_id: EntryId,
        month: YearMonth,
    ) -> Result<Exclusion, StoreError> {
        self.check(StoreOp::CreateExclusion)?;
        let exclusion = Exclusion::new(entry_id, month);
        self.insert_exclusion(kind, exclusion.clone());
        Ok(exclusion)
    }

    async fn delete_exclusion(&self, kind: EntryKind, id: ExclusionId) -> Result<(), StoreError> {
        self.check(StoreOp::DeleteExclusion)?;
        self.exclusions
            .remove_if(&id, |_, row| row.value.kind == kind)
            .map(|_| ())
            .ok_or_else(|| StoreError::exclusion_not_found(id))
    }
}
