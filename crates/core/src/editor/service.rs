//! Occurrence editor service.

use std::sync::Arc;

use pennywise_shared::config::EditorConfig;
use pennywise_shared::types::EntryId;
use tracing::{info, warn};

use super::error::EditorError;
use super::types::{DeleteOutcome, ForkOutcome, OccurrenceEdit, OccurrenceRef, RestoreOutcome};
use crate::entry::{Entry, EntryKind, EntryPatch, Exclusion, validate_entry, validate_new_entry};
use crate::store::{EntryStore, ExclusionStore, StoreError, fetch_all_entries};

/// Default page size used when scanning for earlier replacements.
const DEFAULT_PAGE_SIZE: u32 = 50;

/// Orchestrates edits and deletions of single occurrences and whole entries.
///
/// Store writes are independent calls with no transaction around them. A
/// fork is made retry-safe instead: an existing exclusion for the month is
/// reused and an earlier replacement (found through its `forked_from`
/// marker) is updated rather than duplicated.
#[derive(Clone)]
pub struct OccurrenceEditor {
    entries: Arc<dyn EntryStore>,
    exclusions: Arc<dyn ExclusionStore>,
    config: EditorConfig,
    page_size: u32,
}

impl OccurrenceEditor {
    /// Creates an editor with default configuration.
    #[must_use]
    pub fn new(entries: Arc<dyn EntryStore>, exclusions: Arc<dyn ExclusionStore>) -> Self {
        Self {
            entries,
            exclusions,
            config: EditorConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Replaces the editor configuration.
    #[must_use]
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the page size used to walk entry listings.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Edit just this month.
    ///
    /// Hides the occurrence with an exclusion and records the edited values
    /// as a one-off replacement in the same month. The original entry is
    /// untouched.
    ///
    /// # Errors
    ///
    /// - `DateOutsideMonth` / `Invalid` if the edit is unusable
    /// - `NotRecurring` / `OutsideRecurrence` if there is no such occurrence
    /// - `ReplacementFailed` if the replacement failed and the exclusion was rolled back
    /// - `PartialFailure` if the exclusion stays committed without a replacement
    pub async fn edit_this_month(
        &self,
        target: OccurrenceRef,
        edit: OccurrenceEdit,
    ) -> Result<ForkOutcome, EditorError> {
        if !target.month.contains(edit.date) {
            return Err(EditorError::DateOutsideMonth {
                date: edit.date,
                month: target.month,
            });
        }
        let input = edit.to_new_entry(&target);
        validate_new_entry(&input)?;

        self.load_recurring(&target).await?;
        let previous = self.find_replacements(&target).await?.into_iter().next();
        let (exclusion, created) = self.ensure_exclusion(&target).await?;

        let written = match &previous {
            Some(replacement) => self.entries.update_entry(replacement.id, edit.to_patch()).await,
            None => self.entries.create_entry(input).await,
        };

        match written {
            Ok(replacement) => {
                info!(
                    entry_id = %target.entry_id,
                    month = %target.month,
                    replacement_id = %replacement.id,
                    reused_exclusion = !created,
                    "Forked occurrence"
                );
                Ok(ForkOutcome {
                    exclusion,
                    replacement,
                    reused_exclusion: !created,
                    reused_replacement: previous.is_some(),
                })
            }
            Err(source) => Err(self.compensate(&target, &exclusion, created, source).await),
        }
    }

    /// Edit all months: applies `patch` to the entry itself.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if the patched entry breaks an entry rule, or the
    /// store error.
    pub async fn edit_all(
        &self,
        entry_id: EntryId,
        kind: EntryKind,
        patch: EntryPatch,
    ) -> Result<Entry, EditorError> {
        let entry = self.load_entry(entry_id, kind).await?;
        if patch.is_empty() {
            return Ok(entry);
        }
        validate_entry(&patch.applied(&entry))?;

        let updated = self.entries.update_entry(entry_id, patch).await?;
        info!(entry_id = %entry_id, %kind, "Updated entry for all months");
        Ok(updated)
    }

    /// Delete just this month: hides the occurrence with an exclusion.
    ///
    /// Calling it again for the same month reuses the existing exclusion.
    ///
    /// # Errors
    ///
    /// Returns `NotRecurring` / `OutsideRecurrence`, or the store error.
    pub async fn delete_this_month(&self, target: OccurrenceRef) -> Result<Exclusion, EditorError> {
        self.load_recurring(&target).await?;
        let (exclusion, created) = self.ensure_exclusion(&target).await?;
        info!(
            entry_id = %target.entry_id,
            month = %target.month,
            reused = !created,
            "Excluded occurrence"
        );
        Ok(exclusion)
    }

    /// Delete all months: removes the entry, then its exclusions.
    ///
    /// Exclusion clean-up is best effort; leftovers reference a missing
    /// entry and are inert.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` if the entry is not of `kind`, or the store
    /// error if the entry itself could not be loaded or deleted.
    pub async fn delete_all(
        &self,
        entry_id: EntryId,
        kind: EntryKind,
    ) -> Result<DeleteOutcome, EditorError> {
        self.load_entry(entry_id, kind).await?;
        self.entries.delete_entry(entry_id).await?;
        info!(entry_id = %entry_id, %kind, "Deleted entry");

        let mut outcome = DeleteOutcome::default();
        let orphans = match self.exclusions.list_exclusions(kind).await {
            Ok(exclusions) => exclusions,
            Err(err) => {
                warn!(entry_id = %entry_id, error = %err, "Could not list exclusions for clean-up");
                return Ok(outcome);
            }
        };

        for exclusion in orphans.iter().filter(|e| e.entry_id == entry_id) {
            match self.exclusions.delete_exclusion(kind, exclusion.id).await {
                Ok(()) => outcome.removed_exclusions += 1,
                Err(err) => {
                    outcome.failed_exclusions += 1;
                    warn!(exclusion_id = %exclusion.id, error = %err, "Failed to remove orphaned exclusion");
                }
            }
        }

        Ok(outcome)
    }

    /// Restore this month: undoes a fork or a "delete just this month".
    ///
    /// Removes the month's exclusions and any replacement created for it.
    ///
    /// # Errors
    ///
    /// Returns `NotRecurring`, or the store error.
    pub async fn restore_this_month(
        &self,
        target: OccurrenceRef,
    ) -> Result<RestoreOutcome, EditorError> {
        let entry = self.load_entry(target.entry_id, target.kind).await?;
        if !entry.recurring {
            return Err(EditorError::NotRecurring(entry.id));
        }

        let mut outcome = RestoreOutcome::default();

        for replacement in self.find_replacements(&target).await? {
            self.entries.delete_entry(replacement.id).await?;
            outcome.removed_replacements.push(replacement.id);
        }

        for exclusion in self.matching_exclusions(&target).await? {
            self.exclusions
                .delete_exclusion(target.kind, exclusion.id)
                .await?;
            outcome.removed_exclusions += 1;
        }

        info!(
            entry_id = %target.entry_id,
            month = %target.month,
            removed_exclusions = outcome.removed_exclusions,
            removed_replacements = outcome.removed_replacements.len(),
            "Restored occurrence"
        );
        Ok(outcome)
    }

    async fn load_entry(&self, entry_id: EntryId, kind: EntryKind) -> Result<Entry, EditorError> {
        let entry = self.entries.get_entry(entry_id).await?;
        if entry.kind != kind {
            return Err(EditorError::KindMismatch {
                entry_id,
                expected: kind,
            });
        }
        Ok(entry)
    }

    async fn load_recurring(&self, target: &OccurrenceRef) -> Result<Entry, EditorError> {
        let entry = self.load_entry(target.entry_id, target.kind).await?;
        if !entry.recurring {
            return Err(EditorError::NotRecurring(entry.id));
        }
        if !entry.recurs_in(target.month) {
            return Err(EditorError::OutsideRecurrence {
                entry_id: entry.id,
                month: target.month,
            });
        }
        Ok(entry)
    }

    async fn matching_exclusions(
        &self,
        target: &OccurrenceRef,
    ) -> Result<Vec<Exclusion>, StoreError> {
        let exclusions = self.exclusions.list_exclusions(target.kind).await?;
        Ok(exclusions
            .into_iter()
            .filter(|e| e.matches(target.entry_id, target.month))
            .collect())
    }

    /// Returns the exclusion for the month and whether this call created it.
    async fn ensure_exclusion(
        &self,
        target: &OccurrenceRef,
    ) -> Result<(Exclusion, bool), StoreError> {
        if let Some(existing) = self.matching_exclusions(target).await?.into_iter().next() {
            return Ok((existing, false));
        }
        let created = self
            .exclusions
            .create_exclusion(target.kind, target.entry_id, target.month)
            .await?;
        Ok((created, true))
    }

    async fn find_replacements(&self, target: &OccurrenceRef) -> Result<Vec<Entry>, StoreError> {
        let origin = target.origin();
        let entries = fetch_all_entries(self.entries.as_ref(), target.kind, self.page_size).await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.forked_from == Some(origin))
            .collect())
    }

    async fn compensate(
        &self,
        target: &OccurrenceRef,
        exclusion: &Exclusion,
        created: bool,
        source: StoreError,
    ) -> EditorError {
        let partial = |source| EditorError::PartialFailure {
            exclusion_id: exclusion.id,
            entry_id: target.entry_id,
            month: target.month,
            source,
        };

        if !created || !self.config.compensate_partial_failure {
            warn!(
                entry_id = %target.entry_id,
                month = %target.month,
                exclusion_id = %exclusion.id,
                error = %source,
                "Replacement failed; exclusion left in place"
            );
            return partial(source);
        }

        match self
            .exclusions
            .delete_exclusion(target.kind, exclusion.id)
            .await
        {
            Ok(()) => {
                warn!(
                    entry_id = %target.entry_id,
                    month = %target.month,
                    error = %source,
                    "Replacement failed; exclusion rolled back"
                );
                EditorError::ReplacementFailed {
                    entry_id: target.entry_id,
                    month: target.month,
                    source,
                }
            }
            Err(rollback) => {
                warn!(
                    exclusion_id = %exclusion.id,
                    error = %rollback,
                    "Could not roll back exclusion"
                );
                partial(source)
            }
        }
    }
}
