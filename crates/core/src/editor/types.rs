//! Occurrence editor inputs and outcomes.

use chrono::NaiveDate;
use pennywise_shared::YearMonth;
use pennywise_shared::types::{CategoryId, EntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryKind, EntryPatch, Exclusion, ForkOrigin, NewEntry};
use crate::projection::Occurrence;

/// Identifies one occurrence: an entry in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccurrenceRef {
    /// The recurring entry.
    pub entry_id: EntryId,
    /// Expense or income.
    pub kind: EntryKind,
    /// The month of the occurrence.
    pub month: YearMonth,
}

impl OccurrenceRef {
    /// Creates a reference.
    #[must_use]
    pub const fn new(entry_id: EntryId, kind: EntryKind, month: YearMonth) -> Self {
        Self {
            entry_id,
            kind,
            month,
        }
    }

    /// Fork marker for a replacement of this occurrence.
    #[must_use]
    pub const fn origin(&self) -> ForkOrigin {
        ForkOrigin {
            entry_id: self.entry_id,
            month: self.month,
        }
    }
}

impl From<&Occurrence> for OccurrenceRef {
    fn from(occurrence: &Occurrence) -> Self {
        Self::new(occurrence.entry_id, occurrence.kind, occurrence.month)
    }
}

/// New values for a single forked occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceEdit {
    /// Name of the replacement.
    pub name: String,
    /// Amount of the replacement.
    pub amount: Decimal,
    /// Category of the replacement.
    pub category_id: Option<CategoryId>,
    /// Date of the replacement; must fall inside the forked month.
    pub date: NaiveDate,
}

impl OccurrenceEdit {
    /// Starts from the values the occurrence currently shows.
    #[must_use]
    pub fn from_occurrence(occurrence: &Occurrence) -> Self {
        Self {
            name: occurrence.name.clone(),
            amount: occurrence.amount,
            category_id: occurrence.category_id,
            date: occurrence.date,
        }
    }

    pub(crate) fn to_new_entry(&self, target: &OccurrenceRef) -> NewEntry {
        NewEntry {
            kind: target.kind,
            amount: self.amount,
            name: self.name.clone(),
            category_id: self.category_id,
            date: self.date,
            end_date: None,
            recurring: false,
            forked_from: Some(target.origin()),
        }
    }

    pub(crate) fn to_patch(&self) -> EntryPatch {
        EntryPatch {
            name: Some(self.name.clone()),
            amount: Some(self.amount),
            category_id: Some(self.category_id),
            date: Some(self.date),
            end_date: Some(None),
            recurring: Some(false),
        }
    }
}

/// Result of "edit just this month".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkOutcome {
    /// The exclusion hiding the original occurrence.
    pub exclusion: Exclusion,
    /// The one-off replacement.
    pub replacement: Entry,
    /// True if the exclusion already existed.
    pub reused_exclusion: bool,
    /// True if an earlier replacement was updated instead of created.
    pub reused_replacement: bool,
}

/// Result of "delete all months".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    /// Orphaned exclusions removed.
    pub removed_exclusions: usize,
    /// Orphaned exclusions that could not be removed.
    pub failed_exclusions: usize,
}

/// Result of "restore this month".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestoreOutcome {
    /// Exclusions removed for the month.
    pub removed_exclusions: usize,
    /// Replacement entries removed for the month.
    pub removed_replacements: Vec<EntryId>,
}
