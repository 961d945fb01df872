//! The projection rule: which occurrences exist in a calendar month.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use pennywise_shared::YearMonth;
use pennywise_shared::types::{CategoryId, EntryId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::entry::{Entry, EntryKind, Exclusion};

/// A virtual occurrence of an entry in one month. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    /// The entry this occurrence comes from.
    pub entry_id: EntryId,
    /// Expense or income.
    pub kind: EntryKind,
    /// The projected month.
    pub month: YearMonth,
    /// Display date: the one-off date, or the recurring day clamped into `month`.
    pub date: NaiveDate,
    /// Current amount of the entry.
    pub amount: Decimal,
    /// Current name of the entry.
    pub name: String,
    /// Current category of the entry.
    pub category_id: Option<CategoryId>,
    /// Whether the source entry is recurring.
    pub recurring: bool,
}

impl Occurrence {
    fn of(entry: &Entry, month: YearMonth) -> Self {
        let date = if entry.recurring {
            month.with_day_clamped(entry.date.day())
        } else {
            entry.date
        };
        Self {
            entry_id: entry.id,
            kind: entry.kind,
            month,
            date,
            amount: entry.amount,
            name: entry.name.clone(),
            category_id: entry.category_id,
            recurring: entry.recurring,
        }
    }

    /// Amount with the balance sign of its kind.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// Set of suppressed `(entry, month)` pairs.
#[derive(Debug, Clone, Default)]
pub struct ExclusionIndex {
    pairs: HashSet<(EntryId, YearMonth)>,
}

impl ExclusionIndex {
    /// Indexes a list of exclusions. Duplicates collapse.
    #[must_use]
    pub fn new(exclusions: &[Exclusion]) -> Self {
        Self {
            pairs: exclusions
                .iter()
                .map(|e| (e.entry_id, e.excluded_month))
                .collect(),
        }
    }

    /// Returns true if `entry_id` is suppressed in `month`.
    #[must_use]
    pub fn contains(&self, entry_id: EntryId, month: YearMonth) -> bool {
        self.pairs.contains(&(entry_id, month))
    }

    /// Number of distinct suppressed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if nothing is suppressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Projector with exclusions indexed once, for scanning many months.
///
/// Holds no entries; the same projector can be shared across threads and
/// applied to any entry list.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    exclusions: ExclusionIndex,
}

impl Projector {
    /// Creates a projector over `exclusions`.
    #[must_use]
    pub fn new(exclusions: &[Exclusion]) -> Self {
        Self {
            exclusions: ExclusionIndex::new(exclusions),
        }
    }

    /// Returns true if `entry` has an occurrence in `month`.
    #[must_use]
    pub fn occurs(&self, entry: &Entry, month: YearMonth) -> bool {
        occurs_with(entry, month, |id, m| self.exclusions.contains(id, m))
    }

    /// Occurrences of `entries` in `month`, in input order.
    #[must_use]
    pub fn project(&self, entries: &[Entry], month: YearMonth) -> Vec<Occurrence> {
        let occurrences: Vec<Occurrence> = entries
            .iter()
            .filter(|entry| self.occurs(entry, month))
            .map(|entry| Occurrence::of(entry, month))
            .collect();
        debug!(
            %month,
            entries = entries.len(),
            occurrences = occurrences.len(),
            "Projected month"
        );
        occurrences
    }

    /// Occurrences of the entries of one kind in `month`, in input order.
    #[must_use]
    pub fn project_kind(
        &self,
        entries: &[Entry],
        kind: EntryKind,
        month: YearMonth,
    ) -> Vec<Occurrence> {
        entries
            .iter()
            .filter(|entry| entry.kind == kind && self.occurs(entry, month))
            .map(|entry| Occurrence::of(entry, month))
            .collect()
    }
}

/// Projects `entries` into `target`, honoring `exclusions`.
///
/// Pure and deterministic. The output follows the order of `entries`.
#[must_use]
pub fn project(entries: &[Entry], exclusions: &[Exclusion], target: YearMonth) -> Vec<Occurrence> {
    Projector::new(exclusions).project(entries, target)
}

/// Like [`project`], restricted to one kind.
#[must_use]
pub fn project_kind(
    entries: &[Entry],
    exclusions: &[Exclusion],
    kind: EntryKind,
    target: YearMonth,
) -> Vec<Occurrence> {
    Projector::new(exclusions).project_kind(entries, kind, target)
}

/// The projection rule for a single entry.
#[must_use]
pub fn occurs_in(entry: &Entry, exclusions: &[Exclusion], target: YearMonth) -> bool {
    occurs_with(entry, target, |id, month| {
        exclusions.iter().any(|e| e.matches(id, month))
    })
}

fn occurs_with(
    entry: &Entry,
    target: YearMonth,
    is_excluded: impl Fn(EntryId, YearMonth) -> bool,
) -> bool {
    if !entry.recurring {
        // One-offs ignore exclusions.
        return target.contains(entry.date);
    }
    entry.recurs_in(target) && !is_excluded(entry.id, target)
}
