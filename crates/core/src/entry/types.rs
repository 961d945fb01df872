//! Entry domain types.

use chrono::NaiveDate;
use pennywise_shared::YearMonth;
use pennywise_shared::types::{CategoryId, EntryId, ExclusionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether an entry takes money out or brings it in.
///
/// Both kinds share the same shape and projection rules; only the sign used
/// in balances differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money spent.
    Expense,
    /// Money received.
    Income,
}

impl EntryKind {
    /// Both kinds, expenses first.
    pub const ALL: [Self; 2] = [Self::Expense, Self::Income];

    /// Applies the balance sign of this kind to a positive amount.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Expense => -amount,
            Self::Income => amount,
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks a one-off entry as the replacement for one occurrence of a recurring entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForkOrigin {
    /// The recurring entry whose occurrence was replaced.
    pub entry_id: EntryId,
    /// The month whose occurrence was replaced.
    pub month: YearMonth,
}

/// A persisted expense or income record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier.
    pub id: EntryId,
    /// Expense or income.
    pub kind: EntryKind,
    /// Positive amount.
    pub amount: Decimal,
    /// Display label.
    pub name: String,
    /// Category (expenses) or source (income).
    pub category_id: Option<CategoryId>,
    /// Occurrence date for one-offs; first month of recurrence otherwise.
    pub date: NaiveDate,
    /// Last month (inclusive) of recurrence. `None` is unbounded.
    pub end_date: Option<NaiveDate>,
    /// Whether the entry repeats monthly.
    pub recurring: bool,
    /// Set when this one-off replaces a single occurrence of a recurring entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forked_from: Option<ForkOrigin>,
}

impl Entry {
    /// Month of `date`: the occurrence month or the first recurring month.
    #[must_use]
    pub fn start_month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }

    /// Month of `end_date`, if any.
    #[must_use]
    pub fn end_month(&self) -> Option<YearMonth> {
        self.end_date.map(YearMonth::from_date)
    }

    /// Returns true if `month` lies within the recurrence window.
    ///
    /// Exclusions are not considered here; see the projector for the full rule.
    #[must_use]
    pub fn recurs_in(&self, month: YearMonth) -> bool {
        self.recurring
            && self.start_month() <= month
            && self.end_month().is_none_or(|end| month <= end)
    }
}

/// A marker that a recurring entry has no occurrence in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    /// Unique identifier.
    pub id: ExclusionId,
    /// The recurring entry being suppressed.
    pub entry_id: EntryId,
    /// The suppressed month.
    pub excluded_month: YearMonth,
}

impl Exclusion {
    /// Creates an exclusion with a fresh id.
    #[must_use]
    pub fn new(entry_id: EntryId, excluded_month: YearMonth) -> Self {
        Self {
            id: ExclusionId::new(),
            entry_id,
            excluded_month,
        }
    }

    /// Returns true if this exclusion suppresses `entry_id` in `month`.
    #[must_use]
    pub fn matches(&self, entry_id: EntryId, month: YearMonth) -> bool {
        self.entry_id == entry_id && self.excluded_month == month
    }
}

/// Input for creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    /// Expense or income.
    pub kind: EntryKind,
    /// Positive amount.
    pub amount: Decimal,
    /// Display label.
    pub name: String,
    /// Category or source.
    pub category_id: Option<CategoryId>,
    /// Occurrence date or first recurring month.
    pub date: NaiveDate,
    /// Last recurring month.
    pub end_date: Option<NaiveDate>,
    /// Whether the entry repeats monthly.
    pub recurring: bool,
    /// Replacement marker for forked occurrences.
    pub forked_from: Option<ForkOrigin>,
}

impl NewEntry {
    /// A one-off entry on `date`.
    #[must_use]
    pub fn one_off(
        kind: EntryKind,
        name: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            name: name.into(),
            category_id: None,
            date,
            end_date: None,
            recurring: false,
            forked_from: None,
        }
    }

    /// A monthly entry starting in the month of `start`.
    #[must_use]
    pub fn monthly(
        kind: EntryKind,
        name: impl Into<String>,
        amount: Decimal,
        start: NaiveDate,
    ) -> Self {
        Self {
            recurring: true,
            ..Self::one_off(kind, name, amount, start)
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the last recurring month.
    #[must_use]
    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Materializes the entry under `id`.
    #[must_use]
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry {
            id,
            kind: self.kind,
            amount: self.amount,
            name: self.name,
            category_id: self.category_id,
            date: self.date,
            end_date: self.end_date,
            recurring: self.recurring,
            forked_from: self.forked_from,
        }
    }
}

/// Partial update applied by "edit all months".
///
/// `None` leaves a field unchanged; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    /// New name.
    pub name: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category_id: Option<Option<CategoryId>>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<Option<NaiveDate>>,
    /// New recurring flag.
    pub recurring: Option<bool>,
}

impl EntryPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the patch in place.
    pub fn apply_to(&self, entry: &mut Entry) {
        if let Some(name) = &self.name {
            entry.name.clone_from(name);
        }
        if let Some(amount) = self.amount {
            entry.amount = amount;
        }
        if let Some(category_id) = self.category_id {
            entry.category_id = category_id;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(end_date) = self.end_date {
            entry.end_date = end_date;
        }
        if let Some(recurring) = self.recurring {
            entry.recurring = recurring;
        }
    }

    /// Returns a patched copy of `entry`.
    #[must_use]
    pub fn applied(&self, entry: &Entry) -> Entry {
        let mut patched = entry.clone();
        self.apply_to(&mut patched);
        patched
    }
}
