//! Calendar month value type.
//!
//! Recurrence is compared at month granularity only, so every month key that
//! crosses a boundary (`MM-YYYY` strings, `YYYY-MM-01` dates, full timestamps)
//! is normalized into a [`YearMonth`] as soon as it is read. Conversion back to
//! a particular string format happens only at the edges.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while building or parsing a month key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthKeyError {
    /// Month number outside `1..=12`.
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year outside the supported calendar range.
    #[error("Year {0} is outside the supported range")]
    InvalidYear(i32),

    /// String did not match any accepted month-key format.
    #[error("Unrecognized month key: {0:?}")]
    Unrecognized(String),
}

/// A calendar month identified by year and month number.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, validating the month number and year range.
    ///
    /// # Errors
    ///
    /// Returns `MonthKeyError::InvalidMonth` for months outside `1..=12` and
    /// `MonthKeyError::InvalidYear` when the first day of the month cannot be
    /// represented as a calendar date.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(MonthKeyError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Year component.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month component (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last calendar day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.succ()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// Number of days in the month.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    /// Returns true if `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The date in this month with the given day, clamped to the month length.
    #[must_use]
    pub fn with_day_clamped(self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or_else(|| self.first_day())
    }

    /// Shifts the month by `months` (negative values move backwards).
    #[must_use]
    pub fn add_months(self, months: i32) -> Self {
        let index = self.index() + i64::from(months);
        #[allow(clippy::cast_possible_truncation)]
        let year = index.div_euclid(12) as i32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let month = index.rem_euclid(12) as u32 + 1;
        Self { year, month }
    }

    /// The following month.
    #[must_use]
    pub fn succ(self) -> Self {
        self.add_months(1)
    }

    /// The preceding month.
    #[must_use]
    pub fn pred(self) -> Self {
        self.add_months(-1)
    }

    /// Signed number of months from `self` to `other`.
    #[must_use]
    pub fn months_until(self, other: Self) -> i64 {
        other.index() - self.index()
    }

    /// `count` consecutive months ending at `end` (inclusive), oldest first.
    #[must_use]
    pub fn window_ending(end: Self, count: u32) -> Vec<Self> {
        (0..count)
            .rev()
            .map(|back| end.add_months(-i32::try_from(back).unwrap_or(i32::MAX)))
            .collect()
    }

    /// Every month from `start` to `end`, both inclusive. Empty if `start > end`.
    #[must_use]
    pub fn range_inclusive(start: Self, end: Self) -> Vec<Self> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }

    /// Renders the `MM-YYYY` key used by list screens.
    #[must_use]
    pub fn to_month_year_key(self) -> String {
        format!("{:02}-{:04}", self.month, self.year)
    }

    /// Renders the `YYYY-MM-01` key used when a full date is required.
    #[must_use]
    pub fn to_iso_key(self) -> String {
        self.first_day().format("%Y-%m-%d").to_string()
    }

    /// Parses any accepted month key.
    ///
    /// Accepted forms: `MM-YYYY`, `YYYY-MM`, `YYYY-MM-DD` and RFC 3339
    /// timestamps. Day and time components are discarded.
    ///
    /// # Errors
    ///
    /// Returns `MonthKeyError::Unrecognized` when no form matches, or the
    /// validation errors of [`YearMonth::new`].
    pub fn parse(input: &str) -> Result<Self, MonthKeyError> {
        let trimmed = input.trim();
        let unrecognized = || MonthKeyError::Unrecognized(input.to_string());

        // Timestamps and plain dates share the leading `YYYY-MM-DD`.
        let head = trimmed.get(..10).unwrap_or(trimmed);
        if head.len() == 10 {
            if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                return Ok(Self::from_date(date));
            }
        }

        let (left, right) = trimmed.split_once('-').ok_or_else(unrecognized)?;
        if left.is_empty() || right.is_empty() || !is_digits(left) || !is_digits(right) {
            return Err(unrecognized());
        }
        match (left.len(), right.len()) {
            // MM-YYYY
            (1 | 2, 4) => Self::new(
                right.parse().map_err(|_| unrecognized())?,
                left.parse().map_err(|_| unrecognized())?,
            ),
            // YYYY-MM
            (4, 1 | 2) => Self::new(
                left.parse().map_err(|_| unrecognized())?,
                right.parse().map_err(|_| unrecognized())?,
            ),
            _ => Err(unrecognized()),
        }
    }

    fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
