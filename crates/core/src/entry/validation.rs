//! Business rule validation for entries.
//!
//! Rules:
//! - the name is not blank
//! - the amount is strictly positive and at most [`MAX_AMOUNT`]
//! - a recurrence never ends in a month before it starts
//!
//! Records already persisted in violation of the last rule are tolerated by
//! the projector (they simply never project); new writes are rejected.

use chrono::NaiveDate;
use pennywise_shared::YearMonth;
use rust_decimal::Decimal;

use super::error::EntryError;
use super::types::{Entry, NewEntry};

/// Largest amount a single entry may carry. Keeps window totals well inside
/// the `Decimal` range.
// 1_000_000_000_000 (0xE8_D4A5_1000); `Decimal::new` is not `const`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Validates a creation input.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_new_entry(input: &NewEntry) -> Result<(), EntryError> {
    validate_fields(&input.name, input.amount, input.date, input.end_date)
}

/// Validates an entry, typically after applying an `EntryPatch`.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_entry(entry: &Entry) -> Result<(), EntryError> {
    validate_fields(&entry.name, entry.amount, entry.date, entry.end_date)
}

fn validate_fields(
    name: &str,
    amount: Decimal,
    date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<(), EntryError> {
    if name.trim().is_empty() {
        return Err(EntryError::EmptyName);
    }
    if amount <= Decimal::ZERO {
        return Err(EntryError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(EntryError::AmountTooLarge(amount));
    }
    if let Some(end_date) = end_date {
        let start = YearMonth::from_date(date);
        let end = YearMonth::from_date(end_date);
        if end < start {
            return Err(EntryError::EndBeforeStart { start, end });
        }
    }
    Ok(())
}
