//! Entry validation errors.

use pennywise_shared::YearMonth;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when an entry would be created or updated in an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Name is empty or whitespace.
    #[error("Entry name cannot be empty")]
    EmptyName,

    /// Amount must be strictly positive; the kind carries the sign.
    #[error("Entry amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Amount exceeds the per-entry cap.
    #[error("Entry amount {0} exceeds the maximum of {max}", max = super::validation::MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    /// The end month precedes the start month.
    #[error("Recurrence ends in {end} before it starts in {start}")]
    EndBeforeStart {
        /// First month of recurrence.
        start: YearMonth,
        /// Requested last month of recurrence.
        end: YearMonth,
    },
}

impl From<EntryError> for pennywise_shared::AppError {
    fn from(err: EntryError) -> Self {
        Self::Validation(err.to_string())
    }
}
