//! Balance aggregation over projected occurrences.
//!
//! This module provides:
//! - Per-month income, expense and balance totals
//! - Window reports with averages and a trend
//! - Within-month running balances
//! - Category/source breakdowns with palette colors

pub mod aggregator;
pub mod trend;
pub mod types;


pub use aggregator::BalanceAggregator;
pub use trend::Trend;
pub use types::{BalanceReport, CategoryTotal, MonthlyTotals, RunningBalanceRow};

use rust_decimal::Decimal;

/// Sums amounts, clamping at the `Decimal` bounds instead of panicking.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
