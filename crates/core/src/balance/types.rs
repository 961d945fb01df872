//! Balance report types.

use pennywise_shared::YearMonth;
use pennywise_shared::types::CategoryId;
use rust_decimal::Decimal;
use serde::Serialize;

use super::saturating_sum;
use super::trend::Trend;
use crate::projection::Occurrence;

/// Totals for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    /// The month.
    pub month: YearMonth,
    /// Sum of income occurrences.
    pub total_income: Decimal,
    /// Sum of expense occurrences.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub balance: Decimal,
}

impl MonthlyTotals {
    /// Builds totals, deriving the balance.
    #[must_use]
    pub fn new(month: YearMonth, total_income: Decimal, total_expense: Decimal) -> Self {
        Self {
            month,
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
        }
    }
}

/// Aggregate over a window of months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    /// Per-month totals in window order.
    pub months: Vec<MonthlyTotals>,
    /// Mean monthly income, rounded to cents.
    pub average_income: Decimal,
    /// Mean monthly expense, rounded to cents.
    pub average_expense: Decimal,
    /// Direction of recent balances.
    pub trend: Trend,
}

impl BalanceReport {
    /// Sum of all monthly balances in the window.
    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        saturating_sum(self.months.iter().map(|m| m.balance))
    }
}

/// One slice of a category/source breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Category, or `None` for uncategorized occurrences.
    pub category_id: Option<CategoryId>,
    /// Sum of amounts.
    pub total: Decimal,
    /// Share of the breakdown total, in percent with 2 decimals.
    pub share_percent: Decimal,
    /// Palette color.
    pub color: String,
    /// Number of occurrences in the slice.
    pub occurrences: usize,
}

/// An occurrence with its "remaining in month" balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunningBalanceRow {
    /// The occurrence.
    pub occurrence: Occurrence,
    /// Signed sum of this row and every row after it.
    pub running_balance: Decimal,
}
