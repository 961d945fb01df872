//! Balance aggregator.
//!
//! Stateless: every function derives its result from projected occurrences
//! and never mutates its inputs. Window aggregation fans months out over the
//! rayon thread pool.

use pennywise_shared::YearMonth;
use pennywise_shared::config::DEFAULT_PALETTE;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use super::saturating_sum;
use super::trend::Trend;
use super::types::{BalanceReport, CategoryTotal, MonthlyTotals, RunningBalanceRow};
use crate::entry::{Entry, EntryKind, Exclusion};
use crate::projection::{Occurrence, Projector};

/// Derives totals, balances and breakdowns from projections.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Income, expense and balance for one month.
    #[must_use]
    pub fn monthly_totals(
        entries: &[Entry],
        exclusions: &[Exclusion],
        month: YearMonth,
    ) -> MonthlyTotals {
        Self::totals_with(&Projector::new(exclusions), entries, month)
    }

    /// Per-month totals for `window` plus averages and trend.
    ///
    /// Months are returned in window order regardless of how the work was
    /// scheduled. Averages are zero for an empty window.
    #[must_use]
    pub fn aggregate(
        entries: &[Entry],
        exclusions: &[Exclusion],
        window: &[YearMonth],
    ) -> BalanceReport {
        let projector = Projector::new(exclusions);

        let months: Vec<MonthlyTotals> = window
            .par_iter()
            .map(|month| Self::totals_with(&projector, entries, *month))
            .collect();

        let average_income = Self::average(months.iter().map(|m| m.total_income), months.len());
        let average_expense =
            Self::average(months.iter().map(|m| m.total_expense), months.len());
        let balances: Vec<Decimal> = months.iter().map(|m| m.balance).collect();
        let trend = Trend::classify(&balances);

        debug!(
            months = months.len(),
            entries = entries.len(),
            exclusions = exclusions.len(),
            %trend,
            "Aggregated balance window"
        );

        BalanceReport {
            months,
            average_income,
            average_expense,
            trend,
        }
    }

    /// "Remaining in month" balances.
    ///
    /// Row `i` (0 being the most recent in input order) carries the signed sum
    /// of every row at index `i` or later. Income counts positive, expenses
    /// negative. Callers wanting a meaningful figure sort first, see
    /// [`Self::sort_newest_first`].
    #[must_use]
    pub fn running_balance(occurrences: &[Occurrence]) -> Vec<RunningBalanceRow> {
        let mut rows: Vec<RunningBalanceRow> = Vec::with_capacity(occurrences.len());
        let mut remaining = Decimal::ZERO;

        for occurrence in occurrences.iter().rev() {
            remaining = remaining.saturating_add(occurrence.signed_amount());
            rows.push(RunningBalanceRow {
                occurrence: occurrence.clone(),
                running_balance: remaining,
            });
        }

        rows.reverse();
        rows
    }

    /// Orders occurrences by display date, newest first. Ties keep input order.
    pub fn sort_newest_first(occurrences: &mut [Occurrence]) {
        occurrences.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Groups occurrences by category in first-seen order.
    ///
    /// Colors cycle through `palette` by first appearance; an empty palette
    /// means the default one.
    #[must_use]
    pub fn category_breakdown(occurrences: &[Occurrence], palette: &[String]) -> Vec<CategoryTotal> {
        let mut slices: Vec<CategoryTotal> = Vec::new();

        for occurrence in occurrences {
            if let Some(slice) = slices
                .iter_mut()
                .find(|s| s.category_id == occurrence.category_id)
            {
                slice.total = slice.total.saturating_add(occurrence.amount);
                slice.occurrences += 1;
            } else {
                let color = Self::palette_color(palette, slices.len());
                slices.push(CategoryTotal {
                    category_id: occurrence.category_id,
                    total: occurrence.amount,
                    share_percent: Decimal::ZERO,
                    color,
                    occurrences: 1,
                });
            }
        }

        let grand_total = saturating_sum(slices.iter().map(|s| s.total));
        if !grand_total.is_zero() {
            for slice in &mut slices {
                slice.share_percent = slice
                    .total
                    .checked_div(grand_total)
                    .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                    .unwrap_or(Decimal::ZERO)
                    .round_dp(2);
            }
        }

        slices
    }

    /// Totals of one kind of occurrence.
    #[must_use]
    pub fn total_of(occurrences: &[Occurrence], kind: EntryKind) -> Decimal {
        saturating_sum(
            occurrences
                .iter()
                .filter(|o| o.kind == kind)
                .map(|o| o.amount),
        )
    }

    fn totals_with(projector: &Projector, entries: &[Entry], month: YearMonth) -> MonthlyTotals {
        let income = projector.project_kind(entries, EntryKind::Income, month);
        let expense = projector.project_kind(entries, EntryKind::Expense, month);

        MonthlyTotals::new(
            month,
            Self::total_of(&income, EntryKind::Income),
            Self::total_of(&expense, EntryKind::Expense),
        )
    }

    fn average(values: impl Iterator<Item = Decimal>, count: usize) -> Decimal {
        if count == 0 {
            return Decimal::ZERO;
        }
        (saturating_sum(values) / Decimal::from(count)).round_dp(2)
    }

    fn palette_color(palette: &[String], index: usize) -> String {
        if palette.is_empty() {
            DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()].to_string()
        } else {
            palette[index % palette.len()].clone()
        }
    }
}
