//! Plain-text rendering of reports.

use std::fmt::Write;

use pennywise_core::balance::{BalanceReport, CategoryTotal, RunningBalanceRow};
use pennywise_core::entry::EntryKind;
use pennywise_shared::YearMonth;

/// Window summary table.
pub fn summary(report: &BalanceReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:>12} {:>12} {:>12}", "Month", "Income", "Expense", "Balance");
    for totals in &report.months {
        let _ = writeln!(
            out,
            "{:<8} {:>12.2} {:>12.2} {:>12.2}",
            totals.month.to_string(),
            totals.total_income,
            totals.total_expense,
            totals.balance
        );
    }
    let _ = writeln!(
        out,
        "{:<8} {:>12.2} {:>12.2}",
        "Average", report.average_income, report.average_expense
    );
    let _ = writeln!(out, "Net {:.2}, trend {}", report.net_balance(), report.trend);
    out
}

/// One month: occurrences with running balance, then per-kind breakdowns.
pub fn month(
    month: YearMonth,
    rows: &[RunningBalanceRow],
    breakdowns: &[(EntryKind, Vec<CategoryTotal>)],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{month}");

    if rows.is_empty() {
        let _ = writeln!(out, "  no occurrences");
    }
    for row in rows {
        let occurrence = &row.occurrence;
        let marker = if occurrence.recurring { "*" } else { " " };
        let _ = writeln!(
            out,
            "  {} {}{:<24} {:>7} {:>10.2} {:>12.2}",
            occurrence.date,
            marker,
            occurrence.name,
            occurrence.kind.as_str(),
            occurrence.signed_amount(),
            row.running_balance
        );
    }

    for (kind, slices) in breakdowns {
        if slices.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{kind} by category");
        for slice in slices {
            let category = slice
                .category_id
                .map_or_else(|| "uncategorized".to_string(), |id| id.to_string());
            let _ = writeln!(
                out,
                "  {} {:<36} {:>10.2} {:>6.2}%",
                slice.color, category, slice.total, slice.share_percent
            );
        }
    }
    out
}
