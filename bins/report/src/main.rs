//! Pennywise report CLI
//!
//! Loads the JSON store and prints window summaries and month detail.

mod cli;
mod render;

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pennywise_core::balance::{BalanceAggregator, CategoryTotal, RunningBalanceRow};
use pennywise_core::editor::{OccurrenceEditor, OccurrenceRef};
use pennywise_core::entry::EntryKind;
use pennywise_core::projection::project;
use pennywise_core::store::{Snapshot, load_snapshot};
use pennywise_shared::{AppConfig, AppError, AppResult, YearMonth};
use pennywise_store::JsonFileStore;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pennywise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.store.clone() {
        config.store.path = path;
    }

    if let Err(err) = run(cli, config).await {
        error!(code = err.error_code(), error = %err, "Command failed");
        anyhow::bail!(err.user_message());
    }
    Ok(())
}

async fn run(cli: Cli, config: AppConfig) -> AppResult<()> {
    let store = Arc::new(JsonFileStore::open(&config.store.path).await?);
    info!(path = %store.path().display(), "Store opened");

    match cli.command {
        Command::Summary { end, months } => {
            let snapshot = load_snapshot(&*store, &*store, config.store.page_size).await?;
            let end = end.unwrap_or_else(|| YearMonth::from_date(chrono::Local::now().date_naive()));
            let window = YearMonth::window_ending(end, months.unwrap_or(config.report.window_months));
            let report = BalanceAggregator::aggregate(&snapshot.entries, &snapshot.exclusions, &window);

            if cli.json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", render::summary(&report));
            }
        }
        Command::Month { month } => {
            let snapshot = load_snapshot(&*store, &*store, config.store.page_size).await?;
            let palette = config.report.palette();
            let (rows, breakdowns) = month_detail(&snapshot, month, &palette);

            if cli.json {
                let body = serde_json::json!({
                    "month": month,
                    "rows": rows,
                    "breakdowns": breakdowns
                        .iter()
                        .map(|(kind, slices)| serde_json::json!({ "kind": kind, "categories": slices }))
                        .collect::<Vec<_>>(),
                });
                println!("{}", to_json(&body)?);
            } else {
                print!("{}", render::month(month, &rows, &breakdowns));
            }
        }
        Command::Skip { entry, kind, month } => {
            let editor = OccurrenceEditor::new(store.clone(), store.clone())
                .with_config(config.editor.clone())
                .with_page_size(config.store.page_size);
            let exclusion = editor
                .delete_this_month(OccurrenceRef::new(entry, kind.into(), month))
                .await?;
            println!("Hidden {entry} in {month} ({})", exclusion.id);
        }
        Command::Restore { entry, kind, month } => {
            let editor = OccurrenceEditor::new(store.clone(), store.clone())
                .with_config(config.editor.clone())
                .with_page_size(config.store.page_size);
            let outcome = editor
                .restore_this_month(OccurrenceRef::new(entry, kind.into(), month))
                .await?;
            println!(
                "Restored {entry} in {month}: {} exclusion(s), {} replacement(s) removed",
                outcome.removed_exclusions,
                outcome.removed_replacements.len()
            );
        }
    }

    Ok(())
}

/// Occurrences of `month`, newest first with running balance, and the
/// category breakdown of each kind.
fn month_detail(
    snapshot: &Snapshot,
    month: YearMonth,
    palette: &[String],
) -> (Vec<RunningBalanceRow>, Vec<(EntryKind, Vec<CategoryTotal>)>) {
    let mut occurrences = project(&snapshot.entries, &snapshot.exclusions, month);
    BalanceAggregator::sort_newest_first(&mut occurrences);
    let rows = BalanceAggregator::running_balance(&occurrences);

    let breakdowns = EntryKind::ALL
        .into_iter()
        .map(|kind| {
            let of_kind: Vec<_> = occurrences.iter().filter(|o| o.kind == kind).cloned().collect();
            (kind, BalanceAggregator::category_breakdown(&of_kind, palette))
        })
        .collect();

    (rows, breakdowns)
}

fn to_json(value: &impl serde::Serialize) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Internal(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pennywise_core::entry::{Exclusion, NewEntry};
    use pennywise_shared::types::{CategoryId, EntryId};
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_month_detail_sorts_and_splits_by_kind() {
        let housing = CategoryId::new();
        let rent = NewEntry::monthly(EntryKind::Expense, "Rent", dec!(900), date(2024, 1, 1))
            .with_category(housing)
            .into_entry(EntryId::new());
        let gym = NewEntry::monthly(EntryKind::Expense, "Gym", dec!(40), date(2024, 1, 20))
            .into_entry(EntryId::new());
        let salary = NewEntry::monthly(EntryKind::Income, "Salary", dec!(3000), date(2024, 1, 25))
            .into_entry(EntryId::new());
        let march = YearMonth::new(2024, 3).unwrap();
        let snapshot = Snapshot {
            exclusions: vec![Exclusion::new(gym.id, march)],
            entries: vec![rent, gym, salary],
        };

        let (rows, breakdowns) = month_detail(&snapshot, march, &[]);

        let names: Vec<&str> = rows.iter().map(|r| r.occurrence.name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Rent"]);
        assert_eq!(rows[0].running_balance, dec!(2100));
        assert_eq!(rows[1].running_balance, dec!(-900));

        assert_eq!(breakdowns.len(), 2);
        let expenses = &breakdowns
            .iter()
            .find(|(kind, _)| *kind == EntryKind::Expense)
            .unwrap()
            .1;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category_id, Some(housing));
    }
}
