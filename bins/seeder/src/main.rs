//! Demo data seeder for Pennywise development.
//!
//! Seeds recurring and one-off entries into the JSON store, then forks and
//! hides a few occurrences through the editor so every report has something
//! to show.
//!
//! Usage: cargo run --bin seeder -- --reset

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pennywise_core::editor::{OccurrenceEdit, OccurrenceEditor, OccurrenceRef};
use pennywise_core::entry::{EntryKind, NewEntry};
use pennywise_core::store::EntryStore;
use pennywise_shared::types::CategoryId;
use pennywise_shared::{AppConfig, YearMonth};
use pennywise_store::JsonFileStore;

#[derive(Parser)]
#[command(name = "seeder", about = "Seeds demo entries into the Pennywise JSON store")]
struct Args {
    /// Store path (defaults to store.path from configuration)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Year the demo data starts in (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Delete the existing store file first
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pennywise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::load()?;
    let path = args.path.unwrap_or(config.store.path);
    let year = args
        .year
        .unwrap_or_else(|| chrono::Local::now().date_naive().year());

    if args.reset && path.exists() {
        std::fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        info!(path = %path.display(), "Removed existing store");
    }

    let store = Arc::new(JsonFileStore::open(&path).await?);
    let editor = OccurrenceEditor::new(store.clone(), store.clone())
        .with_config(config.editor)
        .with_page_size(config.store.page_size);

    info!(year, "Seeding entries...");
    seed(&store, &editor, year).await?;
    info!(path = %path.display(), "Seeding complete!");

    Ok(())
}

fn day(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid demo date {year}-{month}-{day}"))
}

fn month(year: i32, month: u32) -> anyhow::Result<YearMonth> {
    Ok(YearMonth::new(year, month)?)
}

async fn seed(store: &JsonFileStore, editor: &OccurrenceEditor, year: i32) -> anyhow::Result<()> {
    let housing = CategoryId::new();
    let food = CategoryId::new();
    let health = CategoryId::new();
    let employer = CategoryId::new();
    let side_work = CategoryId::new();

    let salary = store
        .create_entry(
            NewEntry::monthly(EntryKind::Income, "Salary", Decimal::new(320_000, 2), day(year, 1, 25)?)
                .with_category(employer),
        )
        .await?;
    store
        .create_entry(
            NewEntry::one_off(EntryKind::Income, "Logo design", Decimal::new(45_000, 2), day(year, 2, 14)?)
                .with_category(side_work),
        )
        .await?;

    let rent = store
        .create_entry(
            NewEntry::monthly(EntryKind::Expense, "Rent", Decimal::new(120_000, 2), day(year, 1, 1)?)
                .with_category(housing),
        )
        .await?;
    let gym = store
        .create_entry(
            NewEntry::monthly(EntryKind::Expense, "Gym", Decimal::new(4_500, 2), day(year, 1, 31)?)
                .with_category(health)
                .until(day(year, 6, 1)?),
        )
        .await?;
    for (m, amount) in [(1, 31_240), (2, 28_715), (3, 34_190)] {
        store
            .create_entry(
                NewEntry::one_off(EntryKind::Expense, "Groceries", Decimal::new(amount, 2), day(year, m, 9)?)
                    .with_category(food),
            )
            .await?;
    }

    // Rent was discounted once.
    let march = month(year, 3)?;
    editor
        .edit_this_month(
            OccurrenceRef::new(rent.id, EntryKind::Expense, march),
            OccurrenceEdit {
                name: "Rent (discounted)".into(),
                amount: Decimal::new(110_000, 2),
                category_id: Some(housing),
                date: day(year, 3, 1)?,
            },
        )
        .await?;

    // Gym closed for a month, and a bonus month of salary.
    editor
        .delete_this_month(OccurrenceRef::new(gym.id, EntryKind::Expense, month(year, 4)?))
        .await?;
    editor
        .edit_this_month(
            OccurrenceRef::new(salary.id, EntryKind::Income, month(year, 6)?),
            OccurrenceEdit {
                name: "Salary + bonus".into(),
                amount: Decimal::new(400_000, 2),
                category_id: Some(employer),
                date: day(year, 6, 25)?,
            },
        )
        .await?;

    Ok(())
}
