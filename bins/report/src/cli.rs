//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pennywise_core::entry::EntryKind;
use pennywise_shared::YearMonth;
use pennywise_shared::types::EntryId;

#[derive(Parser)]
#[command(
    name = "pennywise",
    version,
    about = "Monthly reports over recurring expenses and income",
    long_about = "Projects recurring and one-off entries into calendar months and \
                  prints balances, running totals and category breakdowns."
)]
pub struct Cli {
    /// Path of the JSON store (overrides PENNYWISE__STORE__PATH)
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Income, expense and balance for a window of months
    Summary {
        /// Last month of the window (YYYY-MM or MM-YYYY); defaults to the current month
        #[arg(short, long)]
        end: Option<YearMonth>,
        /// Number of months in the window (defaults to report.window_months)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Occurrences of one month with running balance and breakdown
    Month {
        /// The month (YYYY-MM or MM-YYYY)
        month: YearMonth,
    },

    /// Hide one occurrence of a recurring entry
    Skip {
        /// Entry id
        entry: EntryId,
        /// Entry kind
        #[arg(value_enum)]
        kind: KindArg,
        /// The month to hide
        month: YearMonth,
    },

    /// Bring back a hidden or edited occurrence
    Restore {
        /// Entry id
        entry: EntryId,
        /// Entry kind
        #[arg(value_enum)]
        kind: KindArg,
        /// The month to restore
        month: YearMonth,
    },
}

/// Entry kind as typed on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Expense entry
    Expense,
    /// Income entry
    Income,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Expense => Self::Expense,
            KindArg::Income => Self::Income,
        }
    }
}
