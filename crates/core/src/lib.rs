//! Core engine for Pennywise.
//!
//! This crate contains the recurring-entry projection engine with ZERO
//! storage or presentation dependencies. Stores are reached only through the
//! async traits in [`store`].
//!
//! # Modules
//!
//! - `entry` - Entries, exclusions, validation and lenient record decoding
//! - `projection` - The monthly projection rule and its cache
//! - `balance` - Monthly totals, running balances, breakdowns and trend
//! - `store` - Store traits and snapshot loading
//! - `editor` - "This month" / "all months" edits and deletions

pub mod balance;
pub mod editor;
pub mod entry;
pub mod projection;
pub mod store;

pub use balance::{BalanceAggregator, BalanceReport, MonthlyTotals, Trend};
pub use editor::{EditorError, OccurrenceEdit, OccurrenceEditor, OccurrenceRef};
pub use entry::{Entry, EntryKind, EntryPatch, Exclusion, NewEntry};
pub use projection::{Occurrence, ProjectionCache, Projector, project};
pub use store::{EntryStore, ExclusionStore, Snapshot, StoreError, load_snapshot};
