//! Store interfaces for entries and exclusions.
//!
//! The engine never talks to a database directly. Implementations live in
//! `pennywise-store`; tests use the `mockall` mocks generated here.

pub mod error;
pub mod snapshot;
pub mod traits;

pub use error::StoreError;
pub use snapshot::{Snapshot, fetch_all_entries, load_snapshot};
pub use traits::{EntryStore, ExclusionStore};

#[cfg(test)]
pub use traits::{MockEntryStore, MockExclusionStore};
