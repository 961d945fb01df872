//! Expense and income entries and their per-month exclusions.
//!
//! This module contains:
//! - Entry, exclusion and fork-origin types
//! - Creation inputs and partial updates
//! - Validation rules applied before anything is written
//! - Lenient decoding of persisted records

pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use error::EntryError;
pub use record::{EntryRecord, ExclusionRecord, coerce_amount, parse_record_date};
pub use types::{Entry, EntryKind, EntryPatch, Exclusion, ForkOrigin, NewEntry};
pub use validation::{MAX_AMOUNT, validate_entry, validate_new_entry};
