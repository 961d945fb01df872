//! Occurrence editing.
//!
//! "This month" operations fork a single occurrence off a recurring entry by
//! recording an exclusion and, for edits, a one-off replacement entry. "All
//! months" operations change or remove the entry itself. The editor is the
//! only component that writes to the stores.

pub mod error;
pub mod service;
pub mod types;


pub use error::EditorError;
pub use service::OccurrenceEditor;
pub use types::{DeleteOutcome, ForkOutcome, OccurrenceEdit, OccurrenceRef, RestoreOutcome};
