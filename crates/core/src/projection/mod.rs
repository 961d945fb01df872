//! Projection of recurring entries into calendar months.
//!
//! A recurring entry never materializes its months. Each month is derived on
//! demand from the entry, the target month and the exclusion list:
//!
//! - one-offs appear only in the month of their date;
//! - recurring entries appear from their start month through their end month;
//! - an exclusion for the entry and month suppresses that single occurrence.

pub mod cache;
pub mod projector;

#[cfg(test)]
mod tests;

pub use cache::{ProjectionCache, ProjectionResult, fingerprint};
pub use projector::{ExclusionIndex, Occurrence, Projector, occurs_in, project, project_kind};
