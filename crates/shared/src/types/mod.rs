//! Common types used across the application.

pub mod id;
pub mod month;
pub mod pagination;

#[cfg(test)]
mod month_tests;
#[cfg(test)]
mod pagination_tests;

pub use id::*;
pub use month::{MonthKeyError, YearMonth};
pub use pagination::{PageMeta, PageRequest, PageResponse};
