//! Shared types, errors, and configuration for Pennywise.
//!
//! This crate provides common types used across all other crates:
//! - `YearMonth`, the unit of recurrence comparison, and its month-key codecs
//! - Typed IDs for type-safe entity references
//! - Pagination types for list operations
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::YearMonth;
