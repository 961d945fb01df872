//! Reference store implementations for Pennywise.
//!
//! This crate provides:
//! - `MemoryStore`, a concurrent in-memory store with failure injection
//! - `JsonFileStore`, a single JSON document persisted atomically
//!
//! Both implement the `EntryStore` and `ExclusionStore` traits from
//! `pennywise-core`, so one instance serves as both stores.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::{MemoryStore, StoreOp};
