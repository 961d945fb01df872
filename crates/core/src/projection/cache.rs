//! Projection result caching using Moka.
//!
//! Month projections are keyed by a SHA-256 fingerprint of every input that
//! can change the output, so an edited entry or a new exclusion naturally
//! misses the cache.

use chrono::NaiveDate;
use moka::sync::Cache;
use pennywise_shared::YearMonth;
use pennywise_shared::config::CacheConfig;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::projector::{Occurrence, Projector};
use crate::entry::{Entry, Exclusion};

/// A month projection, possibly served from cache.
#[derive(Debug, Clone)]
pub struct ProjectionResult {
    /// The projected month.
    pub month: YearMonth,
    /// Occurrences in input order.
    pub occurrences: Arc<Vec<Occurrence>>,
    /// Fingerprint of the inputs.
    pub input_hash: String,
    /// True if this result was served from cache.
    pub cached: bool,
}

/// Thread-safe cache of month projections.
#[derive(Clone)]
pub struct ProjectionCache {
    cache: Cache<String, Arc<Vec<Occurrence>>>,
}

impl ProjectionCache {
    /// Creates a cache with the default settings (256 months, 5 minute TTL).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    /// Creates a cache from configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Creates a cache with explicit capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Projects `month`, returning a cached result when the inputs are unchanged.
    #[must_use]
    pub fn project_cached(
        &self,
        entries: &[Entry],
        exclusions: &[Exclusion],
        month: YearMonth,
    ) -> ProjectionResult {
        let input_hash = fingerprint(entries, exclusions, month);

        if let Some(occurrences) = self.cache.get(&input_hash) {
            debug!(%month, hash = %input_hash, "Projection cache hit");
            return ProjectionResult {
                month,
                occurrences,
                input_hash,
                cached: true,
            };
        }

        let occurrences = Arc::new(Projector::new(exclusions).project(entries, month));
        self.cache.insert(input_hash.clone(), Arc::clone(&occurrences));

        ProjectionResult {
            month,
            occurrences,
            input_hash,
            cached: false,
        }
    }

    /// Invalidates all cached projections.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of cached projections.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending cache maintenance (evictions, count updates).
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-256 over the projection-relevant fields of the inputs, hex encoded.
#[must_use]
pub fn fingerprint(entries: &[Entry], exclusions: &[Exclusion], month: YearMonth) -> String {
    let mut hasher = Sha256::new();
    hasher.update(month.to_iso_key().as_bytes());

    for entry in entries {
        hasher.update(b"E");
        hasher.update(entry.id.as_bytes());
        hasher.update(entry.kind.as_str().as_bytes());
        hasher.update(entry.amount.serialize());
        hasher.update((entry.name.len() as u64).to_le_bytes());
        hasher.update(entry.name.as_bytes());
        match entry.category_id {
            Some(category_id) => hasher.update(category_id.as_bytes()),
            None => hasher.update([0u8]),
        }
        update_date(&mut hasher, Some(entry.date));
        update_date(&mut hasher, entry.end_date);
        hasher.update([u8::from(entry.recurring)]);
    }

    for exclusion in exclusions {
        hasher.update(b"X");
        hasher.update(exclusion.entry_id.as_bytes());
        hasher.update(exclusion.excluded_month.to_iso_key().as_bytes());
    }

    format!("{:x}", hasher.finalize())
}

fn update_date(hasher: &mut Sha256, date: Option<NaiveDate>) {
    match date {
        Some(date) => hasher.update(date.to_string().as_bytes()),
        None => hasher.update(b"-"),
    }
}
