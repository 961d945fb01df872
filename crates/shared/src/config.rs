//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Colors assigned to category breakdown slices, cycled by first appearance.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948", "#B07AA1", "#FF9DA7",
    "#9C755F", "#BAB0AC",
];

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Report configuration.
    #[serde(default)]
    pub report: ReportConfig,
    /// Projection cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Occurrence editor configuration.
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON document backing the file store.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Page size used when walking paginated entry listings.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/pennywise.json")
}

fn default_page_size() -> u32 {
    50
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            page_size: default_page_size(),
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of months in the summary window.
    #[serde(default = "default_window_months")]
    pub window_months: u32,
    /// Category breakdown palette. Empty means [`DEFAULT_PALETTE`].
    #[serde(default)]
    pub palette: Vec<String>,
}

fn default_window_months() -> u32 {
    6
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_months: default_window_months(),
            palette: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// The configured palette, falling back to [`DEFAULT_PALETTE`].
    #[must_use]
    pub fn palette(&self) -> Vec<String> {
        if self.palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect()
        } else {
            self.palette.clone()
        }
    }
}

/// Projection cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached month projections.
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    /// Time-to-live in seconds for each cached projection.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_cache_capacity() -> u64 {
    256
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

/// Occurrence editor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Delete the exclusion a fork created when its replacement entry fails.
    #[serde(default = "default_compensate")]
    pub compensate_partial_failure: bool,
}

fn default_compensate() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            compensate_partial_failure: default_compensate(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `PENNYWISE__SECTION__KEY` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PENNYWISE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = temp_env::with_vars_unset(
            [
                "PENNYWISE__REPORT__WINDOW_MONTHS",
                "PENNYWISE__STORE__PATH",
                "PENNYWISE__EDITOR__COMPENSATE_PARTIAL_FAILURE",
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.report.window_months, 6);
        assert_eq!(config.store.page_size, 50);
        assert_eq!(config.cache.ttl_secs, 300);
        assert!(config.editor.compensate_partial_failure);
    }

    #[test]
    fn test_environment_overrides() {
        let config = temp_env::with_vars(
            [
                ("PENNYWISE__REPORT__WINDOW_MONTHS", Some("12")),
                ("PENNYWISE__STORE__PATH", Some("/tmp/books.json")),
                ("PENNYWISE__EDITOR__COMPENSATE_PARTIAL_FAILURE", Some("false")),
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.report.window_months, 12);
        assert_eq!(config.store.path, PathBuf::from("/tmp/books.json"));
        assert!(!config.editor.compensate_partial_failure);
    }

    #[test]
    fn test_palette_falls_back_to_default() {
        let report = ReportConfig::default();
        assert_eq!(report.palette().len(), DEFAULT_PALETTE.len());

        let custom = ReportConfig {
            window_months: 3,
            palette: vec!["#000000".into()],
        };
        assert_eq!(custom.palette(), vec!["#000000".to_string()]);
    }
}
