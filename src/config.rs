//! Source-path configuration.

use std::path::PathBuf;

/// Source loaded when nothing else is configured.
pub const DEFAULT_SOURCE_PATH: &str = "Refined and Cleansed_Supply_Chain_Data.csv";

/// Environment variable that overrides [`DEFAULT_SOURCE_PATH`].
pub const SOURCE_ENV_VAR: &str = "SUPPLY_DASHBOARD_SOURCE";

/// Dashboard configuration: which source to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
        }
    }
}

impl DashboardConfig {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
        }
    }

    /// Default configuration, with the source taken from [`SOURCE_ENV_VAR`] when set and
    /// non-empty.
    pub fn from_env() -> Self {
        Self::from_source_var(std::env::var(SOURCE_ENV_VAR).ok())
    }

    fn from_source_var(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self::new(v.trim()),
            _ => Self::default(),
        }
    }
}
