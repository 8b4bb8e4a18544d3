//! Configuration loading for luxe-catalog.

use std::path::PathBuf;
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use tracing::debug;

use crate::history::DEFAULT_HISTORY_CAP;
use crate::search::DEFAULT_INSTANT_LIMIT;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "LUXE_CONFIG";

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the product catalog comes from.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in sample catalog is used when unset.
    pub path: Option<String>,
}

/// Search tuning.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_instant_limit")]
    pub instant_limit: usize,
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
}

/// Client-local state location.
#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory for recent searches and other local state.
    pub dir: Option<String>,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_instant_limit() -> usize {
    DEFAULT_INSTANT_LIMIT
}

fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            instant_limit: default_instant_limit(),
            history_cap: default_history_cap(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Load config from `$LUXE_CONFIG` or ~/.config/luxe-catalog/config.toml,
    /// or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            debug!(path = %path.display(), "Loading config");
            let contents = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            return Ok(config);
        }

        Ok(Config::default())
    }

    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("", "", "luxe-catalog").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Catalog file, if configured.
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_deref().map(expand_tilde)
    }

    /// Directory for local state, defaulting to the platform data dir.
    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.as_deref().map_or_else(
            || {
                ProjectDirs::from("", "", "luxe-catalog")
                    .map_or_else(|| PathBuf::from(".luxe"), |dirs| dirs.data_dir().to_path_buf())
            },
            expand_tilde,
        )
    }
}

/// Expand ~ to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(rest);
    }
    PathBuf::from(path)
}
