use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Routing engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Wall-clock budget for one path search, in milliseconds.
    #[serde(default = "default_search_timeout_ms")]
    pub search_timeout_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            search_timeout_ms: default_search_timeout_ms(),
        }
    }
}

fn default_search_timeout_ms() -> u64 {
    600_000 // 10 minutes
}

impl RouterConfig {
    /// The search deadline as a duration.
    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    /// Sets the search timeout in milliseconds.
    pub fn with_search_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.search_timeout_ms = timeout_ms;
        self
    }
}

/// On-disk cache locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Declared-format cache file.
    #[serde(default = "default_format_cache_path")]
    pub format_cache_path: PathBuf,
    /// Known-good path store file.
    #[serde(default = "default_path_store_path")]
    pub path_store_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            format_cache_path: default_format_cache_path(),
            path_store_path: default_path_store_path(),
        }
    }
}

fn default_format_cache_path() -> PathBuf {
    PathBuf::from("convoy-formats.json")
}

fn default_path_store_path() -> PathBuf {
    PathBuf::from("convoy-paths.json")
}
