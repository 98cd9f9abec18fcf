use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::branch::error::ConfigError;

// =============================================================================
// Source-related constants
// =============================================================================

/// Default base URL of the repository database API
pub const DEFAULT_BASE_URL: &str = "https://rdb.altlinux.org/api";

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Stable branch compared against the development branch
pub const STABLE_BRANCH: &str = "p11";

/// Development branch
pub const DEVEL_BRANCH: &str = "sisyphus";

/// Tool configuration structure, loaded from a JSON file
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CompareConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

/// Where branch package lists come from
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    /// Base URL of the export API
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout: u64,
    /// Read snapshots from `snapshot_dir` instead of the network
    pub offline: bool,
    /// Write fetched exports into `snapshot_dir`
    pub save_snapshots: bool,
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: FETCH_TIMEOUT_MS,
            offline: false,
            save_snapshots: false,
            snapshot_dir: None,
        }
    }
}

impl SourceConfig {
    /// Snapshot directory, falling back to the data directory
    pub fn snapshot_dir(&self) -> PathBuf {
        self.snapshot_dir.clone().unwrap_or_else(data_dir)
    }
}

/// Where reports are written
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl CompareConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the data directory for branch-compare.
/// Uses $XDG_DATA_HOME/branch-compare if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/branch-compare,
/// or ./branch-compare if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default path of the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("branch-compare.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("branch-compare")
}
