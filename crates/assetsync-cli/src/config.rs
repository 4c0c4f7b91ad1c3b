//! Configuration loading from TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use assetsync_core::{DEFAULT_USER_AGENT, FetchConfig};
use serde::Deserialize;

const LOCAL_CONFIG: &str = "assetsync.toml";

/// Settings file for assetsync
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub fetch: FetchSection,
    pub paths: PathsSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSection {
    pub workers: usize,
    pub retries: u32,
    pub retry_wait_ms: u64,
    pub request_timeout_secs: u64,
    pub min_valid_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSection {
    fn default() -> Self {
        let defaults = FetchConfig::default();
        Self {
            workers: defaults.workers,
            retries: defaults.retries,
            retry_wait_ms: defaults.retry_wait.as_millis() as u64,
            request_timeout_secs: defaults.request_timeout.as_secs(),
            min_valid_bytes: defaults.min_valid_bytes,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Catalog and asset locations, relative to the working directory
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    pub players: PathBuf,
    pub teams: PathBuf,
    pub logo_dir: String,
    pub face_dir: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        let defaults = assetsync_catalog::Config::default();
        Self {
            players: defaults.players_file,
            teams: defaults.teams_file,
            logo_dir: defaults.logo_dir,
            face_dir: defaults.face_dir,
        }
    }
}

impl FileConfig {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. `<dir>/assetsync.toml`
    /// 2. ~/.config/assetsync/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load(dir: &Path) -> Result<Self> {
        let local_config = dir.join(LOCAL_CONFIG);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "assetsync") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Effective run configuration for the working directory `root`
    pub fn into_sync_config(self, root: PathBuf) -> assetsync_catalog::Config {
        let fetch = FetchConfig {
            workers: self.fetch.workers.max(1),
            retries: self.fetch.retries.max(1),
            retry_wait: Duration::from_millis(self.fetch.retry_wait_ms),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            min_valid_bytes: self.fetch.min_valid_bytes,
            user_agent: self.fetch.user_agent,
        };
        assetsync_catalog::Config {
            root,
            players_file: self.paths.players,
            teams_file: self.paths.teams,
            logo_dir: self.paths.logo_dir,
            face_dir: self.paths.face_dir,
            fetch,
        }
    }
}
