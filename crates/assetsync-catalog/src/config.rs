//! Sync run configuration

use std::path::PathBuf;

use assetsync_core::FetchConfig;

use crate::layout::AssetLayout;

/// Runtime configuration for one sync run
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the catalogs and asset directories
    pub root: PathBuf,
    /// Player catalog, relative to `root`
    pub players_file: PathBuf,
    /// Team catalog, relative to `root`
    pub teams_file: PathBuf,
    /// Team logo directory, relative to `root`
    pub logo_dir: String,
    /// Player face directory, relative to `root`
    pub face_dir: String,
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            players_file: PathBuf::from("players.json"),
            teams_file: PathBuf::from("teams.json"),
            logo_dir: "club_logos".to_string(),
            face_dir: "player_images".to_string(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    pub fn players_path(&self) -> PathBuf {
        self.root.join(&self.players_file)
    }

    pub fn teams_path(&self) -> PathBuf {
        self.root.join(&self.teams_file)
    }

    pub fn logo_layout(&self) -> AssetLayout {
        AssetLayout::new(&self.root, &self.logo_dir)
    }

    pub fn face_layout(&self) -> AssetLayout {
        AssetLayout::new(&self.root, &self.face_dir)
    }
}
