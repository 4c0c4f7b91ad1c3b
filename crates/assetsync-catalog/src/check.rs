//! Read-only consistency check between catalogs and cached assets

use assetsync_core::is_cached;

use crate::catalog::{load_catalog, require};
use crate::config::Config;
use crate::error::CatalogError;
use crate::layout::AssetLayout;
use crate::record::{Player, Team};

/// Local asset references of one class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCheck {
    /// Records pointing at a local asset
    pub referenced: usize,
    /// References resolving to a valid cached file
    pub present: usize,
    /// Records with no asset (`""` logo or no face path)
    pub without_asset: usize,
    /// References whose file is missing or undersized
    pub dangling: Vec<String>,
}

impl ClassCheck {
    fn observe(&mut self, layout: &AssetLayout, path: Option<&str>, min_valid_bytes: u64) {
        match path.filter(|p| !p.is_empty()) {
            None => self.without_asset += 1,
            Some(p) => {
                self.referenced += 1;
                if is_cached(&layout.resolve(p), min_valid_bytes) {
                    self.present += 1;
                } else {
                    self.dangling.push(p.to_string());
                }
            }
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.dangling.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub logos: ClassCheck,
    pub faces: ClassCheck,
}

impl CheckReport {
    pub fn is_consistent(&self) -> bool {
        self.logos.is_consistent() && self.faces.is_consistent()
    }
}

/// Report catalog references to assets that are not (validly) on disk.
///
/// These are left behind by failed downloads; `sync` retries them.
pub fn check(config: &Config) -> Result<CheckReport, CatalogError> {
    let players_path = config.players_path();
    let teams_path = config.teams_path();
    require(&players_path)?;
    require(&teams_path)?;

    let players: Vec<Player> = load_catalog(&players_path)?;
    let teams: Vec<Team> = load_catalog(&teams_path)?;
    let min_valid_bytes = config.fetch.min_valid_bytes;

    let mut report = CheckReport::default();
    let logo_layout = config.logo_layout();
    for team in &teams {
        report
            .logos
            .observe(&logo_layout, team.logo_asset_path(), min_valid_bytes);
    }
    let face_layout = config.face_layout();
    for player in &players {
        report
            .faces
            .observe(&face_layout, player.face_asset_path(), min_valid_bytes);
    }

    log::info!(
        "Logos: {}/{} present, Faces: {}/{} present",
        report.logos.present,
        report.logos.referenced,
        report.faces.present,
        report.faces.referenced
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_dangling_references() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("club_logos")).unwrap();
        std::fs::write(root.join("club_logos/t1.png"), vec![0u8; 200]).unwrap();
        std::fs::write(
            root.join("teams.json"),
            r#"[
                {"team_id": "t1", "team_name": "Arsenal", "club_logo_url": "club_logos/t1.png"},
                {"team_id": "t2", "team_name": "Chelsea", "club_logo_url": "club_logos/t2.png"},
                {"team_id": "t3", "team_name": "Nowhere FC", "club_logo_url": ""}
            ]"#,
        )
        .unwrap();
        std::fs::write(
            root.join("players.json"),
            r#"[{"player_id": 1, "media": {"face_asset_path": "player_images/1.png"}}, {"player_id": 2}]"#,
        )
        .unwrap();

        let config = Config {
            root: root.to_path_buf(),
            ..Default::default()
        };
        let report = check(&config).unwrap();

        assert_eq!(report.logos.referenced, 2);
        assert_eq!(report.logos.present, 1);
        assert_eq!(report.logos.without_asset, 1);
        assert_eq!(report.logos.dangling, vec!["club_logos/t2.png".to_string()]);
        assert_eq!(report.faces.dangling, vec!["player_images/1.png".to_string()]);
        assert_eq!(report.faces.without_asset, 1);
        assert!(!report.is_consistent());
    }

    #[test]
    fn missing_catalog_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(matches!(check(&config), Err(CatalogError::Missing(_))));
    }
}
