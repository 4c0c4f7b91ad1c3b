//! Where cached assets live, and how catalogs refer to them

use std::path::{Path, PathBuf};

use crate::error::CatalogError;

const ASSET_EXTENSION: &str = "png";

/// One asset directory under the working root.
///
/// Catalogs store the root-relative form (`club_logos/<id>.png`, always
/// `/`-separated); downloads go to the absolute destination.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
    dir: String,
}

impl AssetLayout {
    pub fn new(root: &Path, dir: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            dir: dir.trim_end_matches('/').to_string(),
        }
    }

    /// Catalog value for the asset named `stem`
    pub fn catalog_path(&self, stem: &str) -> String {
        format!("{}/{stem}.{ASSET_EXTENSION}", self.dir)
    }

    /// On-disk destination for the asset named `stem`
    pub fn dest(&self, stem: &str) -> PathBuf {
        self.dir_path().join(format!("{stem}.{ASSET_EXTENSION}"))
    }

    /// Resolve a root-relative catalog value to a filesystem path
    pub fn resolve(&self, catalog_path: &str) -> PathBuf {
        self.root.join(catalog_path)
    }

    pub fn dir_path(&self) -> PathBuf {
        self.root.join(&self.dir)
    }

    pub fn create_dir(&self) -> Result<(), CatalogError> {
        let dir = self.dir_path();
        std::fs::create_dir_all(&dir).map_err(|e| CatalogError::io(dir, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_path_is_root_relative() {
        let layout = AssetLayout::new(Path::new("/data"), "club_logos");
        assert_eq!(layout.catalog_path("team_0001"), "club_logos/team_0001.png");
        assert_eq!(
            layout.dest("team_0001"),
            PathBuf::from("/data/club_logos/team_0001.png")
        );
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let layout = AssetLayout::new(Path::new("."), "player_images/");
        assert_eq!(layout.catalog_path("158023"), "player_images/158023.png");
    }

    #[test]
    fn resolve_joins_root() {
        let layout = AssetLayout::new(Path::new("/data"), "club_logos");
        assert_eq!(
            layout.resolve("club_logos/x.png"),
            PathBuf::from("/data/club_logos/x.png")
        );
    }

    #[test]
    fn create_dir_is_idempotent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let layout = AssetLayout::new(tmp.path(), "club_logos");
        layout.create_dir().unwrap();
        layout.create_dir().unwrap();
        assert!(tmp.path().join("club_logos").is_dir());
    }
}
