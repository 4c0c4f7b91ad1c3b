//! URL harvest from the player catalog

use rustc_hash::FxHashMap;

use crate::matcher::ClubIndex;
use crate::record::{AssetId, Player};

/// Lookup tables built once from the player catalog; read-only afterwards.
///
/// This is the only link between the two catalogs: teams carry no URL, so
/// their logos are found by matching team names against `clubs`.
#[derive(Debug, Clone, Default)]
pub struct UrlIndex {
    clubs: ClubIndex,
    faces: FxHashMap<AssetId, String>,
}

impl UrlIndex {
    /// Scan `players` once, in catalog order.
    ///
    /// Club logos: first URL seen for a club name wins. Faces: a repeated
    /// player id keeps the last URL seen.
    pub fn harvest(players: &[Player]) -> Self {
        let mut index = Self::default();
        for player in players {
            if let (Some(id), Some(url)) = (player.id(), player.face_url()) {
                index.faces.insert(id, url.to_string());
            }
            if let (Some(club), Some(url)) = (player.club_name(), player.club_logo_url()) {
                index.clubs.insert(club, url);
            }
        }
        index
    }

    pub fn clubs(&self) -> &ClubIndex {
        &self.clubs
    }

    pub fn face_url(&self, id: &AssetId) -> Option<&str> {
        self.faces.get(id).map(String::as_str)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}
