//! Job planning: cache check, name matching and catalog patching
//!
//! Planning runs on the coordinating thread and is the only place catalog
//! records are modified. Paths are written optimistically, before the
//! download happens.

use std::path::PathBuf;

use assetsync_core::{Job, is_cached};
use rustc_hash::FxHashSet;

use crate::index::UrlIndex;
use crate::layout::AssetLayout;
use crate::record::{AssetId, Player, Team};

/// Planned logo downloads
#[derive(Debug, Default)]
pub struct TeamPlan {
    pub jobs: Vec<Job>,
    /// Teams whose logo is already on disk
    pub cached: usize,
    /// Names of teams no club matched; their logo path is `""`
    pub unmatched: Vec<String>,
    /// Teams missing an id or a name; left untouched
    pub skipped: usize,
}

impl TeamPlan {
    /// Teams that got a logo path (cached or scheduled)
    pub fn resolved(&self) -> usize {
        self.cached + self.jobs.len()
    }
}

/// Planned face downloads
#[derive(Debug, Default)]
pub struct PlayerPlan {
    pub jobs: Vec<Job>,
    /// Players whose face is already on disk
    pub cached: usize,
    /// Players with an id but no harvested face URL; left untouched
    pub no_url: usize,
    /// Players without a usable id; left untouched
    pub skipped: usize,
}

/// Remembers scheduled destinations so one file is never fetched twice
#[derive(Default)]
struct JobList {
    jobs: Vec<Job>,
    seen: FxHashSet<PathBuf>,
}

impl JobList {
    fn push(&mut self, url: &str, dest: PathBuf) {
        if self.seen.insert(dest.clone()) {
            self.jobs.push(Job::new(url, dest));
        }
    }
}

/// Resolve a logo for every team and set its logo path.
pub fn plan_teams(
    teams: &mut [Team],
    index: &UrlIndex,
    layout: &AssetLayout,
    min_valid_bytes: u64,
) -> TeamPlan {
    let mut plan = TeamPlan::default();
    let mut jobs = JobList::default();

    for team in teams.iter_mut() {
        let stem = team.id().as_ref().and_then(AssetId::file_stem);
        let (Some(stem), Some(name)) = (stem, team.name().map(str::to_string)) else {
            log::debug!("skipping team without id/name: {:?}", team.id());
            plan.skipped += 1;
            continue;
        };

        let dest = layout.dest(&stem);
        if is_cached(&dest, min_valid_bytes) {
            team.set_logo_asset_path(layout.catalog_path(&stem));
            plan.cached += 1;
            continue;
        }

        match index.clubs().resolve_tier(&name) {
            Some((url, tier)) => {
                log::debug!("{name}: {tier} match -> {url}");
                jobs.push(url, dest);
                team.set_logo_asset_path(layout.catalog_path(&stem));
            }
            None => {
                team.set_logo_asset_path(String::new());
                plan.unmatched.push(name);
            }
        }
    }

    plan.jobs = jobs.jobs;
    plan
}

/// Schedule a face download for every player with a harvested URL and
/// set `face_asset_path`.
pub fn plan_players(
    players: &mut [Player],
    index: &UrlIndex,
    layout: &AssetLayout,
    min_valid_bytes: u64,
) -> PlayerPlan {
    let mut plan = PlayerPlan::default();
    let mut jobs = JobList::default();

    for player in players.iter_mut() {
        let Some(id) = player.id() else {
            plan.skipped += 1;
            continue;
        };
        let Some(stem) = id.file_stem() else {
            log::debug!("skipping player with unusable id {id:?}");
            plan.skipped += 1;
            continue;
        };

        let dest = layout.dest(&stem);
        if is_cached(&dest, min_valid_bytes) {
            player.set_face_asset_path(layout.catalog_path(&stem));
            plan.cached += 1;
            continue;
        }

        let Some(url) = index.face_url(&id) else {
            plan.no_url += 1;
            continue;
        };
        jobs.push(url, dest);
        player.set_face_asset_path(layout.catalog_path(&stem));
    }

    plan.jobs = jobs.jobs;
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn index() -> UrlIndex {
        let players: Vec<Player> = serde_json::from_value(json!([
            { "player_id": 10, "club": { "name": "Arsenal" },
              "media": { "face_url": "F10", "club_logo_url": "U1" } },
            { "player_id": 11, "club": { "name": "FC Barcelona" },
              "media": { "face_url": "F11", "club_logo_url": "U2" } }
        ]))
        .unwrap();
        UrlIndex::harvest(&players)
    }

    fn teams(value: serde_json::Value) -> Vec<Team> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn matched_and_unmatched_teams() {
        let layout = AssetLayout::new(Path::new("/nonexistent"), "club_logos");
        let mut teams = teams(json!([
            { "team_id": "t1", "team_name": "Arsenal" },
            { "team_id": "t2", "team_name": "Nowhere FC" },
            { "team_id": "t3", "team_name": "barcelona" }
        ]));

        let plan = plan_teams(&mut teams, &index(), &layout, 100);

        assert_eq!(plan.jobs.len(), 2);
        assert_eq!(plan.jobs[0].url, "U1");
        assert_eq!(plan.jobs[0].dest, PathBuf::from("/nonexistent/club_logos/t1.png"));
        assert_eq!(plan.jobs[1].url, "U2");
        assert_eq!(plan.unmatched, vec!["Nowhere FC".to_string()]);
        assert_eq!(teams[0].logo_asset_path(), Some("club_logos/t1.png"));
        assert_eq!(teams[1].logo_asset_path(), Some(""));
        assert_eq!(teams[2].logo_asset_path(), Some("club_logos/t3.png"));
    }

    #[test]
    fn cached_logo_is_not_rescheduled() {
        let dir = TempDir::new().unwrap();
        let layout = AssetLayout::new(dir.path(), "club_logos");
        layout.create_dir().unwrap();
        std::fs::write(layout.dest("t1"), vec![0u8; 100]).unwrap();

        let mut teams = teams(json!([{ "team_id": "t1", "team_name": "Arsenal" }]));
        let plan = plan_teams(&mut teams, &index(), &layout, 100);

        assert!(plan.jobs.is_empty());
        assert_eq!(plan.cached, 1);
        assert_eq!(teams[0].logo_asset_path(), Some("club_logos/t1.png"));
    }

    #[test]
    fn undersized_cached_logo_is_refetched() {
        let dir = TempDir::new().unwrap();
        let layout = AssetLayout::new(dir.path(), "club_logos");
        layout.create_dir().unwrap();
        std::fs::write(layout.dest("t1"), b"").unwrap();

        let mut teams = teams(json!([{ "team_id": "t1", "team_name": "Arsenal" }]));
        let plan = plan_teams(&mut teams, &index(), &layout, 100);
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.cached, 0);
    }

    #[test]
    fn team_without_name_or_id_is_untouched() {
        let layout = AssetLayout::new(Path::new("/nonexistent"), "club_logos");
        let mut teams = teams(json!([
            { "team_id": "t1" },
            { "team_name": "Arsenal" },
            { "team_id": "t3", "team_name": "" }
        ]));

        let plan = plan_teams(&mut teams, &index(), &layout, 100);
        assert_eq!(plan.skipped, 3);
        assert!(plan.jobs.is_empty());
        assert!(teams.iter().all(|t| t.logo_asset_path().is_none()));
    }

    #[test]
    fn duplicate_team_ids_share_one_job() {
        let layout = AssetLayout::new(Path::new("/nonexistent"), "club_logos");
        let mut teams = teams(json!([
            { "team_id": "t1", "team_name": "Arsenal" },
            { "team_id": "t1", "team_name": "Arsenal" }
        ]));
        let plan = plan_teams(&mut teams, &index(), &layout, 100);
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.resolved(), 1);
    }

    #[test]
    fn odd_ids_are_skipped_among_valid_records() {
        let layout = AssetLayout::new(Path::new("/nonexistent"), "club_logos");
        let mut teams: Vec<Team> = serde_json::from_str(
            r#"[{"team_id": 1.5, "team_name": "Arsenal"},
                {"team_id": true, "team_name": "Arsenal"},
                {"team_id": "t1", "team_name": "Arsenal"}]"#,
        )
        .unwrap();
        let plan = plan_teams(&mut teams, &index(), &layout, 100);
        assert_eq!(plan.skipped, 2);
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(teams[0].logo_asset_path(), None);

        let layout = AssetLayout::new(Path::new("/nonexistent"), "player_images");
        let mut players: Vec<Player> = serde_json::from_str(
            r#"[{"player_id": 158023.0, "media": {"face_url": "F1"}},
                {"player_id": 18446744073709551615, "media": {"face_url": "F2"}},
                {"player_id": 10}]"#,
        )
        .unwrap();
        let plan = plan_players(&mut players, &index(), &layout, 100);
        assert_eq!(plan.skipped, 2);
        assert_eq!(plan.jobs, vec![Job::new("F10", "/nonexistent/player_images/10.png")]);
    }

    #[test]
    fn players_with_and_without_urls() {
        let layout = AssetLayout::new(Path::new("/nonexistent"), "player_images");
        let mut players: Vec<Player> = serde_json::from_value(json!([
            { "player_id": 10, "media": { "face_url": "F10" } },
            { "player_id": 99, "media": {} },
            { "media": { "face_url": "orphan" } }
        ]))
        .unwrap();

        let plan = plan_players(&mut players, &index(), &layout, 100);

        assert_eq!(plan.jobs, vec![Job::new("F10", "/nonexistent/player_images/10.png")]);
        assert_eq!(plan.no_url, 1);
        assert_eq!(plan.skipped, 1);
        assert_eq!(players[0].face_asset_path(), Some("player_images/10.png"));
        assert_eq!(players[1].face_asset_path(), None);
        assert_eq!(players[2].face_asset_path(), None);
    }

    #[test]
    fn cached_face_is_patched_without_url() {
        let dir = TempDir::new().unwrap();
        let layout = AssetLayout::new(dir.path(), "player_images");
        layout.create_dir().unwrap();
        std::fs::write(layout.dest("99"), vec![1u8; 150]).unwrap();

        let mut players: Vec<Player> =
            serde_json::from_value(json!([{ "player_id": 99 }])).unwrap();
        let plan = plan_players(&mut players, &index(), &layout, 100);

        assert!(plan.jobs.is_empty());
        assert_eq!(plan.cached, 1);
        assert_eq!(players[0].face_asset_path(), Some("player_images/99.png"));
    }
}
