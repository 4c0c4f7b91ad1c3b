//! Pipeline orchestration: harvest, plan, fetch, persist

use std::time::{Duration, Instant};

use assetsync_core::{
    BatchProgress, BatchResult, Fetcher, HttpTransport, Job, ProgressContext, Transport,
    WorkerPool, fmt_num,
};

use crate::catalog::{load_catalog, require, save_catalog};
use crate::config::Config;
use crate::error::CatalogError;
use crate::index::UrlIndex;
use crate::plan::{PlayerPlan, TeamPlan, plan_players, plan_teams};
use crate::record::{Player, Team};

/// Syncs team logos and player faces for one working directory.
pub struct SyncPipeline<T> {
    config: Config,
    fetcher: Fetcher<T>,
    pool: WorkerPool,
}

impl SyncPipeline<HttpTransport> {
    /// Pipeline downloading over HTTP
    pub fn from_config(config: Config) -> Result<Self, CatalogError> {
        let transport = HttpTransport::new(&config.fetch).map_err(CatalogError::Transport)?;
        Self::new(config, transport)
    }
}

/// Both catalogs after harvesting and planning, before any download
struct Planned {
    players: Vec<Player>,
    teams: Vec<Team>,
    clubs: usize,
    faces: usize,
    team_plan: TeamPlan,
    player_plan: PlayerPlan,
}

impl<T: Transport> SyncPipeline<T> {
    pub fn new(config: Config, transport: T) -> Result<Self, CatalogError> {
        let pool = WorkerPool::new(&config.fetch).map_err(CatalogError::Pool)?;
        let fetcher = Fetcher::new(transport, config.fetch.clone());
        Ok(Self {
            config,
            fetcher,
            pool,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full sync and persist both catalogs.
    ///
    /// Catalogs are saved even when downloads fail; a failed asset leaves
    /// its record pointing at a local file that does not exist yet, which
    /// the next run retries.
    pub fn run(&self, progress: &ProgressContext) -> Result<RunSummary, CatalogError> {
        let start = Instant::now();
        let mut planned = self.prepare(true)?;

        log::info!(
            "{} logos to download, {} faces to download",
            fmt_num(planned.team_plan.jobs.len()),
            fmt_num(planned.player_plan.jobs.len())
        );

        let mut summary = planned.summary();
        let logos = self.execute(
            "Logos",
            std::mem::take(&mut planned.team_plan.jobs),
            progress,
        );
        let faces = self.execute(
            "Faces",
            std::mem::take(&mut planned.player_plan.jobs),
            progress,
        );
        summary.logos.record(logos);
        summary.faces.record(faces);

        save_catalog(&self.config.teams_path(), &planned.teams)?;
        save_catalog(&self.config.players_path(), &planned.players)?;
        log::info!(
            "Saved {} and {}",
            self.config.teams_file.display(),
            self.config.players_file.display()
        );

        summary.elapsed = start.elapsed();
        summary.log();
        Ok(summary)
    }

    /// Harvest and plan without downloading or writing anything.
    ///
    /// `scheduled` counts in the summary are the jobs a real run would start.
    pub fn dry_run(&self) -> Result<RunSummary, CatalogError> {
        let start = Instant::now();
        let planned = self.prepare(false)?;
        let mut summary = planned.summary();
        summary.elapsed = start.elapsed();
        summary.log();
        Ok(summary)
    }

    fn prepare(&self, create_dirs: bool) -> Result<Planned, CatalogError> {
        let players_path = self.config.players_path();
        let teams_path = self.config.teams_path();
        // Both must exist before anything is read, created or fetched
        require(&players_path)?;
        require(&teams_path)?;

        let mut players: Vec<Player> = load_catalog(&players_path)?;
        let mut teams: Vec<Team> = load_catalog(&teams_path)?;
        log::info!(
            "Loaded {} players, {} teams",
            fmt_num(players.len()),
            fmt_num(teams.len())
        );

        let logo_layout = self.config.logo_layout();
        let face_layout = self.config.face_layout();
        if create_dirs {
            logo_layout.create_dir()?;
            face_layout.create_dir()?;
        }

        let index = UrlIndex::harvest(&players);
        log::info!(
            "Harvested {} unique club logos, {} player faces",
            fmt_num(index.clubs().len()),
            fmt_num(index.face_count())
        );

        let min_valid_bytes = self.config.fetch.min_valid_bytes;
        let team_plan = plan_teams(&mut teams, &index, &logo_layout, min_valid_bytes);
        log::info!(
            "Teams: {} matched, {} already cached, {} unmatched",
            fmt_num(team_plan.jobs.len()),
            fmt_num(team_plan.cached),
            fmt_num(team_plan.unmatched.len())
        );
        for name in &team_plan.unmatched {
            log::debug!("unmatched team: {name}");
        }

        let player_plan = plan_players(&mut players, &index, &face_layout, min_valid_bytes);
        log::info!(
            "Players: {} scheduled, {} already cached, {} without face URL",
            fmt_num(player_plan.jobs.len()),
            fmt_num(player_plan.cached),
            fmt_num(player_plan.no_url)
        );

        Ok(Planned {
            players,
            teams,
            clubs: index.clubs().len(),
            faces: index.face_count(),
            team_plan,
            player_plan,
        })
    }

    fn execute(&self, label: &str, jobs: Vec<Job>, progress: &ProgressContext) -> BatchResult {
        if jobs.is_empty() {
            log::info!("{label}: nothing to do");
            return BatchResult::default();
        }
        log::info!(
            "{label}: fetching {} with {} workers",
            fmt_num(jobs.len()),
            self.pool.workers()
        );
        let observer = BatchProgress::new(progress, label, jobs.len());
        let result = self
            .pool
            .run(jobs, |job| self.fetcher.fetch_job(job), &observer);
        observer.finish();
        log::info!(
            "{label}: {} ok, {} failed",
            fmt_num(result.succeeded),
            fmt_num(result.failed)
        );
        result
    }
}

impl Planned {
    /// Summary of the plan; fetch counts and elapsed time are filled in later
    fn summary(&self) -> RunSummary {
        RunSummary {
            players: self.players.len(),
            teams: self.teams.len(),
            clubs: self.clubs,
            faces_harvested: self.faces,
            logos: ClassSummary {
                scheduled: self.team_plan.jobs.len(),
                cached: self.team_plan.cached,
                unresolved: self.team_plan.unmatched.len(),
                skipped: self.team_plan.skipped,
                ..Default::default()
            },
            faces: ClassSummary {
                scheduled: self.player_plan.jobs.len(),
                cached: self.player_plan.cached,
                unresolved: self.player_plan.no_url,
                skipped: self.player_plan.skipped,
                ..Default::default()
            },
            unmatched_teams: self.team_plan.unmatched.clone(),
            elapsed: Duration::ZERO,
        }
    }
}

/// Per asset class (logos or faces) counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSummary {
    /// Jobs handed to the worker pool
    pub scheduled: usize,
    /// Assets already on disk
    pub cached: usize,
    /// Records with no URL to fetch from (unmatched teams, players
    /// without a face URL)
    pub unresolved: usize,
    /// Records missing an id (or team name)
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ClassSummary {
    fn record(&mut self, result: BatchResult) {
        self.succeeded = result.succeeded;
        self.failed = result.failed;
    }
}

/// Summary of one sync run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub players: usize,
    pub teams: usize,
    /// Unique club logo URLs harvested
    pub clubs: usize,
    /// Player face URLs harvested
    pub faces_harvested: usize,
    pub logos: ClassSummary,
    pub faces: ClassSummary,
    pub unmatched_teams: Vec<String>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn log(&self) {
        log::info!("=== Sync Summary ===");
        log::info!(
            "Logos: {} ok, {} failed ({} cached, {} unmatched)",
            fmt_num(self.logos.succeeded),
            self.logos.failed,
            fmt_num(self.logos.cached),
            self.logos.unresolved
        );
        log::info!(
            "Faces: {} ok, {} failed ({} cached, {} without URL)",
            fmt_num(self.faces.succeeded),
            self.faces.failed,
            fmt_num(self.faces.cached),
            self.faces.unresolved
        );
        log::info!("Time: {:.1}s", self.elapsed.as_secs_f64());
    }

    pub fn failed(&self) -> usize {
        self.logos.failed + self.faces.failed
    }
}
