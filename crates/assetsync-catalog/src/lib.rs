//! Assetsync Catalog - player/team catalogs and the asset sync pipeline
//!
//! Harvests image URLs from the player catalog, matches teams to club
//! logos, schedules downloads for everything not yet cached and rewrites
//! both catalogs to point at the local copies.
//!
//! # Example
//!
//! ```ignore
//! use assetsync_catalog::{Config, SyncPipeline};
//! use assetsync_core::ProgressContext;
//!
//! let pipeline = SyncPipeline::from_config(Config::default())?;
//! let summary = pipeline.run(&ProgressContext::new())?;
//! println!("{} logos failed", summary.logos.failed);
//! ```

pub mod catalog;
pub mod check;
pub mod config;
pub mod error;
pub mod index;
pub mod layout;
pub mod matcher;
pub mod plan;
pub mod record;
pub mod runner;

// Re-exports
pub use catalog::{load_catalog, save_catalog};
pub use check::{CheckReport, ClassCheck, check};
pub use config::Config;
pub use error::CatalogError;
pub use index::UrlIndex;
pub use layout::AssetLayout;
pub use matcher::{ClubIndex, MatchTier};
pub use plan::{PlayerPlan, TeamPlan, plan_players, plan_teams};
pub use record::{AssetId, Player, Team};
pub use runner::{ClassSummary, RunSummary, SyncPipeline};
