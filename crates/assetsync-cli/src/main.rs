//! assetsync - Local image cache for football player and team catalogs
//!
//! Downloads player faces and club logos referenced by `players.json` and
//! `teams.json` and rewrites the catalogs to point at the cached files.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::FileConfig;

#[derive(Parser)]
#[command(name = "assetsync")]
#[command(about = "Cache catalog images locally and point the catalogs at them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Working directory holding players.json and teams.json
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Config file path (default: <dir>/assetsync.toml or ~/.config/assetsync/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Maximum number of concurrent downloads
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Attempts per download (first try included)
    #[arg(long, global = true)]
    retries: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Download missing assets and patch both catalogs
    Sync(cmd::sync::SyncArgs),
    /// Report catalog references to missing or invalid local assets
    Check,
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(assetsync_core::ProgressContext::new());
    let multi = if progress.is_tty() {
        Some(progress.multi())
    } else {
        None
    };
    assetsync_core::init_logging(cli.debug, multi);

    let file_config = if let Some(path) = &cli.config {
        FileConfig::from_file(path)?
    } else {
        FileConfig::load(&cli.dir)?
    };

    let mut config = file_config.into_sync_config(cli.dir.clone());
    if let Some(workers) = cli.workers {
        config.fetch.workers = workers.max(1);
    }
    if let Some(retries) = cli.retries {
        config.fetch.retries = retries.max(1);
    }

    match cli.command {
        Command::Sync(args) => cmd::sync::run(args, config, &progress),
        Command::Check => cmd::check::run(&config),
        Command::Config => {
            cmd::print_summary(
                "Setting",
                &[
                    ("Working directory", config.root.display().to_string()),
                    ("Players", config.players_path().display().to_string()),
                    ("Teams", config.teams_path().display().to_string()),
                    ("Logo directory", config.logo_layout().dir_path().display().to_string()),
                    ("Face directory", config.face_layout().dir_path().display().to_string()),
                    ("Workers", config.fetch.workers.to_string()),
                    ("Retries", config.fetch.retries.to_string()),
                    ("Retry wait", format!("{}ms", config.fetch.retry_wait.as_millis())),
                    (
                        "Request timeout",
                        format!("{}s", config.fetch.request_timeout.as_secs()),
                    ),
                    ("Min valid size", format!("{} bytes", config.fetch.min_valid_bytes)),
                    ("User-Agent", config.fetch.user_agent.clone()),
                ],
            );
            Ok(())
        }
    }
}
