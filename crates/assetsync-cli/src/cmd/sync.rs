//! Sync subcommand - download assets and patch catalogs

use anyhow::{Context, Result};
use assetsync_catalog::{ClassSummary, Config, RunSummary, SyncPipeline};
use assetsync_core::{SharedProgress, fmt_num};
use clap::Args;

use super::print_summary;

/// Unmatched team names listed in the summary table
const UNMATCHED_SHOWN: usize = 5;

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Plan only: report what would be downloaded without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: SyncArgs, config: Config, progress: &SharedProgress) -> Result<()> {
    log::info!("Syncing assets in {}", config.root.display());
    let pipeline = SyncPipeline::from_config(config).context("Failed to set up downloader")?;

    let result = if args.dry_run {
        pipeline.dry_run()
    } else {
        pipeline.run(progress)
    };
    let summary = result.context("Sync failed")?;

    let title = if args.dry_run { "Sync (dry run)" } else { "Sync" };
    print_summary(title, &rows(&summary, args.dry_run));

    if summary.failed() > 0 {
        log::warn!(
            "{} downloads failed; run sync again to retry",
            fmt_num(summary.failed())
        );
    }
    Ok(())
}

fn class_row(class: &ClassSummary, dry_run: bool) -> String {
    if dry_run {
        format!(
            "{} to fetch, {} cached",
            fmt_num(class.scheduled),
            fmt_num(class.cached)
        )
    } else {
        format!(
            "{}/{} ok ({} failed, {} cached)",
            fmt_num(class.succeeded),
            fmt_num(class.scheduled),
            fmt_num(class.failed),
            fmt_num(class.cached)
        )
    }
}

fn rows(summary: &RunSummary, dry_run: bool) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        (
            "Catalogs",
            format!(
                "{} players, {} teams",
                fmt_num(summary.players),
                fmt_num(summary.teams)
            ),
        ),
        (
            "Harvested",
            format!(
                "{} club logos, {} faces",
                fmt_num(summary.clubs),
                fmt_num(summary.faces_harvested)
            ),
        ),
        ("Logos", class_row(&summary.logos, dry_run)),
        ("Faces", class_row(&summary.faces, dry_run)),
        ("Players without face", fmt_num(summary.faces.unresolved)),
        ("Unmatched teams", unmatched(&summary.unmatched_teams)),
    ];
    let skipped = summary.logos.skipped + summary.faces.skipped;
    if skipped > 0 {
        rows.push(("Skipped records", fmt_num(skipped)));
    }
    rows.push(("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())));
    rows
}

fn unmatched(names: &[String]) -> String {
    if names.is_empty() {
        return "0".to_string();
    }
    let shown = names
        .iter()
        .take(UNMATCHED_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > UNMATCHED_SHOWN {
        format!("{} ({shown}, ...)", fmt_num(names.len()))
    } else {
        format!("{} ({shown})", fmt_num(names.len()))
    }
}
