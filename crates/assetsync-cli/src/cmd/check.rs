//! Check subcommand - verify catalog references against the asset cache

use anyhow::{Context, Result};
use assetsync_catalog::{ClassCheck, Config};
use assetsync_core::fmt_num;

use super::print_summary;

/// Dangling paths echoed per class
const DANGLING_SHOWN: usize = 10;

pub fn run(config: &Config) -> Result<()> {
    let report = assetsync_catalog::check(config).context("Check failed")?;

    print_summary(
        "Check",
        &[
            ("Logos", class_row(&report.logos)),
            ("Faces", class_row(&report.faces)),
        ],
    );

    for (label, class) in [("logo", &report.logos), ("face", &report.faces)] {
        for path in class.dangling.iter().take(DANGLING_SHOWN) {
            eprintln!("    ✗ {label}: {path}");
        }
        if class.dangling.len() > DANGLING_SHOWN {
            eprintln!(
                "    ... and {} more {label} paths",
                fmt_num(class.dangling.len() - DANGLING_SHOWN)
            );
        }
    }

    if !report.is_consistent() {
        anyhow::bail!("Catalogs reference missing assets; run sync to fetch them");
    }
    Ok(())
}

fn class_row(class: &ClassCheck) -> String {
    format!(
        "{}/{} present ({} missing, {} without asset)",
        fmt_num(class.present),
        fmt_num(class.referenced),
        fmt_num(class.dangling.len()),
        fmt_num(class.without_asset)
    )
}
