use anyhow::Result;
use colored::Colorize;

use super::{Context, Outcome, select_and_remove};
use crate::error::SweepError;
use crate::inventory::scanner::scan_bundles;
use crate::types::Candidate;
use crate::utils::display_path;

pub fn clean_simulator_runtimes(ctx: &Context) -> Result<Outcome> {
    if !ctx.platform.is_macos() {
        return Ok(Outcome::Unsupported(SweepError::UnsupportedPlatform("Simulator runtime cleanup").to_string()));
    }

    let root = &ctx.paths.simulator_assets;
    println!("{} Scanning simulator runtimes in {}", "🔍".bold(), display_path(root).cyan());

    let entries =
        ctx.scanning("Measuring simulator runtimes", || scan_bundles(root, &ctx.paths.simulator_manifest))?;

    let candidates = entries.into_iter().map(Candidate::Entry).collect();
    select_and_remove(ctx, candidates, "Select simulator runtimes to remove")
}
