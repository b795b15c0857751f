use anyhow::Result;
use colored::Colorize;

use super::{Context, Outcome, select_and_remove};
use crate::inventory::scanner::scan_build_outputs;
use crate::types::Candidate;
use crate::utils::display_path;

pub fn clean_build_outputs(ctx: &Context) -> Result<Outcome> {
    println!(
        "{} Looking for build outputs in {}",
        "🔍".bold(),
        display_path(&ctx.paths.project).cyan()
    );

    let entries = ctx.scanning("Scanning project", || {
        scan_build_outputs(&ctx.paths.project, &ctx.config.build_dirs, &ctx.config.build_ignore)
    });

    let candidates = entries.into_iter().map(Candidate::Entry).collect();
    select_and_remove(ctx, candidates, "Select build outputs to remove")
}
