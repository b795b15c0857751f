use anyhow::{Context as _, Result};
use colored::Colorize;

use super::{Context, Outcome, select_and_remove};
use crate::error::SweepError;
use crate::inventory::scanner::scan_flat;
use crate::types::Candidate;
use crate::utils::display_path;

pub fn clean_device_support(ctx: &Context) -> Result<Outcome> {
    if !ctx.platform.is_macos() {
        return Ok(Outcome::Unsupported(SweepError::UnsupportedPlatform("iOS device support cleanup").to_string()));
    }

    let root = &ctx.paths.device_support;
    println!("{} Scanning {}", "🔍".bold(), display_path(root).cyan());

    let entries = ctx
        .scanning("Measuring device support folders", || scan_flat(root))
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let candidates = entries.into_iter().map(Candidate::Entry).collect();
    select_and_remove(ctx, candidates, "Select device support versions to remove")
}
