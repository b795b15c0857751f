use anyhow::{Context as _, Result};
use colored::Colorize;

use super::{Context, Outcome, select_and_remove};
use crate::inventory::scanner::scan_components;
use crate::types::Candidate;
use crate::utils::display_path;

pub fn clean_packs(ctx: &Context) -> Result<Outcome> {
    let root = &ctx.paths.packs;
    println!("{} Scanning packs in {}", "🔍".bold(), display_path(root).cyan());

    let components = ctx
        .scanning("Measuring packs", || scan_components(root, None))
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    select_and_remove(ctx, Candidate::from_components(components), "Select packs or pack versions to remove")
}
