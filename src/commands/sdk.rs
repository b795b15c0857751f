use anyhow::{Context as _, Result};
use colored::Colorize;

use super::{Context, Outcome, select_and_remove};
use crate::error::SweepError;
use crate::inventory::scanner::scan_components;
use crate::types::Candidate;
use crate::utils::display_path;

/// SDK folders holding one subfolder per installed version.
pub const SDK_GROUPS: &[&str] = &["platforms", "build-tools", "ndk", "system-images", "sources"];

pub fn clean_sdk_components(ctx: &Context) -> Result<Outcome> {
    let root = &ctx.paths.sdk_root;
    if !root.is_dir() {
        return Err(SweepError::PathNotFound(root.clone()))
            .context("Android SDK not found, set `sdk_root` in the config or pass --sdk-root");
    }

    println!("{} Scanning SDK at {}", "🔍".bold(), display_path(root).cyan());

    let components = ctx
        .scanning("Measuring SDK components", || scan_components(root, Some(SDK_GROUPS)))
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    select_and_remove(ctx, Candidate::from_components(components), "Select SDK components to remove")
}
