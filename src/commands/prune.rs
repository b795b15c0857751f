use anyhow::Result;
use colored::Colorize;

use super::sdk::SDK_GROUPS;
use super::{Context, Outcome};
use crate::inventory::retention::{keep_latest_only, unused_bundles, without_nested};
use crate::inventory::scanner::{scan_bundles, scan_components, scan_flat};
use crate::types::{Component, Entry, Target};
use crate::utils::format_bytes;

struct Layout {
    name: &'static str,
    targets: Vec<Target>,
    bytes: u64,
}

/// Keeps only the newest version in every layout that applies to this machine.
pub fn prune_to_latest(ctx: &Context) -> Result<Outcome> {
    println!("{} Looking for outdated versions...", "🔍".bold());

    let layouts = ctx.scanning("Scanning all layouts", || plan(ctx));

    let mut targets = Vec::new();
    let mut total = 0u64;
    for layout in &layouts {
        if layout.targets.is_empty() {
            continue;
        }
        println!(
            "{} ({} item(s), {})",
            layout.name.bold().green(),
            layout.targets.len(),
            format_bytes(layout.bytes)
        );
        for target in &layout.targets {
            println!("  {} {}", "├─".bright_black(), target.label.cyan());
        }
        targets.extend(layout.targets.iter().cloned());
        total += layout.bytes;
    }

    let targets = without_nested(targets);
    if targets.is_empty() {
        return Ok(Outcome::NothingFound);
    }

    let question = format!("Remove {} outdated item(s), about {}?", targets.len(), format_bytes(total));
    if !ctx.prompter.confirm(&question)? {
        return Ok(Outcome::Cancelled);
    }

    Ok(Outcome::Removed(ctx.execute(&targets)))
}

fn plan(ctx: &Context) -> Vec<Layout> {
    let mut layouts = Vec::new();

    if ctx.platform.is_macos() {
        match scan_flat(&ctx.paths.device_support) {
            Ok(entries) => layouts.push(layout_from("iOS device support", keep_latest_only(&entries))),
            Err(e) => skip("iOS device support", &e.to_string()),
        }
    }

    if ctx.paths.sdk_root.is_dir() {
        match scan_components(&ctx.paths.sdk_root, Some(SDK_GROUPS)) {
            Ok(components) => layouts.push(latest_per_component("Android SDK", &components)),
            Err(e) => skip("Android SDK", &e.to_string()),
        }
    }

    match scan_components(&ctx.paths.packs, None) {
        Ok(components) => layouts.push(latest_per_component("Packs", &components)),
        Err(e) => skip("Packs", &e.to_string()),
    }

    if ctx.platform.is_macos() {
        match scan_bundles(&ctx.paths.simulator_assets, &ctx.paths.simulator_manifest) {
            Ok(entries) => layouts.push(layout_from("Simulator runtimes", unused_bundles(&entries))),
            Err(e) => skip("Simulator runtimes", &e.to_string()),
        }
    }

    layouts
}

fn latest_per_component(name: &'static str, components: &[Component]) -> Layout {
    let doomed = components.iter().flat_map(|c| keep_latest_only(&c.versions)).collect();
    layout_from(name, doomed)
}

fn layout_from(name: &'static str, doomed: Vec<&Entry>) -> Layout {
    Layout {
        name,
        bytes: doomed.iter().map(|e| e.size_bytes).sum(),
        targets: doomed.into_iter().map(Target::from).collect(),
    }
}

fn skip(layout: &str, reason: &str) {
    println!("{} Skipping {}: {}", "⚠".yellow(), layout, reason);
}
