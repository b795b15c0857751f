use anyhow::Result;
use colored::Colorize;

use super::{Context, Outcome};
use crate::package_cache::PackageCache;

pub fn clear_package_cache(ctx: &Context, cache: &dyn PackageCache) -> Result<Outcome> {
    println!("{} Clearing {} caches...", "🧹".bold(), cache.name().cyan());

    let report = ctx.scanning("Waiting for the package manager", || cache.clear_all())?;
    Ok(Outcome::CacheCleared { tool: cache.name(), report })
}
