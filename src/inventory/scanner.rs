use globset::{Glob, GlobSet, GlobSetBuilder};
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::SweepError;
use crate::inventory::manifest::UsageManifest;
use crate::inventory::size::size_or_zero;
use crate::inventory::version;
use crate::types::{Component, Entry, EntryKind};

pub const ASSET_SUFFIX: &str = ".asset";

/// Immediate subdirectories of `root`, largest first. A missing root is empty.
pub fn scan_flat(root: &Path) -> io::Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = subdirectories(root)?
        .into_iter()
        .map(|(name, path)| {
            let size = size_or_zero(&path);
            Entry::new(name, path, size, EntryKind::Flat)
        })
        .collect();

    mark_latest(&mut entries);
    entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.path.cmp(&b.path)));

    debug!(root = %root.display(), count = entries.len(), "flat scan");
    Ok(entries)
}

/// Two-level pack/version tree. `groups` limits which packs are considered.
///
/// A pack whose versions cannot be listed is left out with a warning so the
/// remaining packs are still offered.
pub fn scan_components(root: &Path, groups: Option<&[&str]>) -> io::Result<Vec<Component>> {
    scan_components_with(root, groups, subdirectories)
}

fn scan_components_with(
    root: &Path,
    groups: Option<&[&str]>,
    list: impl Fn(&Path) -> io::Result<Vec<(String, PathBuf)>>,
) -> io::Result<Vec<Component>> {
    let mut components = Vec::new();

    for (name, path) in list(root)? {
        if let Some(groups) = groups {
            if !groups.contains(&name.as_str()) {
                continue;
            }
        }

        let listed = match list(&path) {
            Ok(listed) => listed,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable component");
                continue;
            },
        };

        let mut versions: Vec<Entry> = listed
            .into_iter()
            .map(|(label, version_path)| {
                let size = size_or_zero(&version_path);
                Entry::new(label, version_path, size, EntryKind::PackVersion)
            })
            .collect();

        mark_latest(&mut versions);
        versions.sort_by(|a, b| newest_first(a, b));

        let size_bytes = size_or_zero(&path);
        components.push(Component { name, path, size_bytes, versions });
    }

    components.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.path.cmp(&b.path)));

    debug!(root = %root.display(), count = components.len(), "component scan");
    Ok(components)
}

/// `*.asset` folders tagged against the usage manifest, deletion candidates first.
pub fn scan_bundles(root: &Path, manifest_path: &Path) -> Result<Vec<Entry>, SweepError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let manifest = UsageManifest::load(manifest_path)?;
    debug!(installed = manifest.len(), "loaded usage manifest");

    let mut entries: Vec<Entry> = subdirectories(root)?
        .into_iter()
        .filter_map(|(name, path)| {
            let id = name.strip_suffix(ASSET_SUFFIX)?.to_string();
            let size = size_or_zero(&path);
            let mut entry = Entry::new(name, path, size, EntryKind::AssetBundle);
            entry.in_use = Some(manifest.is_installed(&id));
            Some(entry)
        })
        .collect();

    entries.sort_by(|a, b| {
        a.is_in_use()
            .cmp(&b.is_in_use())
            .then_with(|| b.size_bytes.cmp(&a.size_bytes))
            .then_with(|| a.path.cmp(&b.path))
    });

    Ok(entries)
}

/// Walks a project for build output directories without descending into them.
pub fn scan_build_outputs(project: &Path, dir_names: &[String], ignore: &[String]) -> Vec<Entry> {
    let ignore_set = build_ignore_set(ignore);
    let mut entries = Vec::new();

    if !project.is_dir() {
        return entries;
    }

    let mut walker = WalkDir::new(project).follow_links(false).into_iter();
    loop {
        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(e)) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            },
        };

        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let relative = entry.path().strip_prefix(project).unwrap_or(entry.path());

        if name.starts_with('.') || ignore_set.is_match(relative) {
            walker.skip_current_dir();
            continue;
        }

        if dir_names.iter().any(|d| d.as_str() == name) {
            let path = entry.path().to_path_buf();
            let size = size_or_zero(&path);
            entries.push(Entry::new(relative.display().to_string(), path, size, EntryKind::Flat));
            walker.skip_current_dir();
        }
    }

    entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.path.cmp(&b.path)));
    entries
}

fn build_ignore_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            },
            Err(e) => warn!(pattern = %pattern, error = %e, "ignoring invalid glob"),
        }
    }
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "could not compile ignore globs");
        GlobSet::empty()
    })
}

/// Ordering used to pick the latest sibling; ties fall back to the full label, then the path.
pub fn newest_first(a: &Entry, b: &Entry) -> Ordering {
    version::compare(&b.label, &a.label)
        .then_with(|| b.label.cmp(&a.label))
        .then_with(|| b.path.cmp(&a.path))
}

pub fn mark_latest(siblings: &mut [Entry]) {
    for entry in siblings.iter_mut() {
        entry.is_latest = false;
    }
    if let Some(latest) = siblings.iter_mut().min_by(|a, b| newest_first(a, b)) {
        latest.is_latest = true;
    }
}

fn subdirectories(root: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let read_dir = match fs::read_dir(root) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut dirs = Vec::new();
    for entry in read_dir {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    dirs.sort();
    Ok(dirs)
}
