use std::path::Path;

use crate::inventory::scanner::newest_first;
use crate::types::{Candidate, Entry, Target};

/// What the user picked is what gets removed, minus paths nested in another pick.
pub fn explicit_selection(selected: &[Candidate]) -> Vec<Target> {
    without_nested(selected.iter().map(Target::from).collect())
}

/// Everything in the sibling group except its latest version.
pub fn keep_latest_only(group: &[Entry]) -> Vec<&Entry> {
    if group.len() <= 1 {
        return Vec::new();
    }

    let Some(latest) = group.iter().min_by(|a, b| newest_first(a, b)) else {
        return Vec::new();
    };

    group.iter().filter(|entry| entry.path != latest.path).collect()
}

/// Asset bundles carry no usable version, so only usage decides.
pub fn unused_bundles(entries: &[Entry]) -> Vec<&Entry> {
    entries.iter().filter(|entry| entry.in_use == Some(false)).collect()
}

/// Drops duplicate paths and paths that live under another target, keeping the first occurrence.
pub fn without_nested(targets: Vec<Target>) -> Vec<Target> {
    let mut kept: Vec<Target> = Vec::with_capacity(targets.len());

    for target in targets {
        if kept.iter().any(|k| is_within(&target.path, &k.path)) {
            continue;
        }
        kept.retain(|k| !is_within(&k.path, &target.path));
        kept.push(target);
    }

    kept
}

fn is_within(path: &Path, ancestor: &Path) -> bool {
    path.starts_with(ancestor)
}
