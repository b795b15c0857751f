use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::SweepError;
use crate::inventory::removal::{FsRemover, RemovalExecutor};
use crate::inventory::retention::{keep_latest_only, unused_bundles};
use crate::inventory::scanner::{scan_build_outputs, scan_bundles, scan_components, scan_flat};
use crate::types::{EntryKind, Target};

fn dir_with_bytes(path: &Path, bytes: usize) -> PathBuf {
    fs::create_dir_all(path).unwrap();
    fs::write(path.join("payload"), vec![7u8; bytes]).unwrap();
    path.to_path_buf()
}

fn write_manifest(root: &Path, body: &str) -> PathBuf {
    let path = root.join("manifest.xml");
    fs::write(&path, body).unwrap();
    path
}

// -------------------------------------------------------------------------
// Flat layout
// -------------------------------------------------------------------------

#[test]
fn test_flat_scan_lists_subdirectories_by_size() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    dir_with_bytes(&root.join("16.4 (20E247)"), 300);
    dir_with_bytes(&root.join("17.0 (21A329)"), 100);
    dir_with_bytes(&root.join("15.2"), 200);
    fs::write(root.join("stray.txt"), b"ignored").unwrap();

    let entries = scan_flat(root).unwrap();
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["16.4 (20E247)", "15.2", "17.0 (21A329)"]);
    assert_eq!(entries[0].size_bytes, 300);
    assert!(entries.iter().all(|e| e.kind == EntryKind::Flat));

    let latest: Vec<&str> = entries.iter().filter(|e| e.is_latest).map(|e| e.label.as_str()).collect();
    assert_eq!(latest, vec!["17.0 (21A329)"]);
}

#[test]
fn test_flat_scan_of_missing_root_is_empty() {
    let tmp = TempDir::new().unwrap();
    assert!(scan_flat(&tmp.path().join("missing")).unwrap().is_empty());
}

#[test]
fn test_rescan_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    dir_with_bytes(&tmp.path().join("a"), 10);
    dir_with_bytes(&tmp.path().join("b"), 10);
    dir_with_bytes(&tmp.path().join("c/deeper"), 30);

    assert_eq!(scan_flat(tmp.path()).unwrap(), scan_flat(tmp.path()).unwrap());
    assert_eq!(scan_components(tmp.path(), None).unwrap(), scan_components(tmp.path(), None).unwrap());
}

// -------------------------------------------------------------------------
// Pack / version layout
// -------------------------------------------------------------------------

#[test]
fn test_component_scan_sizes_both_levels() {
    let tmp = TempDir::new().unwrap();
    let packs = tmp.path();
    dir_with_bytes(&packs.join("Microsoft.Android.Sdk/34.0.1"), 40);
    dir_with_bytes(&packs.join("Microsoft.Android.Sdk/34.0.43"), 60);
    dir_with_bytes(&packs.join("Microsoft.iOS.Sdk/17.0.8478"), 500);

    let components = scan_components(packs, None).unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].name, "Microsoft.iOS.Sdk");
    assert_eq!(components[0].size_bytes, 500);

    let android = &components[1];
    assert_eq!(android.size_bytes, 100);
    let versions: Vec<&str> = android.versions.iter().map(|v| v.label.as_str()).collect();
    assert_eq!(versions, vec!["34.0.43", "34.0.1"]);
    assert!(android.versions[0].is_latest);
    assert!(!android.versions[1].is_latest);
    assert_eq!(android.versions[0].display_name(), "Microsoft.Android.Sdk/34.0.43");
}

#[test]
fn test_component_scan_respects_group_filter() {
    let tmp = TempDir::new().unwrap();
    dir_with_bytes(&tmp.path().join("platforms/android-33"), 1);
    dir_with_bytes(&tmp.path().join("licenses/x"), 1);

    let components = scan_components(tmp.path(), Some(&["platforms", "build-tools"][..])).unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].name, "platforms");
}

#[test]
fn test_platform_sweep_keeps_newest() {
    let tmp = TempDir::new().unwrap();
    let sdk = tmp.path().join("sdk");
    for name in ["android-30", "android-33", "android-31"] {
        dir_with_bytes(&sdk.join("platforms").join(name), 1000);
    }

    let components = scan_components(&sdk, None).unwrap();
    let platforms = &components[0];
    let doomed: Vec<Target> = keep_latest_only(&platforms.versions).into_iter().map(Target::from).collect();

    let result = RemovalExecutor::new(&FsRemover).execute(&doomed);
    assert_eq!(result.removed_count, 2);
    assert_eq!(result.freed_bytes, 2000);
    assert!(result.failures.is_empty());
    assert!(sdk.join("platforms/android-33").exists());
    assert!(!sdk.join("platforms/android-30").exists());
    assert!(!sdk.join("platforms/android-31").exists());
}

// -------------------------------------------------------------------------
// Asset bundles
// -------------------------------------------------------------------------

#[test]
fn test_bundles_are_tagged_from_manifest() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    dir_with_bytes(&root.join("A.asset"), 10);
    dir_with_bytes(&root.join("B.asset"), 5);
    dir_with_bytes(&root.join("not-an-asset"), 5);
    let manifest = write_manifest(
        root,
        r#"<assets><asset assetId="A" state="installed"/><asset assetId="B" state="removed"/></assets>"#,
    );

    let entries = scan_bundles(root, &manifest).unwrap();
    assert_eq!(entries.len(), 2);
    // Deletion candidates first.
    assert_eq!(entries[0].label, "B.asset");
    assert_eq!(entries[0].in_use, Some(false));
    assert_eq!(entries[1].label, "A.asset");
    assert_eq!(entries[1].in_use, Some(true));

    let removable: Vec<&str> = unused_bundles(&entries).iter().map(|e| e.label.as_str()).collect();
    assert_eq!(removable, vec!["B.asset"]);
}

#[test]
fn test_bundles_without_manifest_fail() {
    let tmp = TempDir::new().unwrap();
    dir_with_bytes(&tmp.path().join("A.asset"), 10);

    let err = scan_bundles(tmp.path(), &tmp.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, SweepError::ManifestUnavailable { .. }));

    let broken = write_manifest(tmp.path(), "<assets><asset></assets>");
    let err = scan_bundles(tmp.path(), &broken).unwrap_err();
    assert!(matches!(err, SweepError::ManifestUnavailable { .. }));

    let truncated = write_manifest(tmp.path(), r#"<assets><asset assetId="B" state="installed"/>"#);
    let err = scan_bundles(tmp.path(), &truncated).unwrap_err();
    assert!(matches!(err, SweepError::ManifestUnavailable { .. }));
}

// -------------------------------------------------------------------------
// Build outputs
// -------------------------------------------------------------------------

#[test]
fn test_build_outputs_are_found_without_descending() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path();
    dir_with_bytes(&project.join("App/bin/Debug"), 10);
    dir_with_bytes(&project.join("App/obj"), 20);
    dir_with_bytes(&project.join("App/bin/Debug/obj"), 5);
    dir_with_bytes(&project.join("Lib/Core/obj"), 7);
    dir_with_bytes(&project.join(".git/obj"), 1);
    dir_with_bytes(&project.join("node_modules/pkg/bin"), 1);

    let names = vec!["bin".to_string(), "obj".to_string()];
    let ignore = vec!["**/node_modules".to_string()];
    let entries = scan_build_outputs(project, &names, &ignore);

    let mut labels: Vec<String> = entries.iter().map(|e| e.label.replace('\\', "/")).collect();
    labels.sort();
    assert_eq!(labels, vec!["App/bin", "App/obj", "Lib/Core/obj"]);

    let bin = entries.iter().find(|e| e.path.ends_with("App/bin")).unwrap();
    assert_eq!(bin.size_bytes, 15);
}
