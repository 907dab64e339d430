// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for main-language discovery

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use translation_sync::discover::discover;
use translation_sync::SyncError;

fn touch(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn json_only() -> Vec<String> {
    vec!["json".to_string()]
}

#[test]
fn test_discover_missing_main_language() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("tr")).unwrap();

    let err = discover(dir.path(), "en", &json_only(), 100).unwrap_err();
    assert!(matches!(err, SyncError::Configuration(_)));
}

#[test]
fn test_discover_nested_files() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "en/common.json", "{}");
    touch(dir.path(), "en/admin/users.json", "{}");
    touch(dir.path(), "en/admin/deep/roles.JSON", "{}");
    touch(dir.path(), "en/notes.txt", "ignored");
    touch(dir.path(), "tr/only-here.json", "{}");

    let index = discover(dir.path(), "en", &json_only(), 100).expect("discovery should succeed");

    // Listing order is platform dependent, compare as a set.
    let found: HashSet<String> = index.iter().map(|d| d.to_string()).collect();
    let expected: HashSet<String> = ["common.json", "admin/users.json", "admin/deep/roles.JSON"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(found, expected);

    let roles = index
        .iter()
        .find(|d| d.filename == "roles.JSON")
        .expect("roles should be indexed");
    assert_eq!(roles.relative_path, vec!["admin", "deep"]);
}

#[test]
fn test_discover_extension_allow_list() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "en/a.json", "{}");
    touch(dir.path(), "en/b.yaml", "a: 1");
    touch(dir.path(), "en/c", "no extension");

    let allowed = vec!["yaml".to_string()];
    let index = discover(dir.path(), "en", &allowed, 100).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].filename, "b.yaml");
}

#[test]
fn test_discover_empty_main_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("en/empty/dirs")).unwrap();

    let index = discover(dir.path(), "en", &json_only(), 100).unwrap();
    assert!(index.is_empty());
}

#[test]
fn test_discover_limit_exceeded() {
    let dir = TempDir::new().unwrap();
    for i in 0..4 {
        touch(dir.path(), &format!("en/file{}.json", i), "{}");
    }

    let err = discover(dir.path(), "en", &json_only(), 3).unwrap_err();
    assert!(matches!(err, SyncError::LimitExceeded { limit: 3 }));

    // Exactly at the cap is fine.
    let index = discover(dir.path(), "en", &json_only(), 4).unwrap();
    assert_eq!(index.len(), 4);
}
