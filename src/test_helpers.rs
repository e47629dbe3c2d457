//! Shared test utilities for the linknizer test suite.
//!
//! Provides fixture builders for directory trees and site inputs, node lookups
//! that panic with a useful message, and assertions for the key numbering.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! make_tree(tmp.path(), &["a.txt", "sub/b.txt", "empty/"]);
//! let tree = build_tree(tmp.path(), &TraverseOptions::default()).unwrap();
//!
//! assert_eq!(find_child(&tree, "sub").children().len(), 1);
//! assert_key_invariants(&tree);
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::tree::Node;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create files and directories below `root`.
///
/// Entries ending in `/` are directories; everything else is a file whose
/// content is its own path. Missing parent directories are created.
pub fn make_tree(root: &Path, entries: &[&str]) {
    fs::create_dir_all(root).unwrap();
    for entry in entries {
        if let Some(dir) = entry.strip_suffix('/') {
            fs::create_dir_all(root.join(dir)).unwrap();
        } else {
            let path = root.join(entry);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, entry).unwrap();
        }
    }
}

/// `R/a.txt` and `R/sub/b.txt` inside a fresh temp dir.
pub fn scenario_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    make_tree(&tmp.path().join("R"), &["a.txt", "sub/b.txt"]);
    tmp
}

pub const TEST_TEMPLATE: &str =
    "<html><head><title>$$__HEADING__$$</title></head><body><h1>$$__HEADING__$$</h1></body></html>";

pub const TEST_STYLE: &str = "body { background: $$__BG_COLOR__$$; }\n\
     .folder { color: $$__FOLDER_COLOR__$$; }\n\
     .file { color: $$__FILE_COLOR__$$; }\n";

/// Populate a working directory with a template, a resource tree and, when
/// given, a `metadata.json`.
pub fn write_site_inputs(work_dir: &Path, metadata: Option<&str>) {
    fs::create_dir_all(work_dir.join("website_resource/css")).unwrap();
    fs::create_dir_all(work_dir.join("website_resource/js")).unwrap();
    fs::write(work_dir.join("template.html"), TEST_TEMPLATE).unwrap();
    fs::write(work_dir.join("website_resource/css/style.css"), TEST_STYLE).unwrap();
    fs::write(work_dir.join("website_resource/js/script.js"), "// script").unwrap();
    if let Some(json) = metadata {
        fs::write(work_dir.join("metadata.json"), json).unwrap();
    }
}

pub const FULL_METADATA: &str = r##"{
    "heading": "Shared Drive",
    "background_color": "#101010",
    "folder_color": "gold",
    "file_color": "silver"
}"##;

// =========================================================================
// Node lookups, panicking with the available titles on a miss
// =========================================================================

/// Find a direct child by title. Panics if not found.
pub fn find_child<'a>(node: &'a Node, title: &str) -> &'a Node {
    node.find_child(title).unwrap_or_else(|| {
        let titles: Vec<&str> = node.children().iter().map(|c| c.title.as_str()).collect();
        panic!("child '{title}' not found under '{}'. Available: {titles:?}", node.title)
    })
}

/// Titles of the direct children, order ignored.
pub fn child_titles(node: &Node) -> BTreeSet<&str> {
    node.children().iter().map(|c| c.title.as_str()).collect()
}

// =========================================================================
// Shape comparison
// =========================================================================

/// Every descendant as a root-relative path; folders end with `/`.
pub fn relative_paths(root: &Node) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    for child in root.children() {
        collect_paths(child, "", &mut paths);
    }
    paths
}

fn collect_paths(node: &Node, prefix: &str, paths: &mut BTreeSet<String>) {
    if node.is_folder() {
        let path = format!("{prefix}{}/", node.title);
        for child in node.children() {
            collect_paths(child, &path, paths);
        }
        paths.insert(path);
    } else {
        paths.insert(format!("{prefix}{}", node.title));
    }
}

/// The paths [`relative_paths`] should report for a tree made by
/// [`make_tree`] from `entries`, including implied parent directories.
pub fn expected_paths(entries: &[&str]) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    for entry in entries {
        let trimmed = entry.trim_end_matches('/');
        let mut prefix = String::new();
        let parts: Vec<&str> = trimmed.split('/').collect();
        for part in &parts[..parts.len() - 1] {
            prefix.push_str(part);
            prefix.push('/');
            paths.insert(prefix.clone());
        }
        paths.insert(entry.to_string());
    }
    paths
}

// =========================================================================
// Key assertions
// =========================================================================

/// Assert the pre-order numbering rules:
///
/// - keys are exactly `1..=N`
/// - a node's key is lower than every key in its subtree
/// - every key in an earlier sibling's subtree is lower than a later sibling's key
pub fn assert_key_invariants(root: &Node) {
    let mut keys: Vec<u64> = root.iter().map(|n| n.key).collect();
    keys.sort_unstable();
    let expected: Vec<u64> = (1..=keys.len() as u64).collect();
    assert_eq!(keys, expected, "keys are not exactly 1..=N");

    for node in root.iter() {
        for descendant in node.iter().skip(1) {
            assert!(
                node.key < descendant.key,
                "'{}' ({}) is not below descendant '{}' ({})",
                node.title,
                node.key,
                descendant.title,
                descendant.key
            );
        }
        for pair in node.children().windows(2) {
            let earlier_max = pair[0].iter().map(|n| n.key).max().unwrap();
            assert!(
                earlier_max < pair[1].key,
                "subtree of '{}' reaches key {} but next sibling '{}' has {}",
                pair[0].title,
                earlier_max,
                pair[1].title,
                pair[1].key
            );
        }
    }
}
