//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Run summary
//!
//! ```text
//! Scanned /srv/share
//!     3 folders, 5 files, depth 2, keys 1-8
//! Site
//!     index.html → /srv/share/index.html
//!     website_resource/ → /srv/share/website_resource (2 files copied)
//!     listing.json → /srv/share/website_resource/listing.json
//! ```
//!
//! ## Tree (`--tree`)
//!
//! Each node leads with its zero-padded key; files show their link.
//!
//! ```text
//! 001 share/
//!     002 a.txt → a.txt
//!     003 sub/
//!         004 b.txt → sub/b.txt
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O; `print_*` wrappers
//! write them to stdout.

use crate::pipeline::BuildReport;
use crate::tree::{Node, TreeStats};

/// Format a key as 3-digit zero-padded.
fn format_key(key: u64) -> String {
    format!("{:0>3}", key)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// One line per node, pre-order, indented by depth.
pub fn format_tree_output(tree: &Node) -> Vec<String> {
    tree.walk()
        .map(|(depth, node)| match node.link() {
            None => format!("{}{} {}/", indent(depth), format_key(node.key), node.title),
            Some(link) => format!(
                "{}{} {} \u{2192} {}",
                indent(depth),
                format_key(node.key),
                node.title,
                link
            ),
        })
        .collect()
}

/// Counts line for a scanned tree.
fn stats_line(stats: &TreeStats) -> String {
    format!(
        "{}, {}, depth {}, keys 1-{}",
        count(stats.folders, "folder", "folders"),
        count(stats.files, "file", "files"),
        stats.max_depth,
        stats.max_key
    )
}

/// Summary of a completed run.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let site = &report.site;
    let root = site
        .index_html
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    vec![
        format!("Scanned {}", root),
        format!("    {}", stats_line(&report.stats)),
        "Site".to_string(),
        format!("    index.html \u{2192} {}", site.index_html.display()),
        format!(
            "    website_resource/ \u{2192} {} ({} copied)",
            site.resource_dir.display(),
            count(site.copied_files, "file", "files")
        ),
        format!("    listing.json \u{2192} {}", report.listing.display()),
    ]
}

/// Print the tree to stdout.
pub fn print_tree_output(tree: &Node) {
    for line in format_tree_output(tree) {
        println!("{}", line);
    }
}

/// Print the run summary to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
