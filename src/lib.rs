//! # linknizer
//!
//! Turns a directory into a static, browsable HTML index of itself. The
//! directory tree is captured as a keyed JSON listing, and a small page reads
//! that listing and renders it as a collapsible tree with links to every file.
//!
//! # Output
//!
//! Running `linknizer --dir /srv/share` adds to the scanned directory:
//!
//! ```text
//! /srv/share/
//! ├── index.html                  # template.html with the heading filled in
//! └── website_resource/           # copied from the working directory
//!     ├── css/style.css           # colors filled in
//!     ├── js/script.js
//!     └── listing.json            # the tree
//! ```
//!
//! The working directory (default `.`, or `--work-dir`) supplies
//! `metadata.json`, `template.html` and `website_resource/`. A ready-made set
//! lives in `site-template/` of this repository.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Walks the directory and builds the keyed [`tree::Node`] tree |
//! | [`keys`] | Sequential key counter owned by the tree builder |
//! | [`links`] | Derives each file's link from its path and the scan root |
//! | [`listing`] | Writes and reads `listing.json` |
//! | [`metadata`] | Loads `metadata.json` and applies defaults |
//! | [`site`] | Renders the templates and replaces `website_resource/` |
//! | [`pipeline`] | Runs one scan-assemble-write pass |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Keys Are Per-Build, Not Global
//!
//! Keys are numbered `1..=N` in pre-order by a counter that belongs to the
//! [`tree::TreeBuilder`]. Building twice in one process numbers both trees
//! from `1`.
//!
//! ## Links Relative To The Root
//!
//! `index.html` sits in the scan root, so a file's link is its path below the
//! root, `/`-separated. Older listings trimmed every character of the root
//! path from the front of the file path, which also ate file names sharing
//! those characters; [`links::LinkStyle::Legacy`] reproduces that output for
//! anyone who depends on it.
//!
//! ## Only Files And Directories
//!
//! Symlinks and special files are skipped with a warning. Following symlinks
//! would need cycle detection, and a snapshot of a share should not leave it.
//!
//! ## Listing Order
//!
//! Children are kept in the order the OS lists them. `--order folders-first`
//! sorts them when reproducible output matters.

pub mod keys;
pub mod links;
pub mod listing;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod site;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_helpers;
