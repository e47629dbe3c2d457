//! Link derivation for file nodes.
//!
//! Each file node carries a `link`: the path the rendered page uses to reach
//! the original file. `index.html` is written to the scan root, so links are
//! the file's path with the scan root removed from the front.
//!
//! ## Styles
//!
//! - [`LinkStyle::Relative`] strips the root by path components and joins what
//!   is left with `/`, whatever the platform separator:
//!   - root `/srv/share`, file `/srv/share/docs/a.txt` → `docs/a.txt`
//!   - root `/srv/share`, file `/srv/share/cab.txt` → `cab.txt`
//!
//! - [`LinkStyle::Legacy`] reproduces the historical behavior: when the path
//!   string starts with the root string, every leading character that appears
//!   *anywhere* in the root string is trimmed. This is a character-class trim,
//!   not a prefix removal, so it also eats the start of names built from the
//!   same characters:
//!   - root `/srv/share`, file `/srv/share/docs/a.txt` → `docs/a.txt`
//!   - root `/srv/share`, file `/srv/share/hare.txt` → `.txt`
//!   - root `docs`, file `docs/deep/x.txt` → `/deep/x.txt`
//!
//! In both styles a path that does not start with the root is returned as-is.

use std::path::Path;

/// How a file's link is derived from its path and the scan root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LinkStyle {
    /// Path relative to the scan root, `/`-separated.
    #[default]
    Relative,
    /// Character-class trim of the root string, kept for output compatibility.
    Legacy,
}

/// Derive the link for `path`, a file somewhere below `base_dir`.
pub fn normalize_link(path: &Path, base_dir: &Path, style: LinkStyle) -> String {
    match style {
        LinkStyle::Relative => relative_link(path, base_dir),
        LinkStyle::Legacy => legacy_link(
            &path.to_string_lossy(),
            &base_dir.to_string_lossy(),
        ),
    }
}

fn relative_link(path: &Path, base_dir: &Path) -> String {
    match path.strip_prefix(base_dir) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

fn legacy_link(path: &str, base_dir: &str) -> String {
    if path.starts_with(base_dir) {
        path.trim_start_matches(|c: char| base_dir.contains(c))
            .to_string()
    } else {
        path.to_string()
    }
}
