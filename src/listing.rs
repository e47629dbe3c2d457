//! `listing.json`: the tree as the page script loads it.
//!
//! Written as one compact JSON document next to the other resources, at
//! `<root>/website_resource/listing.json`. See [`Node`] for the field layout.

use crate::site::RESOURCE_DIR;
use crate::tree::Node;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LISTING_FILE: &str = "listing.json";

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the listing for a scan of `root` lives.
pub fn listing_path(root: &Path) -> PathBuf {
    root.join(RESOURCE_DIR).join(LISTING_FILE)
}

/// Serialize `tree` and write it under `root`, returning the file path.
pub fn write_listing(root: &Path, tree: &Node) -> Result<PathBuf, ListingError> {
    let path = listing_path(root);
    let json = serde_json::to_string(tree)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ListingError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, json).map_err(|source| ListingError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Parse a listing file back into a tree.
pub fn read_listing(path: &Path) -> Result<Node, ListingError> {
    let content = fs::read_to_string(path).map_err(|source| ListingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::tree::{TraverseOptions, build_tree};
    use tempfile::TempDir;

    #[test]
    fn listing_path_is_inside_resource_dir() {
        assert_eq!(
            listing_path(Path::new("/srv/share")),
            PathBuf::from("/srv/share/website_resource/listing.json")
        );
    }

    #[test]
    fn write_creates_resource_dir() {
        let tmp = TempDir::new().unwrap();
        let tree = Node::folder("R", 1, vec![]);
        let path = write_listing(tmp.path(), &tree).unwrap();
        assert!(path.is_file());
        assert_eq!(path, listing_path(tmp.path()));
    }

    #[test]
    fn written_listing_is_compact() {
        let tmp = TempDir::new().unwrap();
        let tree = Node::folder("R", 1, vec![Node::file("a.txt", 2, "a.txt")]);
        let path = write_listing(tmp.path(), &tree).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(!content.contains('\n'));
        assert!(!content.contains(": "));
    }

    #[test]
    fn round_trip_of_scanned_tree() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("share");
        make_tree(
            &root,
            &["a.txt", "docs/readme.md", "docs/img/logo.svg", "empty/", "ünï côdé.txt"],
        );
        let tree = build_tree(&root, &TraverseOptions::default()).unwrap();

        // The listing goes into the scanned root; scan first, then write.
        let out = TempDir::new().unwrap();
        let path = write_listing(out.path(), &tree).unwrap();
        let parsed = read_listing(&path).unwrap();

        assert_eq!(parsed, tree);
    }

    #[test]
    fn read_missing_listing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = read_listing(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(ListingError::Io { .. })));
    }

    #[test]
    fn read_invalid_listing_is_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(LISTING_FILE);
        fs::write(&path, r#"{"title":"x","folder":false,"key":1}"#).unwrap();
        assert!(matches!(read_listing(&path), Err(ListingError::Json(_))));
    }
}
