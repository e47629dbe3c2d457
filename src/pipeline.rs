//! One complete run: scan, assemble, write.
//!
//! ```text
//! 1. Validate   --dir must be an existing directory
//! 2. Scan       root/           →  Node tree       (crate::tree)
//! 3. Assemble   metadata.json   →  index.html, website_resource/  (crate::site)
//! 4. Write      Node tree       →  website_resource/listing.json  (crate::listing)
//! ```
//!
//! The scan runs before the site is assembled, so a `website_resource/` or
//! `index.html` left in the root by an earlier run shows up in the tree like
//! any other entry. The listing is written last because step 3 replaces the
//! directory it lives in. Any failure stops the run; files already written
//! stay as they are.

use crate::listing::{self, ListingError};
use crate::metadata::{self, MetadataError};
use crate::site::{self, SiteError, SiteOutput};
use crate::tree::{self, Node, TraverseOptions, TreeError, TreeStats};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("No directory provided: {0} is not a directory")]
    InvalidRoot(PathBuf),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error(transparent)]
    Listing(#[from] ListingError),
}

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory to index; receives `index.html` and `website_resource/`.
    pub root: PathBuf,
    /// Directory holding `metadata.json`, `template.html` and the resources.
    pub work_dir: PathBuf,
    pub traverse: TraverseOptions,
}

impl BuildOptions {
    pub fn new(root: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            work_dir: work_dir.into(),
            traverse: TraverseOptions::default(),
        }
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct BuildReport {
    pub tree: Node,
    pub stats: TreeStats,
    pub site: SiteOutput,
    pub listing: PathBuf,
}

pub fn build(options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let root = options.root.as_path();
    validate_root(root)?;

    info!(root = %root.display(), "scanning");
    let tree = tree::build_tree(root, &options.traverse)?;
    let stats = TreeStats::of(&tree);

    info!(work_dir = %options.work_dir.display(), "assembling site");
    let metadata = metadata::load_metadata(&options.work_dir)?;
    let site = site::assemble(&options.work_dir, root, &metadata)?;

    let listing = listing::write_listing(root, &tree)?;
    info!(path = %listing.display(), nodes = stats.nodes(), "listing written");

    Ok(BuildReport {
        tree,
        stats,
        site,
        listing,
    })
}

fn validate_root(root: &Path) -> Result<(), BuildError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(BuildError::InvalidRoot(root.to_path_buf()))
    }
}
