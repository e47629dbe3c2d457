//! Directory traversal and the keyed node tree.
//!
//! Walks a directory and builds an in-memory [`Node`] tree that mirrors it.
//! Each node gets a key from the builder's [`KeyGenerator`] in pre-order: a
//! folder takes its key before any of its entries are visited, and a sibling's
//! whole subtree is numbered before the next sibling starts.
//!
//! ```text
//! R/                 key 1   folder
//! ├── a.txt          key 2   file, link "a.txt"
//! └── sub/           key 3   folder
//!     └── b.txt      key 4   file, link "sub/b.txt"
//! ```
//!
//! ## Entries
//!
//! - **Directories** recurse and become folder nodes.
//! - **Regular files** become file nodes with a link (see [`crate::links`]).
//! - **Anything else** (symlinks, sockets, FIFOs, devices) is skipped with a
//!   warning. Symlinks are never followed.
//!
//! ## Order
//!
//! By default children keep the order the platform's directory listing returns,
//! with folders and files interleaved. [`EntryOrder::FoldersFirst`] sorts each
//! listing (folders first, then by name) for reproducible output.
//!
//! Every listing is collected in full before descending, so only one directory
//! handle is open at a time regardless of depth.

use crate::keys::KeyGenerator;
use crate::links::{LinkStyle, normalize_link};
use serde::{Deserialize, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot inspect {path}: {source}")]
    Entry {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One entry of the generated tree.
///
/// Serializes to the listing format consumed by the page script:
///
/// ```json
/// {"title":"R","folder":true,"children":[{"title":"a.txt","folder":false,"key":2,"link":"a.txt"}],"key":1}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireNode")]
pub struct Node {
    pub title: String,
    pub key: u64,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder { children: Vec<Node> },
    File { link: String },
}

impl Node {
    pub fn folder(title: impl Into<String>, key: u64, children: Vec<Node>) -> Self {
        Self {
            title: title.into(),
            key,
            kind: NodeKind::Folder { children },
        }
    }

    pub fn file(title: impl Into<String>, key: u64, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key,
            kind: NodeKind::File { link: link.into() },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Child nodes; always empty for files.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn link(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Folder { .. } => None,
            NodeKind::File { link } => Some(link),
        }
    }

    /// First direct child with the given title.
    pub fn find_child(&self, title: &str) -> Option<&Node> {
        self.children().iter().find(|c| c.title == title)
    }

    /// Pre-order walk of this subtree, yielding `(depth, node)` with the
    /// receiver at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    /// Pre-order iterator over this subtree's nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.walk().map(|(_, node)| node)
    }
}

/// Pre-order iterator returned by [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}

// =============================================================================
// Listing format
// =============================================================================

#[derive(Serialize)]
struct NodeRef<'a> {
    title: &'a str,
    folder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a [Node]>,
    key: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (children, link) = match &self.kind {
            NodeKind::Folder { children } => (Some(children.as_slice()), None),
            NodeKind::File { link } => (None, Some(link.as_str())),
        };
        NodeRef {
            title: &self.title,
            folder: self.is_folder(),
            children,
            key: self.key,
            link,
        }
        .serialize(serializer)
    }
}

#[derive(Deserialize)]
struct WireNode {
    title: String,
    folder: bool,
    #[serde(default)]
    children: Option<Vec<Node>>,
    key: u64,
    #[serde(default)]
    link: Option<String>,
}

impl TryFrom<WireNode> for Node {
    type Error = String;

    fn try_from(wire: WireNode) -> Result<Self, Self::Error> {
        match (wire.folder, wire.children, wire.link) {
            (true, Some(children), None) => Ok(Node::folder(wire.title, wire.key, children)),
            (false, None, Some(link)) => Ok(Node::file(wire.title, wire.key, link)),
            (true, _, _) => Err(format!(
                "folder node {} ({}) must have children and no link",
                wire.key, wire.title
            )),
            (false, _, _) => Err(format!(
                "file node {} ({}) must have a link and no children",
                wire.key, wire.title
            )),
        }
    }
}

// =============================================================================
// Traversal
// =============================================================================

/// Order in which a directory's entries become children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EntryOrder {
    /// Whatever order the directory listing returns.
    #[default]
    Filesystem,
    /// Folders before files, each group sorted by name.
    FoldersFirst,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TraverseOptions {
    pub order: EntryOrder,
    pub links: LinkStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EntryKind {
    Dir,
    File,
}

struct Entry {
    name: String,
    path: PathBuf,
    kind: EntryKind,
}

/// Builds node trees, owning the key counter for the traversal.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    keys: KeyGenerator,
    options: TraverseOptions,
}

impl TreeBuilder {
    pub fn new(options: TraverseOptions) -> Self {
        Self {
            keys: KeyGenerator::new(),
            options,
        }
    }

    /// Build the folder node for `path`, recursing into sub-directories.
    ///
    /// `path` must be an existing directory. `base_dir` stays the same for the
    /// whole traversal and is only used to derive file links.
    pub fn traverse(&mut self, path: &Path, base_dir: &Path) -> Result<Node, TreeError> {
        let key = self.keys.next_key();
        debug!(key, path = %path.display(), "entering directory");

        let entries = self.list_entries(path)?;
        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let child = match entry.kind {
                EntryKind::Dir => self.traverse(&entry.path, base_dir)?,
                EntryKind::File => {
                    let link = normalize_link(&entry.path, base_dir, self.options.links);
                    Node::file(entry.name, self.keys.next_key(), link)
                }
            };
            children.push(child);
        }

        Ok(Node::folder(folder_title(path), key, children))
    }

    /// Keys handed out so far by this builder.
    pub fn keys_issued(&self) -> u64 {
        self.keys.issued()
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<Entry>, TreeError> {
        let read_dir_error = |source: std::io::Error| TreeError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| TreeError::Entry {
                path: path.clone(),
                source,
            })?;

            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                warn!(path = %path.display(), "skipping entry that is neither a file nor a directory");
                continue;
            };

            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }

        if self.options.order == EntryOrder::FoldersFirst {
            entries.sort_by(|a, b| (a.kind, &a.name).cmp(&(b.kind, &b.name)));
        }
        Ok(entries)
    }
}

/// Build the tree for `root` with a fresh key counter.
pub fn build_tree(root: &Path, options: &TraverseOptions) -> Result<Node, TreeError> {
    TreeBuilder::new(*options).traverse(root, root)
}

/// Title of a folder: its last path component, or the whole path when there is
/// none (`/`, `..`).
fn folder_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// =============================================================================
// Stats
// =============================================================================

/// Counts over a built tree, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub folders: usize,
    pub files: usize,
    /// Deepest nesting level below the root (0 for an empty root).
    pub max_depth: usize,
    pub max_key: u64,
}

impl TreeStats {
    pub fn of(root: &Node) -> Self {
        root.walk().fold(Self::default(), |mut stats, (depth, node)| {
            if node.is_folder() {
                stats.folders += 1;
            } else {
                stats.files += 1;
            }
            stats.max_depth = stats.max_depth.max(depth);
            stats.max_key = stats.max_key.max(node.key);
            stats
        })
    }

    pub fn nodes(&self) -> usize {
        self.folders + self.files
    }
}
