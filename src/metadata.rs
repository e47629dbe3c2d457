//! Page metadata: heading and colors.
//!
//! Read from `metadata.json` in the working directory:
//!
//! ```json
//! {
//!     "heading": "Shared Drive",
//!     "background_color": "aliceblue",
//!     "folder_color": "#00b894",
//!     "file_color": "#ff5252"
//! }
//! ```
//!
//! All four keys must be present. An empty string means "use the default":
//!
//! | Key | Default |
//! |-----|---------|
//! | `heading` | `Index` |
//! | `background_color` | `aliceblue` |
//! | `folder_color` | `#00b894` |
//! | `file_color` | `#ff5252` |
//!
//! Other keys are ignored. A missing file or a missing key is an error.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const METADATA_FILE: &str = "metadata.json";

pub const DEFAULT_HEADING: &str = "Index";
pub const DEFAULT_BACKGROUND_COLOR: &str = "aliceblue";
pub const DEFAULT_FOLDER_COLOR: &str = "#00b894";
pub const DEFAULT_FILE_COLOR: &str = "#ff5252";

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata file doesn't exist: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid metadata: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Metadata key '{0}' is missing")]
    MissingKey(&'static str),
}

/// Resolved page metadata, defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub heading: String,
    pub background_color: String,
    pub folder_color: String,
    pub file_color: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            heading: DEFAULT_HEADING.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            folder_color: DEFAULT_FOLDER_COLOR.to_string(),
            file_color: DEFAULT_FILE_COLOR.to_string(),
        }
    }
}

/// The file as written: keys may be absent, values may be empty.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    heading: Option<String>,
    background_color: Option<String>,
    folder_color: Option<String>,
    file_color: Option<String>,
}

/// Load and resolve `metadata.json` from `dir`.
pub fn load_metadata(dir: &Path) -> Result<Metadata, MetadataError> {
    let path = dir.join(METADATA_FILE);
    let content = fs::read_to_string(&path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            MetadataError::NotFound(path.clone())
        } else {
            MetadataError::Io {
                path: path.clone(),
                source,
            }
        }
    })?;
    parse_metadata(&content)
}

/// Parse metadata JSON, requiring every key and applying defaults for empty
/// values.
pub fn parse_metadata(json: &str) -> Result<Metadata, MetadataError> {
    let raw: RawMetadata = serde_json::from_str(json)?;
    Ok(Metadata {
        heading: required(raw.heading, "heading", DEFAULT_HEADING)?,
        background_color: required(
            raw.background_color,
            "background_color",
            DEFAULT_BACKGROUND_COLOR,
        )?,
        folder_color: required(raw.folder_color, "folder_color", DEFAULT_FOLDER_COLOR)?,
        file_color: required(raw.file_color, "file_color", DEFAULT_FILE_COLOR)?,
    })
}

fn required(
    value: Option<String>,
    key: &'static str,
    default: &str,
) -> Result<String, MetadataError> {
    value
        .map(|v| resolve(v, default))
        .ok_or(MetadataError::MissingKey(key))
}

/// An empty value falls back to `default`. Whitespace is kept as given.
pub fn resolve(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
