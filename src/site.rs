//! Static site assembly.
//!
//! Renders the page shell and style sheet from templates in the working
//! directory and installs them, with the static resources, into the scanned
//! root:
//!
//! ```text
//! work dir                              scan root
//! ├── template.html          ──render──▶ ├── index.html
//! └── website_resource/      ──copy────▶ └── website_resource/
//!     ├── css/style.css      ──render──▶     ├── css/style.css
//!     └── js/script.js                       ├── js/script.js
//!                                            └── listing.json   (written by crate::listing)
//! ```
//!
//! ## Placeholders
//!
//! Substitution is literal text replacement, every occurrence:
//!
//! | Placeholder | File | Value |
//! |-------------|------|-------|
//! | `$$__HEADING__$$` | `template.html` | heading |
//! | `$$__BG_COLOR__$$` | `style.css` | background color |
//! | `$$__FOLDER_COLOR__$$` | `style.css` | folder color |
//! | `$$__FILE_COLOR__$$` | `style.css` | file color |
//!
//! ## Replacement
//!
//! Both templates are read before anything in the scan root is touched. The
//! root's `website_resource/` is then deleted and copied fresh, so nothing from
//! an earlier run survives.

use crate::metadata::Metadata;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

pub const TEMPLATE_FILE: &str = "template.html";
pub const RESOURCE_DIR: &str = "website_resource";
/// Style sheet location inside [`RESOURCE_DIR`].
pub const STYLE_FILE: &str = "css/style.css";
pub const INDEX_FILE: &str = "index.html";

pub const HEADING_PLACEHOLDER: &str = "$$__HEADING__$$";
pub const BG_COLOR_PLACEHOLDER: &str = "$$__BG_COLOR__$$";
pub const FOLDER_COLOR_PLACEHOLDER: &str = "$$__FOLDER_COLOR__$$";
pub const FILE_COLOR_PLACEHOLDER: &str = "$$__FILE_COLOR__$$";

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Template file doesn't exist: {0}")]
    TemplateNotFound(PathBuf),
    #[error("Style file doesn't exist: {0}")]
    StyleNotFound(PathBuf),
    #[error("Resource directory doesn't exist: {0}")]
    ResourcesNotFound(PathBuf),
    #[error("Refusing to replace {0}: it is the source of the site resources")]
    SameResourceDir(PathBuf),
    #[error("Permission to write {0} is not granted")]
    PermissionDenied(PathBuf),
    #[error("IO error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Files produced by [`assemble`].
#[derive(Debug, Clone)]
pub struct SiteOutput {
    pub index_html: PathBuf,
    pub style_css: PathBuf,
    pub resource_dir: PathBuf,
    /// Files copied from the working directory's resources.
    pub copied_files: usize,
}

pub fn render_template(template: &str, heading: &str) -> String {
    template.replace(HEADING_PLACEHOLDER, heading)
}

pub fn render_style(style: &str, metadata: &Metadata) -> String {
    style
        .replace(BG_COLOR_PLACEHOLDER, &metadata.background_color)
        .replace(FOLDER_COLOR_PLACEHOLDER, &metadata.folder_color)
        .replace(FILE_COLOR_PLACEHOLDER, &metadata.file_color)
}

pub fn load_template(work_dir: &Path) -> Result<String, SiteError> {
    let path = work_dir.join(TEMPLATE_FILE);
    read_input(&path, SiteError::TemplateNotFound)
}

pub fn load_style(work_dir: &Path) -> Result<String, SiteError> {
    let path = work_dir.join(RESOURCE_DIR).join(STYLE_FILE);
    read_input(&path, SiteError::StyleNotFound)
}

fn read_input(path: &Path, not_found: fn(PathBuf) -> SiteError) -> Result<String, SiteError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            not_found(path.to_path_buf())
        } else {
            io_error(path, source)
        }
    })
}

/// Render the templates from `work_dir` with `metadata` and install the site
/// into `dest_root`.
pub fn assemble(
    work_dir: &Path,
    dest_root: &Path,
    metadata: &Metadata,
) -> Result<SiteOutput, SiteError> {
    let template = render_template(&load_template(work_dir)?, &metadata.heading);
    let style = render_style(&load_style(work_dir)?, metadata);

    let resource_dir = dest_root.join(RESOURCE_DIR);
    let copied_files = replace_resource_dir(&work_dir.join(RESOURCE_DIR), &resource_dir)?;

    let index_html = dest_root.join(INDEX_FILE);
    write_file(&index_html, &template)?;

    let style_css = resource_dir.join(STYLE_FILE);
    write_file(&style_css, &style)?;

    Ok(SiteOutput {
        index_html,
        style_css,
        resource_dir,
        copied_files,
    })
}

/// Delete `dest` if present, then copy the `source` tree into it.
///
/// Returns the number of files copied.
pub fn replace_resource_dir(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    if !source.is_dir() {
        return Err(SiteError::ResourcesNotFound(source.to_path_buf()));
    }
    if dest.exists() && same_dir(source, dest)? {
        return Err(SiteError::SameResourceDir(dest.to_path_buf()));
    }

    if dest.is_dir() {
        debug!(path = %dest.display(), "removing previous resource directory");
        fs::remove_dir_all(dest).map_err(|e| io_error(dest, e))?;
    } else if dest.exists() {
        fs::remove_file(dest).map_err(|e| io_error(dest, e))?;
    }

    copy_tree(source, dest)
}

fn same_dir(a: &Path, b: &Path) -> Result<bool, SiteError> {
    let a = fs::canonicalize(a).map_err(|e| io_error(a, e))?;
    let b = fs::canonicalize(b).map_err(|e| io_error(b, e))?;
    Ok(a == b)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(walk_error)?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| io_error(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| io_error(&target, e))?;
            copied += 1;
        }
    }
    debug!(copied, from = %src.display(), to = %dst.display(), "copied resources");
    Ok(copied)
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: io::Error) -> SiteError {
    if source.kind() == io::ErrorKind::PermissionDenied {
        SiteError::PermissionDenied(path.to_path_buf())
    } else {
        SiteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn walk_error(err: walkdir::Error) -> SiteError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop while copying resources"));
    io_error(&path, source)
}
