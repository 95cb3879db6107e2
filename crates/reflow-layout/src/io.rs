use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

use crate::page::PagedDocument;
use crate::render::render_text;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid output root: {0}")]
    InvalidOutputRoot(String),
}

/// Write the plain-text rendering of a paged document beneath an output
/// root. Parent directories are created as needed; returns the absolute
/// path written.
pub fn write_text(
    relative_path: &RelativePath,
    output_root: &Path,
    doc: &PagedDocument,
) -> Result<PathBuf, ExportError> {
    if output_root.as_os_str().is_empty() {
        return Err(ExportError::InvalidOutputRoot(
            "output root is empty".to_string(),
        ));
    }
    let absolute_path = relative_path.to_path(output_root);
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&absolute_path, render_text(doc))?;
    Ok(absolute_path)
}
