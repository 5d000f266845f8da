//! Loading resume documents from disk for the CLI

use crate::error::{Result, ScannerError};
use crate::input::file_detector::DocumentKind;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A resume file read into memory with its detected kind.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

/// Reads a resume file, deriving the document kind from its extension.
pub async fn load_document(path: &Path) -> Result<LoadedDocument> {
    if !path.exists() {
        return Err(ScannerError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            ScannerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

    let kind = DocumentKind::from_declared(extension)?;

    info!("Reading {} resume: {}", kind.as_str(), path.display());
    let bytes = fs::read(path).await?;

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        kind,
        bytes,
    })
}
