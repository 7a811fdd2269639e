//! File-based layout storage.

use super::{LayoutStorage, StorageError, StorageResult};
use crate::canvas::LayoutDocument;
use crate::config::DEFAULT_LAYOUT_EXTENSION;
use std::fs;
use std::path::Path;

/// Stores layouts as JSON files at caller-chosen paths.
#[derive(Debug, Clone)]
pub struct FileStorage {
    extension: String,
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_EXTENSION)
    }
}

impl FileStorage {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl LayoutStorage for FileStorage {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn write(&mut self, path: &Path, document: &LayoutDocument) -> StorageResult<()> {
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::info!("Saved layout to {}", path.display());
        Ok(())
    }

    fn read(&self, path: &Path) -> StorageResult<LayoutDocument> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }
        let json = fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        LayoutDocument::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
