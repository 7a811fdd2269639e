//! Layout persistence.
//!
//! Both backends only accept paths carrying the configured layout extension.
//! Saving or loading any other path is a silent no-op.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::canvas::LayoutDocument;
use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Layout not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Whether `path` ends in `.{extension}` (case-insensitive).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Layout storage backend.
pub trait LayoutStorage {
    /// Extension (without the dot) a path must carry to be accepted.
    fn extension(&self) -> &str;

    /// Write a document, unconditionally.
    fn write(&mut self, path: &Path, document: &LayoutDocument) -> StorageResult<()>;

    /// Read a document, unconditionally.
    fn read(&self, path: &Path) -> StorageResult<LayoutDocument>;

    /// Save a layout. Returns `false` without writing when the extension
    /// doesn't match.
    fn save(&mut self, path: &Path, document: &LayoutDocument) -> StorageResult<bool> {
        if !has_extension(path, self.extension()) {
            log::debug!("Not saving {}: wrong extension", path.display());
            return Ok(false);
        }
        self.write(path, document)?;
        Ok(true)
    }

    /// Load a layout. Returns `None` without reading when the extension
    /// doesn't match.
    fn load(&self, path: &Path) -> StorageResult<Option<LayoutDocument>> {
        if !has_extension(path, self.extension()) {
            log::debug!("Not loading {}: wrong extension", path.display());
            return Ok(None);
        }
        self.read(path).map(Some)
    }
}
