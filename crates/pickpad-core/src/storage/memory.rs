//! In-memory layout storage.

use super::{LayoutStorage, StorageError, StorageResult};
use crate::canvas::LayoutDocument;
use crate::config::DEFAULT_LAYOUT_EXTENSION;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory storage for testing and ephemeral use.
///
/// Documents go through JSON like they would on disk, so a round trip here
/// exercises the same serialization as [`FileStorage`](super::FileStorage).
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    extension: String,
    documents: HashMap<PathBuf, String>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT_EXTENSION)
    }
}

impl MemoryStorage {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            documents: HashMap::new(),
        }
    }

    /// Raw stored JSON for `path`.
    pub fn raw(&self, path: &Path) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }

    /// Store raw text at `path`, bypassing serialization.
    pub fn insert_raw(&mut self, path: impl Into<PathBuf>, json: impl Into<String>) {
        self.documents.insert(path.into(), json.into());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl LayoutStorage for MemoryStorage {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn write(&mut self, path: &Path, document: &LayoutDocument) -> StorageResult<()> {
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.documents.insert(path.to_path_buf(), json);
        Ok(())
    }

    fn read(&self, path: &Path) -> StorageResult<LayoutDocument> {
        let json = self
            .documents
            .get(path)
            .ok_or_else(|| StorageError::NotFound(path.display().to_string()))?;
        LayoutDocument::from_json(json).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load() {
        let mut storage = MemoryStorage::default();
        let path = Path::new("a.pickpad");
        assert!(storage.save(path, &LayoutDocument::default()).unwrap());
        assert_eq!(storage.load(path).unwrap(), Some(LayoutDocument::default()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_wrong_extension() {
        let mut storage = MemoryStorage::default();
        assert!(!storage.save(Path::new("a.txt"), &LayoutDocument::default()).unwrap());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::default();
        let result = storage.load(Path::new("missing.pickpad"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_entry() {
        let mut storage = MemoryStorage::default();
        storage.insert_raw("bad.pickpad", "not json");
        let result = storage.load(Path::new("bad.pickpad"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
        assert_eq!(storage.raw(Path::new("bad.pickpad")), Some("not json"));
    }
}
