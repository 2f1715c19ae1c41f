//! In-memory store (for testing)

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::traits::{validate_name, FileStore};

/// Not persistent: contents are lost on drop.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn put(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        validate_name(name)?;
        self.files.write().insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn get(&self, name: &str) -> StorageResult<Vec<u8>> {
        validate_name(name)?;
        self.files
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.files.read().keys().cloned().collect())
    }
}
