use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::Store;
use crate::error::StoreError;

/// In-memory storage backed by a `RwLock<BTreeMap>`.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Store for MemoryStore {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::new("key must not be empty"));
        }
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        Ok(self.data.read().get(key).cloned().unwrap_or_default())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.data.read().keys().cloned().collect())
    }
}
