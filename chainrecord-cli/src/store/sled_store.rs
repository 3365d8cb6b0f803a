use chainrecord_lib::{Store, StoreError};

/// Persistent record storage backed by sled.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn new(db: sled::Db) -> Self {
        Self { db }
    }

    /// Open a sled database at the given directory path.
    pub fn open(data_dir: &str) -> Result<Self, StoreError> {
        let db = sled::open(data_dir)
            .map_err(|e| StoreError::new(format!("failed to open sled db: {}", e)))?;
        Ok(Self::new(db))
    }
}

impl Store for SledStore {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if key.is_empty() {
            return Err(StoreError::new("key must not be empty"));
        }

        self.db
            .insert(key, value)
            .map_err(|e| StoreError::new(format!("failed to store {}: {}", key, e)))?;

        self.db
            .flush()
            .map_err(|e| StoreError::new(format!("failed to flush: {}", e)))?;

        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let value = self
            .db
            .get(key)
            .map_err(|e| StoreError::new(format!("failed to read {}: {}", key, e)))?;
        Ok(value.map(|ivec| ivec.to_vec()).unwrap_or_default())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.db
            .iter()
            .keys()
            .map(|item| {
                let key = item.map_err(|e| StoreError::new(format!("failed to read key: {}", e)))?;
                String::from_utf8(key.to_vec())
                    .map_err(|e| StoreError::new(format!("invalid key encoding: {}", e)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainrecord_lib::dispatch::{invoke, query};

    fn marketer(eid: &str) -> Vec<String> {
        let mut v: Vec<String> = (0..24).map(|i| format!("m{}", i)).collect();
        v[0] = eid.to_string();
        v
    }

    #[test]
    fn test_absent_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open(dir.path().to_str().unwrap()).unwrap();
        assert!(store.get("missing").unwrap().is_empty());
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();
        {
            let store = SledStore::open(&path).unwrap();
            invoke(&store, "write", &marketer("E1")).unwrap();
        }
        let store = SledStore::open(&path).unwrap();
        assert!(query(&store, "read", &["E1".to_string()]).is_ok());
        assert!(invoke(&store, "write", &marketer("E1")).is_err());
        assert_eq!(store.keys().unwrap(), vec!["E1".to_string()]);
    }

    #[test]
    fn test_empty_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open(dir.path().to_str().unwrap()).unwrap();
        assert!(store.put("", b"x").is_err());
    }
}
