pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;

/// Key-value state the records live in. Implementations must be thread-safe.
///
/// All record kinds share one namespace; a key says nothing about the kind of
/// value stored under it.
pub trait Store: Send + Sync {
    /// Store `value` under `key`, replacing whatever was there.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Raw value for `key`. An absent key yields an empty vec, not an error.
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// All keys currently holding a value, in ascending order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).get(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}
