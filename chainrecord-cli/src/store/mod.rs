pub mod sled_store;

use std::sync::Arc;

use chainrecord_lib::{MemoryStore, Store, StoreError};
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};

use self::sled_store::SledStore;

/// Open the configured storage backend.
pub fn open(config: &StorageConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.backend {
        StorageBackend::Sled => {
            info!(data_dir = %config.data_dir, "opening sled store");
            Ok(Arc::new(SledStore::open(&config.data_dir)?))
        }
        StorageBackend::Memory => {
            info!("using in-memory store, state is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Name of the backend, for logs and metrics labels.
pub fn backend_name(backend: StorageBackend) -> &'static str {
    match backend {
        StorageBackend::Sled => "sled",
        StorageBackend::Memory => "memory",
    }
}
