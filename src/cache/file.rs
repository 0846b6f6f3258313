use super::{CacheEntry, CacheError, Clock, SystemClock, ThumbnailCache};
use crate::storage::{BackendLocal, StorageManager};
use std::sync::Arc;

/// Cache that survives restarts: one json document per key.
pub struct FileCache {
    store: Box<dyn StorageManager>,
    clock: Arc<dyn Clock>,
}

impl FileCache {
    pub fn new(dir: &str) -> std::io::Result<Self> {
        Ok(Self::with_store(
            Box::new(BackendLocal::new(dir)?),
            Arc::new(SystemClock),
        ))
    }

    pub fn with_store(store: Box<dyn StorageManager>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Keys embed ids taken from urls, so they are percent-encoded before
    /// touching the filesystem.
    fn ident(key: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        format!("{encoded}.json")
    }
}

impl ThumbnailCache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let ident = Self::ident(key);
        if !self.store.exists(&ident) {
            return Ok(None);
        }

        let bytes = self.store.read(&ident)?;
        let entry: CacheEntry = serde_json::from_slice(&bytes)?;

        if entry.is_expired(self.clock.now()) {
            log::debug!("cache key={key} outcome=expired");
            self.store.delete(&ident)?;
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let entry = CacheEntry::new(value, self.clock.now(), ttl_secs);
        let bytes = serde_json::to_vec(&entry)?;
        self.store.write(&Self::ident(key), &bytes)?;
        Ok(())
    }
}
