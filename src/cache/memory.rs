use super::{CacheEntry, CacheError, Clock, SystemClock, ThumbnailCache};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// In-process cache. Expired entries are dropped when read and on every write.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = self.clock.now();

        {
            let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        // may have been refreshed between the two locks
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }

        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let now = self.clock.now();
        let entry = CacheEntry::new(value, now, ttl_secs);
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;

        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(key.to_string(), entry);
        Ok(())
    }
}
