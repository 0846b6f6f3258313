//! Time-bounded storage for resolved thumbnail urls.
//!
//! The resolvers only see [`ThumbnailCache`]; which store sits behind it is
//! decided once at startup from [`crate::config::CacheBackend`].

pub mod file;
pub mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime of every cached thumbnail url (one day).
pub const CACHE_TTL_SECS: u64 = 86_400;

#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    #[error("cache lock poisoned")]
    Poisoned,

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),

    #[error("malformed cache entry: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Key-value store with per-entry expiry.
pub trait ThumbnailCache: Send + Sync {
    /// Returns `Ok(None)` for missing and expired entries alike.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(value: &str, now: DateTime<Utc>, ttl_secs: u64) -> Self {
        let expires_at = i64::try_from(ttl_secs)
            .ok()
            .and_then(chrono::TimeDelta::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value: value.to_string(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
