//! Bounded chat -> locale cache with least-recently-used eviction.

use fruitbot_core::error::FruitbotError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-local locale cache. Not durable; rebuilt from the store on demand.
///
/// All access goes through one mutex, so concurrent resolutions never corrupt
/// the recency list and a reader sees a whole value or nothing.
pub struct LocaleCache {
    inner: Mutex<LruCache<i64, String>>,
}

impl LocaleCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Build a cache from a configured capacity, rejecting zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, FruitbotError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            FruitbotError::Config("locale cache capacity must be greater than zero".into())
        })?;
        Ok(Self::new(capacity))
    }

    /// Look up without touching recency.
    pub fn peek(&self, chat_id: i64) -> Option<String> {
        self.lock().peek(&chat_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Look up and mark the entry as most recently used.
    pub(crate) fn get(&self, chat_id: i64) -> Option<String> {
        self.lock().get(&chat_id).cloned()
    }

    /// Insert or overwrite, evicting the least recently used entry when full.
    pub(crate) fn insert(&self, chat_id: i64, locale: &str) {
        self.lock().put(chat_id, locale.to_string());
    }

    /// Insert only if `chat_id` has no entry, returning whatever the cache
    /// holds afterwards. An existing entry is left untouched and refreshed.
    pub(crate) fn insert_if_absent(&self, chat_id: i64, locale: &str) -> String {
        let mut cache = self.lock();
        if let Some(existing) = cache.get(&chat_id) {
            return existing.clone();
        }
        cache.put(chat_id, locale.to_string());
        locale.to_string()
    }

    // Entries are replaced whole, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, LruCache<i64, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
