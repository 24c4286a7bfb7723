use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::{
    models::CacheEntry,
    scryfall::ImageResolver,
    storage::{load_image_cache, save_image_cache, BlobStore},
};

pub const CACHE_EXPIRY_DAYS: i64 = 7;

/// Identifier -> image URL cache with a time-based expiry policy.
///
/// Loaded once at construction with expired entries dropped; every successful
/// resolution writes a fresh entry straight through to the store. Concurrent
/// lookups for the same identifier are not deduplicated; they converge on the
/// same entry, last writer wins.
pub struct ImageCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    store: Arc<dyn BlobStore>,
    resolver: Box<dyn ImageResolver>,
}

impl ImageCache {
    pub fn new(store: Arc<dyn BlobStore>, resolver: Box<dyn ImageResolver>) -> Self {
        Self::load_at(store, resolver, Utc::now())
    }

    fn load_at(
        store: Arc<dyn BlobStore>,
        resolver: Box<dyn ImageResolver>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut entries = match load_image_cache(store.as_ref()) {
            Ok(entries) => entries,
            Err(err) => {
                eprintln!("warning: failed to load image cache: {err:#}");
                HashMap::new()
            }
        };
        let cutoff = now - Duration::days(CACHE_EXPIRY_DAYS);
        entries.retain(|_, entry| entry.updated_at > cutoff);
        Self {
            entries: Mutex::new(entries),
            store,
            resolver,
        }
    }

    /// Returns the image URL for an identifier, resolving and caching on a
    /// miss. Resolution failures degrade to None and leave no entry behind,
    /// so a later call retries.
    pub fn get_image(&self, id: &str) -> Option<String> {
        self.get_image_at(id, Utc::now())
    }

    fn get_image_at(&self, id: &str, now: DateTime<Utc>) -> Option<String> {
        if id.is_empty() {
            return None;
        }

        let cutoff = now - Duration::days(CACHE_EXPIRY_DAYS);
        if let Some(entry) = self.entries.lock().get(id) {
            if entry.updated_at > cutoff {
                return Some(entry.img.clone());
            }
        }

        match self.resolver.resolve(id) {
            Ok(url) => {
                let mut guard = self.entries.lock();
                guard.insert(
                    id.to_string(),
                    CacheEntry {
                        img: url.clone(),
                        updated_at: now,
                    },
                );
                if let Err(err) = save_image_cache(self.store.as_ref(), &guard) {
                    eprintln!("warning: failed to persist image cache: {err:#}");
                }
                Some(url)
            }
            Err(err) => {
                eprintln!("warning: failed to fetch image for {id}: {err:#}");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, IMAGE_CACHE_KEY};
    use anyhow::bail;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeResolver {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ImageResolver for FakeResolver {
        fn resolve(&self, id: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                bail!("resolver down");
            }
            Ok(format!("https://img/{id}.jpg"))
        }
    }

    fn cache_with(
        store: Arc<MemoryStore>,
        fail: bool,
    ) -> (ImageCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = FakeResolver {
            calls: calls.clone(),
            fail,
        };
        (
            ImageCache::new(store, Box::new(resolver)),
            calls,
        )
    }

    #[test]
    fn empty_identifier_short_circuits() {
        let (cache, calls) = cache_with(Arc::new(MemoryStore::new()), false);
        assert_eq!(cache.get_image(""), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn second_lookup_within_ttl_hits_the_cache() {
        let (cache, calls) = cache_with(Arc::new(MemoryStore::new()), false);
        let url = cache.get_image("abc").unwrap();
        assert_eq!(url, "https://img/abc.jpg");
        assert_eq!(cache.get_image("abc").unwrap(), url);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn expired_entry_is_resolved_again() {
        let (cache, calls) = cache_with(Arc::new(MemoryStore::new()), false);
        let now = Utc::now();
        cache.get_image_at("abc", now);
        let later = now + Duration::days(CACHE_EXPIRY_DAYS) + Duration::seconds(1);
        cache.get_image_at("abc", later);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // Within the window the entry is still served without a call.
        cache.get_image_at("abc", later + Duration::days(6));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failure_leaves_no_tombstone() {
        let (cache, calls) = cache_with(Arc::new(MemoryStore::new()), true);
        assert_eq!(cache.get_image("abc"), None);
        assert_eq!(cache.get_image("abc"), None);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn successful_resolutions_write_through_to_the_store() {
        let store = Arc::new(MemoryStore::new());
        let (cache, _) = cache_with(store.clone(), false);
        cache.get_image("abc");
        assert!(store.get(IMAGE_CACHE_KEY).unwrap().is_some());

        // A fresh cache over the same store serves the entry without resolving.
        let (reloaded, calls) = cache_with(store, false);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get_image("abc").unwrap(), "https://img/abc.jpg");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn load_drops_entries_older_than_ttl() {
        let store = Arc::new(MemoryStore::new());
        let mut entries = HashMap::new();
        entries.insert(
            "stale".to_string(),
            CacheEntry {
                img: "https://img/stale.jpg".to_string(),
                updated_at: Utc::now() - Duration::days(CACHE_EXPIRY_DAYS + 1),
            },
        );
        entries.insert(
            "fresh".to_string(),
            CacheEntry {
                img: "https://img/fresh.jpg".to_string(),
                updated_at: Utc::now(),
            },
        );
        save_image_cache(store.as_ref(), &entries).unwrap();

        let (cache, _) = cache_with(store, false);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get_image("fresh"),
            Some("https://img/fresh.jpg".to_string())
        );
    }
}
