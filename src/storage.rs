use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use sled::Db;

use crate::models::CacheEntry;

pub const CSV_DATA_KEY: &str = "manaview-csv-data";
pub const IMAGE_CACHE_KEY: &str = "manaview-image-cache";

/// A capacity-bounded, string-keyed blob store. Implementations persist
/// best-effort; callers decide whether a failure is fatal (it never is here).
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// Durable store backed by a sled database on disk.
pub struct SledStore {
    db: Db,
}

impl SledStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store dir {:?}", parent))?;
        }
        let db = sled::open(path).with_context(|| format!("failed to open store at {:?}", path))?;
        Ok(Self { db })
    }
}

impl BlobStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .db
            .get(key)
            .with_context(|| format!("failed to read store key {}", key))?;
        Ok(value.map(|ivec| ivec.as_ref().to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db
            .insert(key, value)
            .with_context(|| format!("failed to write store key {}", key))?;
        self.db
            .flush()
            .with_context(|| format!("failed to flush store key {}", key))?;
        Ok(())
    }
}

/// Volatile store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.inner.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.inner.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

pub fn load_csv_data(store: &dyn BlobStore) -> Result<Option<String>> {
    let Some(bytes) = store.get(CSV_DATA_KEY)? else {
        return Ok(None);
    };
    let text = String::from_utf8(bytes).context("persisted CSV data is not valid UTF-8")?;
    Ok(Some(text))
}

pub fn save_csv_data(store: &dyn BlobStore, csv_text: &str) -> Result<()> {
    store.put(CSV_DATA_KEY, csv_text.as_bytes())
}

pub fn load_image_cache(store: &dyn BlobStore) -> Result<HashMap<String, CacheEntry>> {
    let Some(bytes) = store.get(IMAGE_CACHE_KEY)? else {
        return Ok(HashMap::new());
    };
    serde_json::from_slice(&bytes).context("failed to deserialize image cache")
}

pub fn save_image_cache(
    store: &dyn BlobStore,
    entries: &HashMap<String, CacheEntry>,
) -> Result<()> {
    let data = serde_json::to_vec(entries).context("failed to serialize image cache")?;
    store.put(IMAGE_CACHE_KEY, &data)
}
