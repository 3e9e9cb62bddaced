//! Read-through version cache
//!
//! An in-memory cache keyed by normalized dependency coordinate sits
//! in front of the registry. Entries expire after a TTL (registry data
//! is stable, so a long one) and the map is bounded with
//! least-recently-used eviction. Writes are idempotent: overwriting a
//! key with re-fetched data is always safe, so concurrent batch tasks
//! need no coordination beyond the internal lock.

use indexmap::IndexMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::domain::Coordinate;
use crate::error::RegistryError;
use crate::registry::{ArtifactVersion, VersionSource};
use async_trait::async_trait;

/// Entries live for 24 hours; published versions rarely change
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Bounded capacity before LRU eviction kicks in
const DEFAULT_CAPACITY: usize = 2000;

struct CacheEntry {
    versions: Arc<Vec<ArtifactVersion>>,
    stored_at: Instant,
}

/// In-memory TTL + LRU cache over version lists
pub struct VersionCache {
    // IndexMap preserves insertion order; the front is always the
    // least recently used entry
    entries: Mutex<IndexMap<String, CacheEntry>>,
    ttl: Duration,
    capacity: usize,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_TTL, DEFAULT_CAPACITY)
    }

    pub fn with_config(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Look up a fresh entry, refreshing its recency on hit
    pub fn get(&self, key: &str) -> Option<Arc<Vec<ArtifactVersion>>> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() > self.ttl {
            entries.shift_remove(key);
            debug!(key, "cache entry expired");
            return None;
        }

        let versions = Arc::clone(&entry.versions);
        // Move to the back: most recently used
        if let Some(entry) = entries.shift_remove(key) {
            entries.insert(key.to_string(), entry);
        }
        Some(versions)
    }

    /// Insert or overwrite an entry, evicting the least recently used
    /// entries beyond capacity
    pub fn put(&self, key: impl Into<String>, versions: Arc<Vec<ArtifactVersion>>) {
        let key = key.into();
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        entries.shift_remove(&key);
        while entries.len() >= self.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                debug!(key = %evicted, "evicted least recently used cache entry");
            }
        }
        entries.insert(
            key,
            CacheEntry {
                versions,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VersionCache {
    fn default() -> Self {
        Self::new()
    }
}

/// A `VersionSource` that reads through a `VersionCache` before
/// hitting the wrapped source
pub struct CachedSource<S> {
    source: S,
    cache: VersionCache,
}

impl<S: VersionSource> CachedSource<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: VersionCache::new(),
        }
    }

    pub fn with_cache(source: S, cache: VersionCache) -> Self {
        Self { source, cache }
    }
}

#[async_trait]
impl<S: VersionSource> VersionSource for CachedSource<S> {
    fn registry_name(&self) -> &'static str {
        self.source.registry_name()
    }

    async fn fetch_versions(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<ArtifactVersion>, RegistryError> {
        let key = coordinate.cache_key();

        if let Some(cached) = self.cache.get(&key) {
            debug!(key, "cache hit");
            return Ok(cached.as_ref().clone());
        }

        let versions = self.source.fetch_versions(coordinate).await?;
        self.cache.put(key, Arc::new(versions.clone()));
        Ok(versions)
    }
}
