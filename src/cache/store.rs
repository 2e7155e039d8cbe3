// Cache store - fingerprinting, lookup and persistence of translated commands
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{CacheConfig, CacheEntry, CacheStats};
use crate::client::RequestParams;
use crate::error::Result;
use chrono::{DateTime, Duration, Local};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CACHE_FILE: &str = "cache.json";

/// Generate the SHA256 cache key for a request.
///
/// The API key is never part of the fingerprint: requests that differ only
/// by key share a cache entry, and the key is never written to disk.
pub fn fingerprint(query: &str, api_url: &str, provider: Option<&str>, model: Option<&str>) -> String {
    let cache_string = format!(
        "{}|{}|{}|{}",
        query,
        api_url,
        provider.unwrap_or_default(),
        model.unwrap_or_default()
    );

    let mut hasher = Sha256::new();
    hasher.update(cache_string.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// File-backed cache of translated commands.
///
/// Every operation reads `cache.json`, applies its change and writes the file
/// back. I/O and parse failures never reach the caller: an unreadable cache
/// is an empty cache, and a failed write only costs a future cache miss.
pub struct CacheStore {
    path: PathBuf,
    config: CacheConfig,
}

impl CacheStore {
    /// Create a cache store persisting to `<dir>/cache.json`
    pub fn new(dir: &Path, config: CacheConfig) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Returns the cached command for this request, if present and fresh.
    pub fn lookup(&self, query: &str, params: &RequestParams) -> Option<String> {
        self.lookup_at(query, params, Local::now())
    }

    /// Same as [`CacheStore::lookup`], evaluated at `now`.
    ///
    /// A stale entry is removed from the file before reporting a miss.
    pub fn lookup_at(&self, query: &str, params: &RequestParams, now: DateTime<Local>) -> Option<String> {
        if !self.config.enabled {
            debug!("Caching disabled");
            return None;
        }

        let mut entries = self.load();
        let key = params.fingerprint(query);

        let entry = match entries.get(&key) {
            Some(entry) => entry,
            None => {
                debug!("Cache miss for key: {}", &key[..16]);
                return None;
            }
        };

        if self.is_expired(entry, now) {
            debug!("Cache entry expired: {}", &key[..16]);
            entries.remove(&key);
            self.save(&entries);
            return None;
        }

        debug!("Cache hit: {}", &key[..16]);
        Some(entry.command.clone())
    }

    /// Stores a translated command, evicting the oldest entries beyond `max_size`.
    pub fn store(&self, query: &str, command: &str, params: &RequestParams) {
        self.store_at(query, command, params, Local::now());
    }

    /// Same as [`CacheStore::store`], stamping the entry with `now`.
    pub fn store_at(&self, query: &str, command: &str, params: &RequestParams, now: DateTime<Local>) {
        if !self.config.enabled {
            return;
        }

        let mut entries = self.load();
        let key = params.fingerprint(query);

        entries.insert(
            key,
            CacheEntry {
                timestamp: now,
                query: query.to_string(),
                command: command.to_string(),
                api_url: params.api_url.clone(),
                provider: params.provider.clone(),
                model: params.model.clone(),
            },
        );

        let entries = Self::evict_oldest(entries, self.config.max_size);
        self.save(&entries);
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Cache cleared"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.load();

        CacheStats {
            size: entries.len(),
            oldest_entry: entries.values().map(|e| e.timestamp).min(),
            newest_entry: entries.values().map(|e| e.timestamp).max(),
        }
    }

    /// An entry is fresh while its age is at most `ttl`; future timestamps are fresh.
    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Local>) -> bool {
        let ttl = i64::try_from(self.config.ttl)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        now.signed_duration_since(entry.timestamp) > ttl
    }

    /// Keep only the `max_size` most recent entries.
    fn evict_oldest(entries: HashMap<String, CacheEntry>, max_size: usize) -> HashMap<String, CacheEntry> {
        if entries.len() <= max_size {
            return entries;
        }

        let mut sorted: Vec<_> = entries.into_iter().collect();
        sorted.sort_by_key(|(_, entry)| entry.timestamp);

        let evicted = sorted.len() - max_size;
        debug!("Evicting {} cache entries", evicted);
        sorted.into_iter().skip(evicted).collect()
    }

    fn load(&self) -> HashMap<String, CacheEntry> {
        match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable cache {}: {}", self.path.display(), e);
                HashMap::new()
            }
        }
    }

    /// Reads the cache file, discarding entries that fail to parse
    /// (including those with a missing or invalid timestamp).
    fn read_entries(&self) -> Result<HashMap<String, CacheEntry>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&contents)?;

        let entries = raw
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    debug!("Discarding invalid cache entry {}: {}", key, e);
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    fn save(&self, entries: &HashMap<String, CacheEntry>) {
        if let Err(e) = self.write_entries(entries) {
            warn!("Failed to write cache {}: {}", self.path.display(), e);
        }
    }

    fn write_entries(&self, entries: &HashMap<String, CacheEntry>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
