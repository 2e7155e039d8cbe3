//! Cache configuration, entry and statistics models.

// Author: kelexine (https://github.com/kelexine)

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Default time-to-live for cached responses: 7 days.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Default maximum number of cached responses.
pub const DEFAULT_MAX_CACHE_SIZE: usize = 1000;

/// Configuration for the response cache, read from the `[cache]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds after which an entry is stale.
    #[serde(default = "default_ttl")]
    pub ttl: u64,
    /// Maximum number of entries kept on disk.
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Whether caching is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    /// Provides default values for cache configuration.
    ///
    /// - `ttl`: 604800 (7 days)
    /// - `max_size`: 1000
    /// - `enabled`: true
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL_SECONDS,
            max_size: DEFAULT_MAX_CACHE_SIZE,
            enabled: true,
        }
    }
}

fn default_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

fn default_max_size() -> usize {
    DEFAULT_MAX_CACHE_SIZE
}

fn default_enabled() -> bool {
    true
}

/// A cached translation, stored under its fingerprint in `cache.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(with = "crate::utils::timestamp")]
    pub timestamp: DateTime<Local>,
    pub query: String,
    pub command: String,
    pub api_url: String,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Snapshot of the persisted cache.
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    /// Number of stored entries.
    pub size: usize,
    /// Timestamp of the oldest entry, if any.
    pub oldest_entry: Option<DateTime<Local>>,
    /// Timestamp of the newest entry, if any.
    pub newest_entry: Option<DateTime<Local>>,
}
