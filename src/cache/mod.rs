// Response cache module
// Author: kelexine (https://github.com/kelexine)

pub mod models;
pub mod store;

pub use models::{CacheConfig, CacheEntry, CacheStats};
pub use store::{fingerprint, CacheStore};
