//! Local cache for API responses
//!
//! SQLite-backed cache of directory reads. Entries are tagged with endpoint
//! and scope so a mutation can invalidate exactly the reads it affects.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Cache TTL configuration per data type
pub struct CacheTtl;

impl CacheTtl {
    // Directory configuration rarely changes, and every local mutation invalidates it
    pub const DIRECTORIES: Duration = Duration::from_secs(60); // 1 min
}

pub use client::CachedDirectoryClient;
pub use key::{backend_tag, cache_key, scope_tag, stored_scope};
pub use storage::CacheStorage;
