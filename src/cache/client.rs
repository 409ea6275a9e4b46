//! Cached wrapper for the directory sync API client
//!
//! Reads are served from SQLite storage when fresh. Writes pass through
//! untouched; callers invalidate the scope explicitly once a write succeeds.

use async_trait::async_trait;
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cache::{CacheStorage, CacheTtl, cache_key, stored_scope};
use crate::client::DirectoryApi;
use crate::client::models::{CreateDirectoryRequest, Directory};
use crate::error::{Error, Result};

const LIST_DIRECTORIES: &str = "list_directories";

/// Cached wrapper for any DirectoryApi implementation.
///
/// Cache can be disabled via the `enabled` flag (for `--no-cache`).
/// The storage is wrapped in a Mutex for thread-safety. Every entry is
/// namespaced by `backend` (see [`crate::cache::backend_tag`]) because one
/// cache file serves every host and API key.
pub struct CachedDirectoryClient<C: DirectoryApi> {
    inner: Arc<C>,
    backend: String,
    cache: Option<Mutex<CacheStorage>>,
}

impl<C: DirectoryApi> CachedDirectoryClient<C> {
    /// Create a cached client over the default cache location.
    ///
    /// A cache that cannot be opened degrades to an uncached client.
    pub fn new(inner: C, backend: impl Into<String>, enabled: bool) -> Self {
        let cache = if enabled {
            match CacheStorage::open() {
                Ok(storage) => Some(storage),
                Err(e) => {
                    log::warn!("Response cache unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self::with_storage(inner, backend, cache)
    }

    /// Create a cached client over explicit storage (`None` disables caching).
    pub fn with_storage(
        inner: C,
        backend: impl Into<String>,
        storage: Option<CacheStorage>,
    ) -> Self {
        Self {
            inner: Arc::new(inner),
            backend: backend.into(),
            cache: storage.map(Mutex::new),
        }
    }

    /// Get the inner client
    #[allow(dead_code)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn scope(&self, org_id: Option<i64>) -> String {
        stored_scope(&self.backend, org_id)
    }

    fn key(&self, org_id: Option<i64>) -> String {
        cache_key(LIST_DIRECTORIES, &self.backend, org_id, &[])
    }

    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get(key)
            .ok()
            .flatten()
            .and_then(|data| serde_json::from_slice(&data).ok())
    }

    fn set_cached<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        endpoint: &str,
        org_id: Option<i64>,
        ttl: Duration,
    ) {
        if let Some(ref cache) = self.cache
            && let Ok(guard) = cache.lock()
            && let Ok(json) = serde_json::to_vec(data)
            && let Err(e) = guard.put(key, &json, endpoint, &self.scope(org_id), ttl)
        {
            log::warn!("Failed to write cache entry for {}: {}", endpoint, e);
        }
    }
}

#[async_trait]
impl<C: DirectoryApi + 'static> DirectoryApi for CachedDirectoryClient<C> {
    async fn list_directories(&self, org_id: Option<i64>) -> Result<Vec<Directory>> {
        let key = self.key(org_id);

        if let Some(cached) = self.get_cached(&key) {
            debug!("Cache hit: {} ({})", LIST_DIRECTORIES, self.scope(org_id));
            return Ok(cached);
        }

        let result = self.inner.list_directories(org_id).await?;
        self.set_cached(&key, &result, LIST_DIRECTORIES, org_id, CacheTtl::DIRECTORIES);
        Ok(result)
    }

    async fn list_directories_fresh(&self, org_id: Option<i64>) -> Result<Vec<Directory>> {
        let result = self.inner.list_directories_fresh(org_id).await?;
        let key = self.key(org_id);
        self.set_cached(&key, &result, LIST_DIRECTORIES, org_id, CacheTtl::DIRECTORIES);
        Ok(result)
    }

    async fn create_directory(&self, request: CreateDirectoryRequest) -> Result<Directory> {
        self.inner.create_directory(request).await
    }

    async fn delete_directory(&self, org_id: Option<i64>, directory_id: &str) -> Result<()> {
        self.inner.delete_directory(org_id, directory_id).await
    }

    async fn invalidate_directories(&self, org_id: Option<i64>) -> Result<()> {
        if let Some(ref cache) = self.cache {
            let guard = cache
                .lock()
                .map_err(|_| Error::Other("Cache lock poisoned".to_string()))?;
            let removed = guard.delete_by_endpoint(LIST_DIRECTORIES, &self.scope(org_id))?;
            debug!(
                "Invalidated {} cached {} entries ({})",
                removed,
                LIST_DIRECTORIES,
                self.scope(org_id)
            );
        }
        self.inner.invalidate_directories(org_id).await
    }
}
