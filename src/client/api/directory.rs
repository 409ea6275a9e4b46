//! Directory API trait for the sync connection lifecycle

use async_trait::async_trait;

use crate::client::models::{CreateDirectoryRequest, Directory};
use crate::error::Result;

/// Directory sync operations, scoped by organization.
///
/// `org_id` of `None` addresses the instance-wide scope. A scope holds at most
/// one directory, but reads return a sequence and callers use the first entry.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    // ========================================================================
    // Read Operations
    // ========================================================================

    /// List the directories configured for a scope.
    ///
    /// May return cached data if caching is enabled.
    async fn list_directories(&self, org_id: Option<i64>) -> Result<Vec<Directory>>;

    /// List directories, bypassing the cache.
    ///
    /// The default implementation calls `list_directories()` since only the
    /// cached wrapper needs special handling.
    async fn list_directories_fresh(&self, org_id: Option<i64>) -> Result<Vec<Directory>> {
        self.list_directories(org_id).await
    }

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Create a directory sync connection.
    async fn create_directory(&self, request: CreateDirectoryRequest) -> Result<Directory>;

    /// Delete the directory `directory_id` from a scope.
    async fn delete_directory(&self, org_id: Option<i64>, directory_id: &str) -> Result<()>;

    // ========================================================================
    // Cache Control
    // ========================================================================

    /// Drop any cached directory reads so the next read hits the API.
    ///
    /// No-op for uncached clients.
    async fn invalidate_directories(&self, _org_id: Option<i64>) -> Result<()> {
        Ok(())
    }
}
