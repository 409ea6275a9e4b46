//! Mock directory sync client for testing
//!
//! Provides a mock implementation of [`DirectoryApi`] for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::DirectoryApi;
use super::models::{CreateDirectoryRequest, Directory};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockDirectoryClient::new()
///     .with_directories(Some(1), vec![DirectoryBuilder::new("dir-1").build()])
///     .await;
///
/// let dirs = mock.list_directories(Some(1)).await?;
/// assert_eq!(dirs.len(), 1);
/// ```
#[derive(Default)]
pub struct MockDirectoryClient {
    /// Directories per scope
    directories: Arc<Mutex<HashMap<Option<i64>, Vec<Directory>>>>,
    /// Error to return on the next call of any kind, consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error to return on the next delete, consumed on first use
    delete_error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_directories: usize,
    pub create_directory: usize,
    pub delete_directory: usize,
    pub invalidate_directories: usize,
}

impl CallCounts {
    /// Requests that would have reached the API (invalidation is local).
    pub fn total_requests(&self) -> usize {
        self.list_directories + self.create_directory + self.delete_directory
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_directories", "delete_directory")
    pub method: String,
    /// Scope the call was made for
    pub org_id: Option<i64>,
    /// Directory ID, for calls that target one
    pub directory_id: Option<String>,
}

impl MockDirectoryClient {
    /// Create a new mock client with no directories configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the directories returned for a scope.
    pub async fn with_directories(self, org_id: Option<i64>, dirs: Vec<Directory>) -> Self {
        self.directories.lock().await.insert(org_id, dirs);
        self
    }

    /// Configure an error to return on the next API call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error to return on the next delete only.
    pub async fn with_delete_error(self, error: ApiError) -> Self {
        *self.delete_error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture_request(&self, method: &str, org_id: Option<i64>, directory_id: Option<&str>) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            org_id,
            directory_id: directory_id.map(|s| s.to_string()),
        });
    }
}

#[async_trait]
impl DirectoryApi for MockDirectoryClient {
    async fn list_directories(&self, org_id: Option<i64>) -> Result<Vec<Directory>> {
        self.call_count.lock().await.list_directories += 1;
        self.capture_request("list_directories", org_id, None).await;
        self.check_error().await?;

        let dirs = self.directories.lock().await;
        Ok(dirs.get(&org_id).cloned().unwrap_or_default())
    }

    async fn create_directory(&self, request: CreateDirectoryRequest) -> Result<Directory> {
        self.call_count.lock().await.create_directory += 1;
        self.capture_request("create_directory", request.org_id, None)
            .await;
        self.check_error().await?;

        let mut dirs = self.directories.lock().await;
        let scope = dirs.entry(request.org_id).or_default();
        if !scope.is_empty() {
            return Err(ApiError::BadRequest(
                "A directory is already configured for this scope".to_string(),
            )
            .into());
        }

        let directory = Directory {
            id: format!("mock-dir-{}", request.org_id.unwrap_or(0)),
            org_id: request.org_id,
            name: Some(request.name),
            provider: Some(request.provider),
            tenant: None,
            product: None,
            scim: None,
            extra: Default::default(),
        };
        scope.push(directory.clone());

        Ok(directory)
    }

    async fn delete_directory(&self, org_id: Option<i64>, directory_id: &str) -> Result<()> {
        self.call_count.lock().await.delete_directory += 1;
        self.capture_request("delete_directory", org_id, Some(directory_id))
            .await;
        self.check_error().await?;
        if let Some(e) = self.delete_error.lock().await.take() {
            return Err(e.into());
        }

        let mut dirs = self.directories.lock().await;
        let scope = dirs.entry(org_id).or_default();
        let initial_len = scope.len();
        scope.retain(|d| d.id != directory_id);

        if scope.len() == initial_len {
            return Err(
                ApiError::NotFound(format!("Directory not found: {}", directory_id)).into(),
            );
        }

        Ok(())
    }

    async fn invalidate_directories(&self, _org_id: Option<i64>) -> Result<()> {
        self.call_count.lock().await.invalidate_directories += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::DirectoryBuilder;
    use crate::client::models::DirectoryProvider;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockDirectoryClient::new();

        let dirs = mock.list_directories(Some(1)).await.unwrap();
        assert!(dirs.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_scopes_are_separate() {
        let mock = MockDirectoryClient::new()
            .with_directories(Some(1), vec![DirectoryBuilder::new("dir-1").org_id(1).build()])
            .await;

        assert_eq!(mock.list_directories(Some(1)).await.unwrap().len(), 1);
        assert!(mock.list_directories(Some(2)).await.unwrap().is_empty());
        assert!(mock.list_directories(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_with_error_is_one_shot() {
        let mock = MockDirectoryClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.list_directories(None).await.is_err());
        assert!(mock.list_directories(None).await.is_ok());
        assert_eq!(mock.call_counts().await.list_directories, 2);
    }

    #[tokio::test]
    async fn test_mock_delete_error_leaves_reads_alone() {
        let mock = MockDirectoryClient::new()
            .with_directories(None, vec![DirectoryBuilder::new("dir-1").build()])
            .await
            .with_delete_error(ApiError::Forbidden)
            .await;

        assert_eq!(mock.list_directories(None).await.unwrap().len(), 1);
        assert!(mock.delete_directory(None, "dir-1").await.is_err());
        assert_eq!(mock.list_directories(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_delete_removes_directory() {
        let mock = MockDirectoryClient::new()
            .with_directories(Some(4), vec![DirectoryBuilder::new("dir-4").org_id(4).build()])
            .await;

        mock.delete_directory(Some(4), "dir-4").await.unwrap();

        assert!(mock.list_directories(Some(4)).await.unwrap().is_empty());
        let requests = mock.captured_requests().await;
        assert_eq!(
            requests[0],
            CapturedRequest {
                method: "delete_directory".to_string(),
                org_id: Some(4),
                directory_id: Some("dir-4".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_mock_delete_not_found() {
        let mock = MockDirectoryClient::new();

        let result = mock.delete_directory(None, "missing").await;
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_mock_create_rejects_second_directory() {
        let mock = MockDirectoryClient::new();
        let request = CreateDirectoryRequest {
            org_id: Some(9),
            name: "Corp".to_string(),
            provider: DirectoryProvider::OktaScimV2,
        };

        let created = mock.create_directory(request.clone()).await.unwrap();
        assert_eq!(created.id, "mock-dir-9");
        assert!(mock.create_directory(request).await.is_err());
        assert_eq!(mock.call_counts().await.total_requests(), 2);
    }
}
