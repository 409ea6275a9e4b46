//! Directory sync controller
//!
//! Owns everything the directory sync screen needs for one scope: the state
//! of the directory read, which view that state selects, the delete dialog
//! and the delete flow. Rendering is left to the caller; the controller only
//! decides what to render through [`ViewKind`].

pub mod dialog;
pub mod query;
pub mod view;

use std::sync::Arc;

use log::{debug, warn};

use crate::client::DirectoryApi;
use crate::client::models::Directory;
use crate::error::Result;
use crate::i18n::Translator;
use crate::notify::{Notifier, Severity};

pub use dialog::{DialogEvent, DialogState};
pub use query::QueryState;
pub use view::{ViewKind, select_view};

/// Result of a delete request that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The directory was deleted
    Deleted { directory_id: String },
    /// Nothing was loaded (or a delete was already in flight); no request was made
    Skipped,
}

/// Controller for the directory configured in one scope.
///
/// Two controllers never share dialog or query state, even when they share
/// the API client.
pub struct DirectoryController<A: DirectoryApi> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    translator: Arc<dyn Translator>,
    org_id: Option<i64>,
    query: QueryState<Vec<Directory>>,
    dialog: DialogState,
    delete_pending: bool,
}

impl<A: DirectoryApi> DirectoryController<A> {
    /// Create a controller for `org_id` (`None` for the instance-wide scope).
    ///
    /// The directory read starts out pending; call [`load_directory`](Self::load_directory).
    pub fn new(
        api: Arc<A>,
        notifier: Arc<dyn Notifier>,
        translator: Arc<dyn Translator>,
        org_id: Option<i64>,
    ) -> Self {
        Self {
            api,
            notifier,
            translator,
            org_id,
            query: QueryState::pending(),
            dialog: DialogState::Closed,
            delete_pending: false,
        }
    }

    pub fn org_id(&self) -> Option<i64> {
        self.org_id
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    /// Whether a delete request is in flight (the delete affordance is disabled)
    pub fn is_delete_pending(&self) -> bool {
        self.delete_pending
    }

    /// Translate a message key with the injected translator
    pub fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    /// Read the directory for this scope.
    ///
    /// A failed read is recorded in the query state, not returned.
    pub async fn load_directory(&mut self) {
        self.fetch(false).await;
    }

    /// Like [`load_directory`](Self::load_directory), bypassing cached reads
    pub async fn load_directory_fresh(&mut self) {
        self.fetch(true).await;
    }

    async fn fetch(&mut self, fresh: bool) {
        self.query.start();
        debug!(
            "Loading directories (orgId={:?}, fresh={})",
            self.org_id, fresh
        );

        let result = if fresh {
            self.api.list_directories_fresh(self.org_id).await
        } else {
            self.api.list_directories(self.org_id).await
        };

        match result {
            Ok(dirs) => {
                debug!("Loaded {} directories", dirs.len());
                self.query.resolve(dirs);
            }
            Err(e) => {
                debug!("Directory read failed: {}", e);
                self.query.fail(e.to_string());
            }
        }
    }

    /// The view the current state selects
    pub fn view(&self) -> ViewKind<'_> {
        select_view(&self.query, self.org_id)
    }

    /// The directory currently shown, if the screen is in its manage view
    pub fn directory(&self) -> Option<&Directory> {
        match self.view() {
            ViewKind::Manage { directory } => Some(directory),
            _ => None,
        }
    }

    /// Open the delete dialog. Only possible while a directory is shown.
    pub fn open_delete_dialog(&mut self) -> DialogState {
        if self.directory().is_some() && !self.is_delete_pending() {
            self.dialog = self.dialog.on(DialogEvent::Trigger);
        }
        self.dialog
    }

    /// Close the delete dialog without deleting
    pub fn cancel_delete(&mut self) -> DialogState {
        self.dialog = self.dialog.on(DialogEvent::Cancel);
        self.dialog
    }

    /// Delete the shown directory.
    ///
    /// Without a shown directory this does nothing. On success the user is
    /// notified once, the directory cache is invalidated once, the dialog
    /// closes and the directory is read again, bypassing any cache. On failure the error is
    /// reported through the notifier, the dialog stays as it was and the
    /// error is returned.
    pub async fn request_delete(&mut self) -> Result<DeleteOutcome> {
        if self.delete_pending {
            debug!("Delete already in flight, ignoring");
            return Ok(DeleteOutcome::Skipped);
        }
        let Some(directory_id) = self.directory().map(|d| d.id.clone()) else {
            debug!("No directory loaded, ignoring delete");
            return Ok(DeleteOutcome::Skipped);
        };

        self.delete_pending = true;
        let result = self
            .api
            .delete_directory(self.org_id, &directory_id)
            .await;
        self.delete_pending = false;

        match result {
            Ok(()) => {
                self.notifier
                    .show_toast(&self.t("directory_sync_deleted"), Severity::Success);
                if let Err(e) = self.api.invalidate_directories(self.org_id).await {
                    warn!("Failed to invalidate directory cache: {}", e);
                }
                self.dialog = self.dialog.on(DialogEvent::DeleteSucceeded);
                self.load_directory_fresh().await;
                Ok(DeleteOutcome::Deleted { directory_id })
            }
            Err(e) => {
                self.notifier.show_toast(&e.to_string(), Severity::Error);
                self.dialog = self.dialog.on(DialogEvent::DeleteFailed);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDirectoryClient;
    use crate::client::fixtures::DirectoryBuilder;
    use crate::error::ApiError;
    use crate::i18n::Catalog;
    use crate::notify::RecordingNotifier;

    struct Harness {
        api: Arc<MockDirectoryClient>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Harness {
        fn new(api: MockDirectoryClient) -> Self {
            Self {
                api: Arc::new(api),
                notifier: Arc::new(RecordingNotifier::new()),
            }
        }

        fn controller(&self, org_id: Option<i64>) -> DirectoryController<MockDirectoryClient> {
            DirectoryController::new(
                self.api.clone(),
                self.notifier.clone(),
                Arc::new(Catalog::english()),
                org_id,
            )
        }
    }

    async fn with_directory(org_id: Option<i64>, id: &str) -> Harness {
        let mut builder = DirectoryBuilder::new(id);
        if let Some(org) = org_id {
            builder = builder.org_id(org);
        }
        Harness::new(
            MockDirectoryClient::new()
                .with_directories(org_id, vec![builder.build()])
                .await,
        )
    }

    #[tokio::test]
    async fn test_before_load_only_loading_view() {
        let h = with_directory(Some(1), "dir-1").await;
        let controller = h.controller(Some(1));

        assert_eq!(controller.view(), ViewKind::Loading);
        assert!(controller.directory().is_none());
        assert_eq!(controller.dialog(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_empty_scope_selects_create_view() {
        let h = Harness::new(MockDirectoryClient::new());
        let mut controller = h.controller(Some(77));

        controller.load_directory().await;

        assert_eq!(controller.view(), ViewKind::Create { org_id: Some(77) });
    }

    #[tokio::test]
    async fn test_loaded_scope_selects_manage_view() {
        let h = with_directory(None, "dir-global").await;
        let mut controller = h.controller(None);

        controller.load_directory().await;

        match controller.view() {
            ViewKind::Manage { directory } => assert_eq!(directory.id, "dir-global"),
            other => panic!("Expected Manage, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fresh_load_bypasses_cache() {
        use crate::cache::{CacheStorage, CachedDirectoryClient};

        let temp = tempfile::TempDir::new().unwrap();
        let storage = CacheStorage::open_at(temp.path()).unwrap();
        let inner = MockDirectoryClient::new()
            .with_directories(Some(4), vec![DirectoryBuilder::new("dir-4").build()])
            .await;
        let api = Arc::new(CachedDirectoryClient::with_storage(inner, "test", Some(storage)));
        let mut controller = DirectoryController::new(
            api.clone(),
            Arc::new(RecordingNotifier::new()),
            Arc::new(Catalog::english()),
            Some(4),
        );

        controller.load_directory().await;
        controller.load_directory().await;
        assert_eq!(api.inner().call_counts().await.list_directories, 1);

        controller.load_directory_fresh().await;
        assert_eq!(api.inner().call_counts().await.list_directories, 2);
        assert_eq!(controller.directory().map(|d| d.id.as_str()), Some("dir-4"));
    }

    #[tokio::test]
    async fn test_query_error_selects_error_view() {
        let h = Harness::new(
            MockDirectoryClient::new()
                .with_error(ApiError::ServerError("SCIM backend down".to_string()))
                .await,
        );
        let mut controller = h.controller(Some(1));

        controller.load_directory().await;

        assert_eq!(
            controller.view(),
            ViewKind::Error {
                message: "Server error: SCIM backend down".to_string()
            }
        );
        assert!(controller.directory().is_none());
    }

    #[tokio::test]
    async fn test_delete_without_directory_is_noop() {
        let h = Harness::new(MockDirectoryClient::new());
        let mut controller = h.controller(Some(1));
        controller.load_directory().await;

        let outcome = controller.request_delete().await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Skipped);
        assert_eq!(controller.dialog(), DialogState::Closed);
        assert_eq!(h.api.call_counts().await.delete_directory, 0);
        assert!(h.notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_delete_before_load_is_noop() {
        let h = with_directory(Some(1), "dir-1").await;
        let mut controller = h.controller(Some(1));

        assert_eq!(
            controller.request_delete().await.unwrap(),
            DeleteOutcome::Skipped
        );
        assert_eq!(h.api.call_counts().await.total_requests(), 0);
    }

    #[tokio::test]
    async fn test_dialog_cannot_open_without_directory() {
        let h = Harness::new(MockDirectoryClient::new());
        let mut controller = h.controller(None);
        controller.load_directory().await;

        assert_eq!(controller.open_delete_dialog(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_cancel_closes_dialog_without_request() {
        let h = with_directory(Some(2), "dir-2").await;
        let mut controller = h.controller(Some(2));
        controller.load_directory().await;

        assert_eq!(controller.open_delete_dialog(), DialogState::Open);
        assert_eq!(controller.cancel_delete(), DialogState::Closed);
        assert_eq!(h.api.call_counts().await.delete_directory, 0);
    }

    #[tokio::test]
    async fn test_delete_success_transition() {
        let h = with_directory(Some(5), "dir-5").await;
        let mut controller = h.controller(Some(5));
        controller.load_directory().await;
        controller.open_delete_dialog();

        let outcome = controller.request_delete().await.unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Deleted {
                directory_id: "dir-5".to_string()
            }
        );
        assert_eq!(controller.dialog(), DialogState::Closed);
        assert_eq!(
            h.notifier.toasts(),
            vec![(
                "Directory sync connection deleted.".to_string(),
                Severity::Success
            )]
        );
        let counts = h.api.call_counts().await;
        assert_eq!(counts.delete_directory, 1);
        assert_eq!(counts.invalidate_directories, 1);

        // Re-read reflects the deletion
        assert_eq!(controller.view(), ViewKind::Create { org_id: Some(5) });
        assert!(!controller.is_delete_pending());
    }

    /// Serves a fixed snapshot from cached reads and refuses invalidation,
    /// like a cache whose storage has gone read-only.
    struct StuckCache {
        inner: MockDirectoryClient,
        snapshot: Vec<Directory>,
    }

    #[async_trait::async_trait]
    impl DirectoryApi for StuckCache {
        async fn list_directories(&self, _org_id: Option<i64>) -> Result<Vec<Directory>> {
            Ok(self.snapshot.clone())
        }

        async fn list_directories_fresh(&self, org_id: Option<i64>) -> Result<Vec<Directory>> {
            self.inner.list_directories(org_id).await
        }

        async fn create_directory(
            &self,
            request: crate::client::models::CreateDirectoryRequest,
        ) -> Result<Directory> {
            self.inner.create_directory(request).await
        }

        async fn delete_directory(&self, org_id: Option<i64>, directory_id: &str) -> Result<()> {
            self.inner.delete_directory(org_id, directory_id).await
        }

        async fn invalidate_directories(&self, _org_id: Option<i64>) -> Result<()> {
            Err(crate::error::Error::Other("cache is read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_reload_after_delete_bypasses_cache() {
        let directory = DirectoryBuilder::new("dir-6").org_id(6).build();
        let api = Arc::new(StuckCache {
            inner: MockDirectoryClient::new()
                .with_directories(Some(6), vec![directory.clone()])
                .await,
            snapshot: vec![directory],
        });
        let notifier = Arc::new(RecordingNotifier::new());
        let mut controller = DirectoryController::new(
            api.clone(),
            notifier.clone(),
            Arc::new(Catalog::english()),
            Some(6),
        );
        controller.load_directory().await;
        controller.open_delete_dialog();

        controller.request_delete().await.unwrap();

        assert_eq!(controller.view(), ViewKind::Create { org_id: Some(6) });
        assert_eq!(controller.dialog(), DialogState::Closed);
        assert_eq!(notifier.toasts().len(), 1);
        assert_eq!(api.inner.call_counts().await.delete_directory, 1);
    }

    #[tokio::test]
    async fn test_delete_targets_scope_and_directory() {
        let h = with_directory(Some(8), "dir-8").await;
        let mut controller = h.controller(Some(8));
        controller.load_directory().await;
        controller.request_delete().await.unwrap();

        let deletes: Vec<_> = h
            .api
            .captured_requests()
            .await
            .into_iter()
            .filter(|r| r.method == "delete_directory")
            .collect();
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].org_id, Some(8));
        assert_eq!(deletes[0].directory_id.as_deref(), Some("dir-8"));
    }

    #[tokio::test]
    async fn test_delete_failure_transition() {
        let h = Harness::new(
            MockDirectoryClient::new()
                .with_directories(Some(3), vec![DirectoryBuilder::new("dir-3").build()])
                .await
                .with_delete_error(ApiError::Forbidden)
                .await,
        );
        let mut controller = h.controller(Some(3));
        controller.load_directory().await;
        controller.open_delete_dialog();

        let result = controller.request_delete().await;

        assert!(result.is_err());
        assert_eq!(controller.dialog(), DialogState::Open);
        assert_eq!(h.notifier.count(Severity::Success), 0);
        assert_eq!(h.notifier.count(Severity::Error), 1);
        assert_eq!(h.api.call_counts().await.invalidate_directories, 0);
        assert!(!controller.is_delete_pending());

        // Directory is still shown, so the user can retry
        assert_eq!(controller.directory().map(|d| d.id.as_str()), Some("dir-3"));
        let retry = controller.request_delete().await.unwrap();
        assert_eq!(
            retry,
            DeleteOutcome::Deleted {
                directory_id: "dir-3".to_string()
            }
        );
        assert_eq!(controller.dialog(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_scope_isolation() {
        let api = MockDirectoryClient::new()
            .with_directories(Some(1), vec![DirectoryBuilder::new("dir-a").org_id(1).build()])
            .await
            .with_directories(Some(2), vec![DirectoryBuilder::new("dir-b").org_id(2).build()])
            .await;
        let h = Harness::new(api);
        let mut first = h.controller(Some(1));
        let mut second = h.controller(Some(2));
        first.load_directory().await;
        second.load_directory().await;

        first.open_delete_dialog();
        assert_eq!(first.dialog(), DialogState::Open);
        assert_eq!(second.dialog(), DialogState::Closed);

        first.request_delete().await.unwrap();

        let requests = h.api.captured_requests().await;
        assert!(
            requests
                .iter()
                .filter(|r| r.method == "delete_directory")
                .all(|r| r.org_id == Some(1))
        );
        assert_eq!(second.directory().map(|d| d.id.as_str()), Some("dir-b"));
        assert_eq!(second.dialog(), DialogState::Closed);
    }
}
