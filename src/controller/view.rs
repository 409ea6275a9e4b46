//! View selection for the directory sync screen

use crate::client::models::Directory;

use super::query::QueryState;

/// What the directory sync screen shows for a given query state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewKind<'a> {
    /// Read in flight: a placeholder and nothing else
    Loading,
    /// Read failed: an error screen and nothing else
    Error { message: String },
    /// Nothing configured: hand over to the creation flow for this scope
    Create { org_id: Option<i64> },
    /// A directory is configured: its info plus the danger zone
    Manage { directory: &'a Directory },
}

/// Pick the view for a directory query.
///
/// Loading wins over everything, an error wins over (stale) data, and only
/// the first directory of a non-empty result is shown.
pub fn select_view(query: &QueryState<Vec<Directory>>, org_id: Option<i64>) -> ViewKind<'_> {
    if query.is_loading {
        return ViewKind::Loading;
    }

    if let Some(message) = query.error_message() {
        return ViewKind::Error {
            message: message.to_string(),
        };
    }

    match query.data.as_ref().and_then(|dirs| dirs.first()) {
        Some(directory) => ViewKind::Manage { directory },
        None => ViewKind::Create { org_id },
    }
}
