//! User-facing strings
//!
//! Every message the directory commands show goes through a [`Translator`]
//! keyed by a stable message key. Unknown keys render as the key itself.

use std::collections::HashMap;

/// Localization collaborator
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

const ENGLISH: &[(&str, &str)] = &[
    ("directory_sync_title", "Directory Sync"),
    (
        "directory_sync_configure",
        "Sync users and groups from your identity provider with SCIM.",
    ),
    (
        "directory_sync_no_directory",
        "No directory sync connection is configured for this scope.",
    ),
    ("directory_sync_created", "Directory sync connection created."),
    ("directory_sync_deleted", "Directory sync connection deleted."),
    ("danger_zone", "Danger Zone"),
    (
        "directory_sync_delete_connection",
        "Delete directory sync connection",
    ),
    (
        "directory_sync_delete_title",
        "Delete directory sync connection?",
    ),
    (
        "directory_sync_delete_description",
        "Users and groups will no longer be synced from your identity provider.",
    ),
    (
        "directory_sync_delete_confirmation",
        "Are you sure you want to delete this directory sync connection? This cannot be undone.",
    ),
    ("directory_name", "Directory name"),
    ("directory_provider", "Directory provider"),
    ("cancelled", "Cancelled."),
];

/// In-memory message catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// The built-in English catalog
    pub fn english() -> Self {
        Self {
            messages: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Override or add a message
    #[allow(dead_code)]
    pub fn with_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(key.into(), message.into());
        self
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
