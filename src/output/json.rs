//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cache::scope_tag;

/// Envelope for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// RFC 3339 time the output was produced
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Scope the data belongs to (`org:N` or `instance`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                scope: None,
            },
        }
    }

    /// Tag the output with the scope it was read from
    pub fn with_scope(mut self, org_id: Option<i64>) -> Self {
        self.meta.scope = Some(scope_tag(org_id));
        self
    }
}

/// Format data as pretty-printed JSON inside the envelope, recording the
/// scope in `meta`
pub fn format_scoped_json<T: Serialize + ?Sized>(
    data: &T,
    org_id: Option<i64>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data).with_scope(org_id))
}
