//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

use std::collections::BTreeMap;

use super::models::{Directory, DirectoryProvider, ScimEndpoint};

// ============================================================================
// DirectoryBuilder
// ============================================================================

/// Builder for creating test Directory instances.
///
/// # Example
/// ```ignore
/// let dir = DirectoryBuilder::new("dir-123")
///     .org_id(7)
///     .provider(DirectoryProvider::OktaScimV2)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryBuilder {
    id: String,
    org_id: Option<i64>,
    name: Option<String>,
    provider: Option<DirectoryProvider>,
    tenant: Option<String>,
    scim: Option<ScimEndpoint>,
    extra: BTreeMap<String, serde_json::Value>,
}

impl DirectoryBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: Some(format!("Directory {}", &id)),
            id,
            org_id: None,
            provider: Some(DirectoryProvider::GenericScimV2),
            tenant: None,
            scim: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the owning organization.
    pub fn org_id(mut self, org_id: i64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Set the directory name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the provider.
    pub fn provider(mut self, provider: DirectoryProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tenant.
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Set the SCIM endpoint and secret.
    pub fn scim(mut self, endpoint: impl Into<String>, secret: impl Into<String>) -> Self {
        self.scim = Some(ScimEndpoint {
            path: None,
            endpoint: Some(endpoint.into()),
            secret: Some(secret.into()),
        });
        self
    }

    /// Add an unmodelled metadata field.
    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Build the Directory.
    pub fn build(self) -> Directory {
        Directory {
            id: self.id,
            org_id: self.org_id,
            name: self.name,
            provider: self.provider,
            tenant: self.tenant,
            product: None,
            scim: self.scim,
            extra: self.extra,
        }
    }
}
