//! Directory sync models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A directory sync connection configured for one scope.
///
/// Only `id` and `orgId` are interpreted by this crate. Everything else is
/// provider metadata that is displayed and re-serialized as received, including
/// fields this model does not name (kept in `extra`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    /// Directory ID, unique within its scope
    pub id: String,

    /// Owning organization, `None` for the instance-wide scope
    #[serde(default)]
    pub org_id: Option<i64>,

    /// Display name chosen at creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Identity provider kind
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider: Option<DirectoryProvider>,

    /// Tenant the directory is registered under on the sync service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    /// Product the directory is registered under on the sync service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// SCIM endpoint the identity provider pushes to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scim: Option<ScimEndpoint>,

    /// Provider metadata not modelled above
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// SCIM connection details handed to the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScimEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Base URL the identity provider calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token the identity provider authenticates with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Identity provider kinds accepted by the directory sync service.
///
/// Values the service returns but this build does not know deserialize to
/// `Other` so that listing never fails on a new provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DirectoryProvider {
    AzureScimV2,
    OneLoginScimV2,
    OktaScimV2,
    JumpCloudScimV2,
    GenericScimV2,
    Google,
    Other(String),
}

impl DirectoryProvider {
    /// Providers that can be chosen when creating a directory
    pub const SELECTABLE: [DirectoryProvider; 6] = [
        DirectoryProvider::AzureScimV2,
        DirectoryProvider::OneLoginScimV2,
        DirectoryProvider::OktaScimV2,
        DirectoryProvider::JumpCloudScimV2,
        DirectoryProvider::GenericScimV2,
        DirectoryProvider::Google,
    ];

    /// Wire identifier
    pub fn as_str(&self) -> &str {
        match self {
            DirectoryProvider::AzureScimV2 => "azure-scim-v2",
            DirectoryProvider::OneLoginScimV2 => "onelogin-scim-v2",
            DirectoryProvider::OktaScimV2 => "okta-scim-v2",
            DirectoryProvider::JumpCloudScimV2 => "jumpcloud-scim-v2",
            DirectoryProvider::GenericScimV2 => "generic-scim-v2",
            DirectoryProvider::Google => "google",
            DirectoryProvider::Other(s) => s,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        match self {
            DirectoryProvider::AzureScimV2 => "Azure SCIM v2.0",
            DirectoryProvider::OneLoginScimV2 => "OneLogin SCIM v2.0",
            DirectoryProvider::OktaScimV2 => "Okta SCIM v2.0",
            DirectoryProvider::JumpCloudScimV2 => "JumpCloud v2.0",
            DirectoryProvider::GenericScimV2 => "Generic SCIM v2.0",
            DirectoryProvider::Google => "Google",
            DirectoryProvider::Other(s) => s,
        }
    }

    fn known(s: &str) -> Option<Self> {
        Self::SELECTABLE.into_iter().find(|p| p.as_str() == s)
    }
}

impl From<String> for DirectoryProvider {
    fn from(s: String) -> Self {
        Self::known(&s).unwrap_or(DirectoryProvider::Other(s))
    }
}

impl From<DirectoryProvider> for String {
    fn from(p: DirectoryProvider) -> Self {
        p.as_str().to_string()
    }
}

/// Strict parse used for user input: unknown providers are rejected.
impl FromStr for DirectoryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::known(&normalized).ok_or_else(|| {
            let choices: Vec<&str> = Self::SELECTABLE.iter().map(|p| p.as_str()).collect();
            format!(
                "unknown directory provider '{}' (expected one of: {})",
                s,
                choices.join(", ")
            )
        })
    }
}

impl fmt::Display for DirectoryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for creating a directory
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectoryRequest {
    /// Scope to create the directory in
    pub org_id: Option<i64>,

    pub name: String,

    pub provider: DirectoryProvider,
}
