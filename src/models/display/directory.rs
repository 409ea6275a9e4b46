//! Directory display model

use std::collections::BTreeMap;

use colored::Colorize;
use tabled::Tabled;

use crate::cache::scope_tag;
use crate::client::models::Directory;
use crate::i18n::Translator;
use crate::output::formatters::{NONE, mask_secret};

/// Directory display model for table and pretty output.
#[derive(Debug, Clone, Tabled)]
pub struct DirectoryDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PROVIDER")]
    pub provider: String,

    /// `org:N` or `instance`
    #[tabled(rename = "SCOPE")]
    pub scope: String,

    #[tabled(rename = "SCIM ENDPOINT")]
    pub scim_endpoint: String,

    /// Masked SCIM bearer token
    #[tabled(rename = "SCIM SECRET")]
    pub scim_secret: String,

    #[tabled(skip)]
    pub tenant: Option<String>,

    #[tabled(skip)]
    pub product: Option<String>,

    /// Unmodelled metadata, rendered as JSON values
    #[tabled(skip)]
    pub extra: BTreeMap<String, String>,
}

impl From<&Directory> for DirectoryDisplay {
    fn from(dir: &Directory) -> Self {
        let scim = dir.scim.as_ref();
        Self {
            id: dir.id.clone(),
            name: dir.name.clone().unwrap_or_else(|| NONE.to_string()),
            provider: dir
                .provider
                .as_ref()
                .map(|p| p.label().to_string())
                .unwrap_or_else(|| NONE.to_string()),
            scope: scope_tag(dir.org_id),
            scim_endpoint: scim
                .and_then(|s| s.endpoint.clone())
                .unwrap_or_else(|| NONE.to_string()),
            scim_secret: scim
                .and_then(|s| s.secret.as_deref())
                .map(mask_secret)
                .unwrap_or_else(|| NONE.to_string()),
            tenant: dir.tenant.clone(),
            product: dir.product.clone(),
            extra: dir
                .extra
                .iter()
                .map(|(k, v)| {
                    let rendered = match v {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), rendered)
                })
                .collect(),
        }
    }
}

impl DirectoryDisplay {
    /// Multi-line, colored rendering for the pretty format
    pub fn render_pretty(&self, t: &dyn Translator) -> String {
        let mut lines = vec![
            format!("{}: {}", t.translate("directory_name").bold(), self.name),
            format!(
                "{}: {}",
                t.translate("directory_provider").bold(),
                self.provider
            ),
            format!("{}: {}", "ID".dimmed(), self.id),
            format!("{}: {}", "Scope".dimmed(), self.scope),
        ];

        if let Some(ref tenant) = self.tenant {
            lines.push(format!("{}: {}", "Tenant".dimmed(), tenant));
        }
        if let Some(ref product) = self.product {
            lines.push(format!("{}: {}", "Product".dimmed(), product));
        }

        lines.push(String::new());
        lines.push(format!("{}:", "SCIM".bold()));
        lines.push(format!("  Endpoint: {}", self.scim_endpoint.cyan()));
        lines.push(format!("  Secret:   {}", self.scim_secret));

        if !self.extra.is_empty() {
            lines.push(String::new());
            for (key, value) in &self.extra {
                lines.push(format!("{}: {}", key.dimmed(), value));
            }
        }

        lines.join("\n")
    }
}
