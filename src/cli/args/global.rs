//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Captures the CLI/env layer of precedence (flag > env > config > default).
/// Config file defaults are applied by [`resolve_format`](Self::resolve_format)
/// and `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, if given on the command line or in the environment
    pub format: Option<OutputFormat>,

    /// Organization scope override
    pub org: Option<i64>,

    /// Custom config file path (defaults to ~/.dsyncctl/config.yaml)
    pub config: Option<String>,

    /// Bypass cache and fetch fresh data from API
    pub no_cache: bool,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            org: cli.org,
            config: cli.config.clone(),
            no_cache: cli.no_cache,
            api_host: cli.api_host.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Output format after applying the config file preference
    pub fn resolve_format(&self, preference: Option<&str>) -> OutputFormat {
        self.format
            .or_else(|| preference.and_then(OutputFormat::from_preference))
            .unwrap_or_default()
    }
}
