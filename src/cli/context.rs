//! Command execution context
//!
//! Bundles what every directory command needs: loaded configuration, the
//! cached API client, the resolved scope and output format, and the
//! notification and localization collaborators.

use std::sync::Arc;

use log::debug;

use crate::cache::{CachedDirectoryClient, backend_tag};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::DirectorySyncClient;
use crate::config::Config;
use crate::controller::DirectoryController;
use crate::error::Result;
use crate::i18n::{Catalog, Translator};
use crate::notify::{Notifier, TerminalNotifier};

/// API client used by commands
pub type Client = CachedDirectoryClient<DirectorySyncClient>;

/// Context for command execution
pub struct CommandContext {
    pub config: Config,
    /// Cached API client (Arc-wrapped so controllers can share it)
    pub client: Arc<Client>,
    pub format: OutputFormat,
    /// Scope the command operates on, `None` for instance-wide
    pub org_id: Option<i64>,
    pub notifier: Arc<dyn Notifier>,
    pub translator: Arc<dyn Translator>,
}

impl CommandContext {
    /// Load config, validate the API key and build the client.
    ///
    /// Scope comes from `--org`/`DSYNCCTL_ORG_ID`, falling back to the
    /// config file default. The API host follows the same precedence.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        config.validate_auth()?;

        let org_id = opts.org.or(config.org_id);
        let api_host = opts.api_host.clone().or_else(|| config.api_host.clone());
        let format = opts.resolve_format(config.preferences.format.as_deref());
        let api_key = config.api_key.clone().unwrap_or_default();

        let raw_client = DirectorySyncClient::with_host(api_key.clone(), api_host)?;
        debug!(
            "Using API {} for scope {:?} (cache {})",
            raw_client.base_url(),
            org_id,
            if opts.no_cache { "disabled" } else { "enabled" }
        );

        let backend = backend_tag(raw_client.base_url(), &api_key);
        let client = Arc::new(CachedDirectoryClient::new(
            raw_client,
            backend,
            !opts.no_cache,
        ));

        Ok(Self {
            config,
            client,
            format,
            org_id,
            notifier: Arc::new(TerminalNotifier),
            translator: Arc::new(Catalog::english()),
        })
    }

    /// A fresh controller for this command's scope
    pub fn controller(&self) -> DirectoryController<Client> {
        DirectoryController::new(
            self.client.clone(),
            self.notifier.clone(),
            self.translator.clone(),
            self.org_id,
        )
    }

    /// Translate a message key
    pub fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }
}
