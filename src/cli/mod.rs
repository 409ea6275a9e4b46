//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::DirectoryProvider;

pub mod args;
pub mod cache;
pub mod context;
pub mod directory;
pub mod init;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// dsyncctl - Directory sync (SCIM) connection manager
#[derive(Parser, Debug)]
#[command(name = "dsyncctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json) [default: pretty]
    #[arg(
        long,
        global = true,
        env = "DSYNCCTL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Organization scope (omit for the instance-wide directory)
    #[arg(long, global = true, env = "DSYNCCTL_ORG_ID", hide_env = true)]
    pub org: Option<i64>,

    /// Override config file location
    #[arg(long, global = true, env = "DSYNCCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "DSYNCCTL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "DSYNCCTL_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Custom API host for development/testing
    #[arg(long, global = true, env = "DSYNCCTL_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize dsyncctl configuration
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Manage the directory sync connection of a scope
    #[command(subcommand)]
    Directory(DirectoryCommands),

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   dsyncctl completion bash > /etc/bash_completion.d/dsyncctl
  zsh:    dsyncctl completion zsh > \"${fpath[1]}/_dsyncctl\"
  fish:   dsyncctl completion fish > ~/.config/fish/completions/dsyncctl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Directory sync subcommands
#[derive(Subcommand, Debug)]
pub enum DirectoryCommands {
    /// Show the directory configured for the scope
    Show,

    /// Interactively create or manage the directory for the scope
    Configure,

    /// Create the directory for the scope
    #[command(after_help = "\
Providers:
  azure-scim-v2, onelogin-scim-v2, okta-scim-v2,
  jumpcloud-scim-v2, generic-scim-v2, google")]
    Create {
        /// Directory display name
        #[arg(long)]
        name: String,

        /// Identity provider
        #[arg(long)]
        provider: DirectoryProvider,

        /// Preview without creating
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Delete the directory configured for the scope
    Delete {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Preview without deleting
        #[arg(long, short = 'n')]
        dry_run: bool,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print cache directory path
    Path,
}
