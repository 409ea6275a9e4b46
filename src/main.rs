//! dsyncctl - Directory sync (SCIM) connection manager

use clap::{CommandFactory, Parser};
use env_logger::Env;

mod cache;
mod cli;
mod client;
mod config;
mod controller;
mod error;
mod i18n;
mod models;
mod notify;
mod output;

use cli::{CacheCommands, Cli, Commands, DirectoryCommands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --debug
    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);
    log::debug!("Global options: {:?}", opts);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("dsyncctl version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Directory(cmd) => match cmd {
            DirectoryCommands::Show => cli::directory::show(&opts).await,
            DirectoryCommands::Configure => cli::directory::configure(&opts).await,
            DirectoryCommands::Create {
                name,
                provider,
                dry_run,
            } => cli::directory::create(&opts, &name, provider, dry_run).await,
            DirectoryCommands::Delete { yes, dry_run } => {
                cli::directory::delete(&opts, yes, dry_run).await
            }
        },
        Commands::Cache(cmd) => {
            let format = opts.resolve_format(None);
            match cmd {
                CacheCommands::Status => cli::cache::status(format),
                CacheCommands::Clear => cli::cache::clear(format),
                CacheCommands::Path => cli::cache::path(),
            }
        }
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "dsyncctl",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
