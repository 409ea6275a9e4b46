//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{DirectoryApi, DirectorySyncClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the API key and a default organization scope, checks the key
/// with one directory read, and writes the config file. An existing config
/// keeps its other settings.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();

    println!("{}", "Welcome to dsyncctl!".bold().green());
    println!("Let's set up your directory sync configuration.\n");

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your API key")
        .interact()?;

    let org_input: String = Input::with_theme(&theme)
        .with_prompt("Default organization ID (leave empty for instance-wide)")
        .allow_empty(true)
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            let trimmed = input.trim();
            if trimmed.is_empty() || trimmed.parse::<i64>().is_ok() {
                Ok(())
            } else {
                Err("Organization ID must be a number")
            }
        })
        .interact_text()?;
    let org_id = parse_org_input(&org_input);

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    let api_host = opts.api_host.clone().or_else(|| config.api_host.clone());

    // Verify the key against the chosen scope
    println!("\n{}", "Checking API access...".cyan());
    let client = DirectorySyncClient::with_host(api_key.clone(), api_host)?;
    match client.list_directories(org_id).await {
        Ok(dirs) => println!(
            "{} API key accepted ({} directory connection{} found)",
            "✓".green(),
            dirs.len(),
            if dirs.len() == 1 { "" } else { "s" }
        ),
        Err(e) => {
            println!("{} Could not verify API key: {}", "⚠".yellow(), e);
            let save_anyway = Confirm::with_theme(&theme)
                .with_prompt("Save configuration anyway?")
                .default(false)
                .interact()?;
            if !save_anyway {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    config.api_key = Some(api_key);
    config.org_id = org_id;
    if opts.api_host.is_some() {
        config.api_host = opts.api_host.clone();
    }
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    match org_id {
        Some(id) => println!("  Default organization: {}", id.to_string().bold()),
        None => println!("  Default scope: {}", "instance".bold()),
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "dsyncctl status".cyan());
    println!(
        "  {} - Show the directory sync connection",
        "dsyncctl directory show".cyan()
    );

    Ok(())
}

fn parse_org_input(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}
