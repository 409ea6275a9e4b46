//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "dsyncctl Configuration Status".bold());

    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "dsyncctl init".cyan()
            );
            println!();
            return Ok(());
        }
    };

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!("Config file: {}", config_path.display().to_string().cyan());
    println!();

    if config.validate_auth().is_ok() {
        println!("{} API key configured", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Run 'dsyncctl init' to configure");
    }

    match (opts.org, config.org_id) {
        (Some(flag), _) => println!(
            "{} Scope: organization {} {}",
            "✓".green(),
            flag,
            "(via --org)".dimmed()
        ),
        (None, Some(org)) => println!("{} Default organization: {}", "✓".green(), org),
        (None, None) => println!("{} Scope: instance-wide", "○".dimmed()),
    }

    if let Some(host) = opts.api_host.as_ref().or(config.api_host.as_ref()) {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    if let Some(ref format) = config.preferences.format {
        println!("{} Preferred format: {}", "○".dimmed(), format);
    }

    println!();
    Ok(())
}
