//! Directory sync commands
//!
//! Every command drives a [`DirectoryController`] for the resolved scope:
//! load, pick the view, render it, and for deletes walk the confirmation
//! dialog.

use std::io::IsTerminal;
use std::time::Duration;

use colored::Colorize;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};

use crate::cache::scope_tag;
use crate::cli::context::Client;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::DirectoryApi;
use crate::client::models::{CreateDirectoryRequest, Directory, DirectoryProvider};
use crate::controller::{DeleteOutcome, DirectoryController, ViewKind};
use crate::error::{ApiError, Error, Result};
use crate::models::DirectoryDisplay;
use crate::notify::Severity;
use crate::output::{format_scoped_json, format_table};

type Controller = DirectoryController<Client>;

// ============================================================================
// Show
// ============================================================================

/// Show the directory configured for the scope
pub async fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut controller = ctx.controller();

    load(&mut controller, ctx.format).await;
    render(&ctx, &controller)
}

// ============================================================================
// Configure (interactive)
// ============================================================================

/// Show the scope's directory, then offer to create or delete it
pub async fn configure(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut controller = ctx.controller();
    let theme = ColorfulTheme::default();

    load(&mut controller, ctx.format).await;
    render(&ctx, &controller)?;
    println!();

    if controller.directory().is_none() {
        let create = Confirm::with_theme(&theme)
            .with_prompt("Create a directory sync connection now?")
            .default(true)
            .interact()?;
        if !create {
            eprintln!("{}", ctx.t("cancelled"));
            return Ok(());
        }

        let (name, provider) = prompt_new_directory(&ctx, &theme)?;
        create_for_scope(&ctx, &name, provider).await?;

        load(&mut controller, ctx.format).await;
        println!();
        return render(&ctx, &controller);
    }

    let delete = Confirm::with_theme(&theme)
        .with_prompt(format!("{}?", ctx.t("directory_sync_delete_connection")))
        .default(false)
        .interact()?;
    if !delete {
        return Ok(());
    }

    controller.open_delete_dialog();
    run_delete_dialog(&ctx, &mut controller).await
}

/// Keep the dialog up until the delete succeeds or the user backs out.
///
/// Backing out after a failed attempt reports that failure.
async fn run_delete_dialog(ctx: &CommandContext, controller: &mut Controller) -> Result<()> {
    let mut last_error = None;

    while controller.dialog().is_open() {
        let Some(directory) = controller.directory().cloned() else {
            controller.cancel_delete();
            break;
        };

        if !confirm_delete(ctx, &directory)? {
            controller.cancel_delete();
            eprintln!("{}", ctx.t("cancelled"));
            break;
        }

        match controller.request_delete().await {
            Ok(outcome) => {
                debug!("Delete finished: {:?}", outcome);
                last_error = None;
            }
            Err(e) => {
                debug!("Delete failed, dialog stays open: {}", e);
                last_error = Some(e);
            }
        }
    }

    last_error.map_or(Ok(()), Err)
}

fn prompt_new_directory(
    ctx: &CommandContext,
    theme: &ColorfulTheme,
) -> Result<(String, DirectoryProvider)> {
    let name: String = Input::with_theme(theme)
        .with_prompt(ctx.t("directory_name"))
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("Name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let providers = DirectoryProvider::SELECTABLE;
    let labels: Vec<&str> = providers.iter().map(|p| p.label()).collect();
    let selection = Select::with_theme(theme)
        .with_prompt(ctx.t("directory_provider"))
        .items(&labels)
        .default(0)
        .interact()?;

    Ok((name.trim().to_string(), providers[selection].clone()))
}

// ============================================================================
// Create
// ============================================================================

/// Create the directory for the scope
pub async fn create(
    opts: &GlobalOptions,
    name: &str,
    provider: DirectoryProvider,
    dry_run: bool,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Other("Directory name cannot be empty".to_string()));
    }

    let ctx = CommandContext::new(opts)?;
    let mut controller = ctx.controller();
    load(&mut controller, ctx.format).await;

    match controller.view() {
        ViewKind::Error { message } => return Err(Error::Query(message)),
        ViewKind::Manage { directory } => {
            return Err(ApiError::BadRequest(format!(
                "A directory sync connection already exists for {} (ID: {})",
                scope_tag(ctx.org_id),
                directory.id
            ))
            .into());
        }
        ViewKind::Loading | ViewKind::Create { .. } => {}
    }

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        eprintln!(
            "Would create directory: {} ({}) for {}",
            name.bold(),
            provider.label(),
            scope_tag(ctx.org_id)
        );
        return Ok(());
    }

    let directory = create_for_scope(&ctx, name, provider).await?;
    print_directory(&ctx, &directory)
}

/// Create the directory, then drop the scope's cached reads so the next
/// load sees it.
async fn create_for_scope(
    ctx: &CommandContext,
    name: &str,
    provider: DirectoryProvider,
) -> Result<Directory> {
    let request = CreateDirectoryRequest {
        org_id: ctx.org_id,
        name: name.to_string(),
        provider,
    };
    let directory = ctx.client.create_directory(request).await?;

    if let Err(e) = ctx.client.invalidate_directories(ctx.org_id).await {
        warn!("Failed to invalidate directory cache: {}", e);
    }
    ctx.notifier
        .show_toast(&ctx.t("directory_sync_created"), Severity::Success);

    Ok(directory)
}

// ============================================================================
// Delete
// ============================================================================

/// Delete the directory configured for the scope
pub async fn delete(opts: &GlobalOptions, yes: bool, dry_run: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut controller = ctx.controller();
    // Act on the latest state, not a cached read
    load_with(&mut controller, ctx.format, true).await;

    let directory = match controller.view() {
        ViewKind::Error { message } => return Err(Error::Query(message)),
        ViewKind::Manage { directory } => directory.clone(),
        ViewKind::Loading | ViewKind::Create { .. } => {
            ctx.notifier
                .show_toast(&ctx.t("directory_sync_no_directory"), Severity::Warning);
            return print_deleted(&ctx, &DeleteOutcome::Skipped);
        }
    };

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        eprintln!(
            "Would delete directory sync connection: \"{}\" (ID: {}) for {}",
            display_name(&directory),
            directory.id,
            scope_tag(ctx.org_id)
        );
        return Ok(());
    }

    controller.open_delete_dialog();
    if !yes && !confirm_delete(&ctx, &directory)? {
        controller.cancel_delete();
        eprintln!("{}", ctx.t("cancelled"));
        return Ok(());
    }

    let outcome = controller.request_delete().await?;
    print_deleted(&ctx, &outcome)
}

fn confirm_delete(ctx: &CommandContext, directory: &Directory) -> Result<bool> {
    eprintln!(
        "{} {}",
        "⚠".yellow(),
        ctx.t("directory_sync_delete_title").bold()
    );
    eprintln!("  {}", ctx.t("directory_sync_delete_description"));
    eprintln!(
        "  {}: {} (ID: {})",
        ctx.t("directory_name"),
        display_name(directory),
        directory.id
    );
    eprintln!();

    let confirmed = Confirm::new()
        .with_prompt(ctx.t("directory_sync_delete_confirmation"))
        .default(false)
        .interact()?;

    Ok(confirmed)
}

fn print_deleted(ctx: &CommandContext, outcome: &DeleteOutcome) -> Result<()> {
    if ctx.format != OutputFormat::Json {
        return Ok(());
    }

    let data = match outcome {
        DeleteOutcome::Deleted { directory_id } => {
            serde_json::json!({ "deleted": true, "directoryId": directory_id })
        }
        DeleteOutcome::Skipped => serde_json::json!({ "deleted": false }),
    };
    println!("{}", format_scoped_json(&data, ctx.org_id)?);
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

/// Load with a spinner on interactive terminals
async fn load(controller: &mut Controller, format: OutputFormat) {
    load_with(controller, format, false).await;
}

async fn load_with(controller: &mut Controller, format: OutputFormat, fresh: bool) {
    let spinner = (format != OutputFormat::Json && std::io::stderr().is_terminal())
        .then(|| spinner(&format!("Loading {}...", controller.t("directory_sync_title"))));

    if fresh {
        controller.load_directory_fresh().await;
    } else {
        controller.load_directory().await;
    }

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Render the controller's current view. A failed read renders nothing and
/// becomes the command's error.
fn render(ctx: &CommandContext, controller: &Controller) -> Result<()> {
    match controller.view() {
        ViewKind::Loading => {
            debug!("Read still in flight, nothing to render");
            Ok(())
        }
        ViewKind::Error { message } => Err(Error::Query(message)),
        ViewKind::Create { org_id } => match ctx.format {
            OutputFormat::Json => {
                println!("{}", format_scoped_json(&None::<Directory>, org_id)?);
                Ok(())
            }
            OutputFormat::Table => {
                let rows: Vec<DirectoryDisplay> = Vec::new();
                println!("{}", format_table(&rows, &ctx.t("directory_sync_no_directory")));
                Ok(())
            }
            OutputFormat::Pretty => {
                print_title(ctx);
                println!("{} {}", "○".dimmed(), ctx.t("directory_sync_no_directory"));
                println!("  → Create one: {}", create_hint(org_id).cyan());
                Ok(())
            }
        },
        ViewKind::Manage { directory } => {
            if ctx.format != OutputFormat::Pretty {
                return print_directory(ctx, directory);
            }

            print_title(ctx);
            print_directory(ctx, directory)?;
            println!();
            println!("{}", ctx.t("danger_zone").red().bold());
            println!(
                "  {}: {}",
                ctx.t("directory_sync_delete_connection"),
                delete_hint(ctx.org_id).cyan()
            );
            Ok(())
        }
    }
}

fn print_title(ctx: &CommandContext) {
    println!("{}", ctx.t("directory_sync_title").bold());
    println!("{}", ctx.t("directory_sync_configure").dimmed());
    println!();
}

fn print_directory(ctx: &CommandContext, directory: &Directory) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", format_scoped_json(directory, ctx.org_id)?),
        OutputFormat::Table => {
            println!("{}", format_table(&[DirectoryDisplay::from(directory)], ""))
        }
        OutputFormat::Pretty => println!(
            "{}",
            DirectoryDisplay::from(directory).render_pretty(ctx.translator.as_ref())
        ),
    }
    Ok(())
}

fn display_name(directory: &Directory) -> &str {
    directory.name.as_deref().unwrap_or(&directory.id)
}

fn scope_args(org_id: Option<i64>) -> String {
    org_id.map(|id| format!(" --org {}", id)).unwrap_or_default()
}

fn create_hint(org_id: Option<i64>) -> String {
    format!(
        "dsyncctl{} directory create --name <NAME> --provider <PROVIDER>",
        scope_args(org_id)
    )
}

fn delete_hint(org_id: Option<i64>) -> String {
    format!("dsyncctl{} directory delete", scope_args(org_id))
}
