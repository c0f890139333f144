//! tabgroups - save and restore named groups of open editor tabs
//!
#![doc = "Main entry point for the tabgroups command-line tool."]

use anyhow::{Context, Result};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tabgroups::cli::{Cli, Commands};
use tabgroups::commands::{self, groups};
use tabgroups::config::{default_config_path, Config};
use tabgroups::editor::CliEditor;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config = Config::load(&config_path, &cli)?.with_default_workspace(&cwd, cli.no_workspace);

    // Validate configuration
    config.validate()?;

    let files = match &cli.command {
        Commands::Save { files, .. } | Commands::AutoSave { files } => files.clone(),
        _ => Vec::new(),
    };
    let editor = Arc::new(CliEditor::new(&files, &cwd, config.opener.clone()));
    let mut manager = commands::open_manager(&config, editor)?;

    // Execute command
    match cli.command {
        Commands::List { json } => groups::list_groups(&manager, json).await,
        Commands::Save { name, .. } => {
            tracing::debug!(group = %name, files = files.len(), "Saving tab group");
            groups::save_group(&manager, &name).await
        }
        Commands::Load { name } => groups::load_group(&manager, &name).await,
        Commands::Delete { name, yes } => groups::delete_group(&manager, &name, yes).await,
        Commands::Rename { old_name, new_name } => {
            groups::rename_group(&manager, &old_name, &new_name).await
        }
        Commands::SetDefault { name } => groups::set_default_group(&manager, &name).await,
        Commands::Default { json } => groups::show_default_group(&manager, json).await,
        Commands::AutoSave { .. } => groups::auto_save(&manager).await,
        Commands::AutoRestore => groups::auto_restore(&manager).await,
        Commands::Settings { command } => {
            commands::settings::handle_settings(&mut manager, command).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr; stdout carries command output and opened paths.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "tabgroups=debug"
    } else {
        "tabgroups=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
