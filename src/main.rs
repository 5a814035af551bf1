//! Cursor Chat Export - Archive chat history from Cursor workspace databases.
//!
//! Every workspace under Cursor's `workspaceStorage` directory keeps a
//! `state.vscdb` `SQLite` file. This tool reads the chat panel history stored
//! there and writes one Markdown, text or JSON file per workspace.
//!
//!   cursor-chat-export                         # Export with default paths
//!   cursor-chat-export export -f json -o out   # Export as JSON into ./out
//!   cursor-chat-export list                    # Show workspaces found
//!   cursor-chat-export paths                   # Show resolved paths

mod application;
mod cli;
mod domain;
mod infrastructure;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Parser;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{format_summary, run_export};
use cli::{Cli, Commands, ExportArgs};
use domain::{ConfigOverrides, WorkspaceStore};
use infrastructure::{
    default_config_path, ensure_config_exists, resolve_export_config, WorkspaceLocator,
};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let config_path = cli.config.as_deref();

    match cli
        .command
        .unwrap_or_else(|| Commands::Export(ExportArgs::default()))
    {
        Commands::Export(args) => cmd_export(args, config_path),
        Commands::List { root } => cmd_list(root, config_path),
        Commands::Paths(args) => cmd_paths(args, config_path),
        Commands::InitConfig => cmd_init_config(config_path),
    }
}

/// Export chats from all workspaces.
fn cmd_export(args: ExportArgs, config_path: Option<&Path>) -> domain::Result<()> {
    let config = resolve_export_config(args.into(), config_path)?;
    let summary = run_export(&config)?;

    for path in &summary.files_written {
        println!("{} {}", "✓".green(), path.display());
    }

    println!();
    println!("{}", format_summary(&summary));
    println!(
        "\n{} Export completed into {}/",
        "📁".bold(),
        config.output_dir.display()
    );

    Ok(())
}

/// List workspaces command.
fn cmd_list(root: Option<PathBuf>, config_path: Option<&Path>) -> domain::Result<()> {
    let overrides = ConfigOverrides {
        root_dir: root,
        ..Default::default()
    };
    let config = resolve_export_config(overrides, config_path)?;
    let locator = WorkspaceLocator::new(&config.root_dir)?;

    let mut workspaces: Vec<WorkspaceStore> = locator.workspaces()?.collect();
    workspaces.sort_by_key(WorkspaceStore::name);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Workspace", "State DB", "Modified"]);

    let mut with_db = 0;
    for ws in &workspaces {
        let (status, modified) = match ws.state_db.as_deref() {
            Some(path) => {
                with_db += 1;
                ("yes".to_string(), modified_at(path))
            }
            None => ("no".to_string(), "-".to_string()),
        };
        table.add_row(vec![ws.name(), status, modified]);
    }

    println!("{}", "📂 Cursor Workspaces".bold());
    println!("   {}", locator.root().display());
    println!();
    println!("{table}");
    println!();
    println!(
        "Total: {} workspace(s), {} with a state database",
        workspaces.len().to_string().cyan(),
        with_db.to_string().green()
    );

    Ok(())
}

/// Show resolved paths command.
fn cmd_paths(args: ExportArgs, config_path: Option<&Path>) -> domain::Result<()> {
    let config = resolve_export_config(args.into(), config_path)?;
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    println!("{}", "📂 Cursor Chat Export Paths".bold());
    println!();
    println!("  {} {}", "root:  ".green(), config.root_dir.display());
    println!("  {} {}", "output:".blue(), config.output_dir.display());
    println!("  {} {}", "format:".yellow(), config.format);
    println!("  {} {}", "config:".normal(), config_file.display());

    Ok(())
}

/// Write the default config file.
fn cmd_init_config(config_path: Option<&Path>) -> domain::Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    if ensure_config_exists(&path)? {
        println!("{} Created {}", "✓".green().bold(), path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }

    Ok(())
}

/// Last modification time of a file, for display.
fn modified_at(path: &Path) -> String {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_or_else(
            |_| "-".to_string(),
            |t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string(),
        )
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
