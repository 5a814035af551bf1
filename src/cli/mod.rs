//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ConfigOverrides;

/// Cursor Chat Export - Export chat history from Cursor workspace databases.
#[derive(Parser, Debug)]
#[command(name = "cursor-chat-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `export` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export chats from every workspace database (default).
    Export(ExportArgs),

    /// List workspaces and whether they hold a state database.
    List {
        /// workspaceStorage directory to scan.
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Show the resolved paths and format.
    Paths(ExportArgs),

    /// Write a default config file if none exists.
    InitConfig,
}

/// Location and format overrides shared by several commands.
#[derive(Args, Debug, Default, Clone)]
pub struct ExportArgs {
    /// workspaceStorage directory to scan.
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Directory to write exported files to.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: markdown, raw, or json.
    #[arg(short, long)]
    pub format: Option<String>,
}

impl From<ExportArgs> for ConfigOverrides {
    fn from(args: ExportArgs) -> Self {
        Self {
            root_dir: args.root,
            output_dir: args.output,
            format: args.format,
        }
    }
}
