//! Command-line interface definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "link-skills",
    about = "Copy configured skills from source directories into agent skill directories",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn command_name(&self) -> &'static str {
        match self.command {
            Command::Sync(_) => "sync",
            Command::Version => "version",
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Make every enabled target contain exactly the configured skills
    Sync(SyncOpts),
    /// Print version information
    Version,
}

/// Options for the `sync` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Path to the configuration file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Preview changes without applying
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}
