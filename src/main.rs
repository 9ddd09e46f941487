//! Command-line entry point for link-skills.
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use link_skills::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command_name();
    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(logging::Logger::new(command));

    match args.command {
        cli::Command::Sync(opts) => commands::sync::run(&opts, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
