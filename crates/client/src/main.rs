//! Command line front end for character sheets.
//!
//! Run with: `sheet <command>`

mod commands;
mod config;
mod dirs;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Defaults, Eval, Scan, Show};

use crate::config::ClientConfig;

/// Inspect characters and attribute sets
#[derive(Parser)]
#[command(name = "sheet")]
#[command(about = "Character sheet attribute tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Show a character file's attributes
    Show(Show),

    /// List the attribute sets in the library
    Scan(Scan),

    /// Write the standard attribute set to a file
    Defaults(Defaults),

    /// Evaluate a formula, optionally against a character
    Eval(Eval),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config.log_dir)?;

    match cli.command {
        Command::Show(cmd) => cmd.execute(&config),
        Command::Scan(cmd) => cmd.execute(&config),
        Command::Defaults(cmd) => cmd.execute(),
        Command::Eval(cmd) => cmd.execute(&config),
    }
}
