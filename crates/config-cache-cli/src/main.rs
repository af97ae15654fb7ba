//! config-cache CLI
//!
//! Reads configuration files through the cached reader and prints values.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!(directory = %cli.dir.display(), "Verbose mode enabled");

    let output = match cli.command {
        Commands::Get {
            file,
            key,
            parser,
            kind,
        } => commands::run_get(&cli.dir, &file, &key, parser.as_deref(), kind)?,
        Commands::Dump { file, parser } => {
            commands::run_dump(&cli.dir, &file, parser.as_deref())?
        }
        Commands::Detect { file } => commands::run_detect(&cli.dir, &file)?,
    };
    println!("{output}");
    Ok(())
}
