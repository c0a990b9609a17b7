//! audipomarks CLI
//!
//! Splits, joins and generates Audipo mark storages for a folder of audio
//! files.

mod cli;
mod commands;
mod error;
mod logging;
mod prompt;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};
use marks_core::{AcceptAll, MarkOptions, ParamOverrides, Resolver};
use prompt::TerminalResolver;

fn main() {
    if let Err(e) = run() {
        if e.is_abort() {
            eprintln!("{}", "Aborting...".yellow().bold());
        } else {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let mut resolver: Box<dyn Resolver> = if cli.yes {
        Box::new(AcceptAll)
    } else {
        Box::new(TerminalResolver::new())
    };

    execute_command(cli.command, resolver.as_mut())
}

fn execute_command(cmd: Commands, resolver: &mut dyn Resolver) -> Result<()> {
    match cmd {
        Commands::Split {
            input_file,
            root,
            normalize,
        } => commands::run_split(&input_file, &root, normalize, resolver),
        Commands::Join { dir } => commands::run_join(&dir, resolver),
        Commands::Mark {
            dir,
            recursive,
            duration,
            noise,
            ffmpeg,
        } => {
            let options = MarkOptions {
                recursive,
                overrides: ParamOverrides { duration, noise },
            };
            commands::run_mark(&dir, &options, ffmpeg.as_deref())
        }
    }
}
