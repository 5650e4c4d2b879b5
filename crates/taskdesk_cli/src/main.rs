//! TaskDesk command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, start optional file logging, dispatch one command.
//! - Report failures on stderr with a non-zero exit code.

mod cli;
mod commands;
mod draft;
mod render;

use clap::Parser;
use std::process::ExitCode;
use taskdesk_core::{default_log_level, init_logging};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let mut stdout = std::io::stdout().lock();
    match commands::run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
