//! `ttfe`: mine the top-K threat/frequency patterns of a transaction file.

mod args;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match commands::execute(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("ttfe: {err:#}");
            ExitCode::FAILURE
        }
    }
}
