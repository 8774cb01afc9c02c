//! CLEOPE CLI - Command-line interface
//!
//! Records selections, searches the catalogue and resolves product paths on
//! the Copernicus mount.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod output_types;
mod progress;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr so JSON output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let cli_error = errors::from_anyhow(error);
            if json {
                eprintln!("{}", cli_error.to_json());
            } else {
                cli_error.display();
            }
            ExitCode::FAILURE
        }
    }
}
