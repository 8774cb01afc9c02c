//! Command implementations

mod bands;
mod config;
mod lookup;
mod monthly;
mod search;
mod select;
mod series;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Select(args) => select::execute(args, &config, &output),
        Commands::Search(args) => search::execute(args, &config, &output),
        Commands::Lookup(args) => lookup::execute(args, &config, &output),
        Commands::Series(args) => series::execute(args, &config, &output),
        Commands::Monthly(args) => monthly::execute(args, &config, &output),
        Commands::Bands(args) => bands::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}
