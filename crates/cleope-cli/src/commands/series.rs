//! Series command implementation

use crate::cli::{SeriesArgs, SeriesKind};
use crate::output::OutputWriter;
use crate::output_types::SeriesOutput;
use anyhow::Result;
use cleope_core::config::LayeredConfig;
use cleope_core::models::{AtmosphereVariable, Frequency, SensingRange, SeriesProduct};
use cleope_core::selections::{SelectionStore, DATES_FILE, VARIABLE_FILE};
use cleope_resolver::{GlobLocator, SeriesResolver};
use std::path::PathBuf;

pub fn execute(args: SeriesArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let settings = config.settings();
    let store = SelectionStore::new(&settings.selections_dir);
    let frequency: Frequency = args.freq.parse()?;
    let range = store.require(store.read_dates()?, "date", DATES_FILE)?.as_range();

    let locator = GlobLocator;
    let resolver = SeriesResolver::new(&locator, &settings);

    let (product, label, files) = match args.product {
        SeriesKind::Atmosphere => {
            let code = store.require(store.read_variable()?, "variable", VARIABLE_FILE)?;
            let variable: AtmosphereVariable = code.parse()?;
            let times = store.read_gmt()?.unwrap_or_default();
            let files = resolver.resolve_atmosphere(variable, &range, frequency, times)?;
            (SeriesProduct::Atmosphere(variable), variable.code().to_string(), files)
        }
        SeriesKind::Marine => {
            let files = resolver.resolve_marine(&range, frequency)?;
            (SeriesProduct::Marine, "SST".to_string(), files)
        }
    };

    let pseudopaths = resolver.compose_pseudopaths(product, &range, frequency);
    report(output, &label, frequency, &range, &pseudopaths, &files)
}

fn report(
    output: &OutputWriter,
    label: &str,
    frequency: Frequency,
    range: &SensingRange,
    pseudopaths: &[PathBuf],
    files: &[PathBuf],
) -> Result<()> {
    let display = |paths: &[PathBuf]| -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    };

    if output.is_json() {
        return output.result(SeriesOutput {
            product: label.to_string(),
            frequency: frequency.to_string(),
            start: range.start().to_string(),
            end: range.end().to_string(),
            pseudopaths: display(pseudopaths),
            files: display(files),
        });
    }

    output.section(format!("{} series", label));
    output.kv("Dates", format!("{} to {}", range.start(), range.end()));
    output.kv("Frequency", frequency);
    output.kv("Directories", pseudopaths.len());
    for file in files {
        println!("{}", file.display());
    }

    if files.is_empty() {
        output.warning("No files found on the mount for the selected dates");
    } else {
        output.success(format!("{} files resolved", files.len()));
    }
    Ok(())
}
