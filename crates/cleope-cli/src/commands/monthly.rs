//! Monthly command implementation

use crate::cli::MonthlyArgs;
use crate::output::OutputWriter;
use crate::output_types::MonthlyOutput;
use anyhow::Result;
use chrono::NaiveDate;
use cleope_core::config::LayeredConfig;
use cleope_core::models::LandVariable;
use cleope_core::selections::{parse_date, DateSelection, SelectionStore, DATES_FILE, VARIABLE_FILE};
use cleope_resolver::{GlobLocator, MonthlyResolver};

pub fn execute(args: MonthlyArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let settings = config.settings();
    let store = SelectionStore::new(&settings.selections_dir);

    let variable: LandVariable = match args.variable {
        Some(name) => name.parse()?,
        None => store.require(store.read_variable()?, "variable", VARIABLE_FILE)?.parse()?,
    };
    let requested = match args.date {
        Some(value) => parse_date(&value)?,
        None => requested_date(store.require(store.read_dates()?, "date", DATES_FILE)?),
    };

    let locator = GlobLocator;
    let resolver = MonthlyResolver::new(&locator, &settings);
    let file = resolver.resolve(variable, requested)?;

    if output.is_json() {
        output.result(MonthlyOutput {
            variable: variable.code().to_string(),
            requested: requested.to_string(),
            file: file.display().to_string(),
        })?;
    } else {
        output.kv("Variable", variable.label());
        output.kv("Requested", requested);
        println!("{}", file.display());
    }

    Ok(())
}

/// Date a recorded selection points at; ranges resolve at their end
fn requested_date(selection: DateSelection) -> NaiveDate {
    match selection {
        DateSelection::Single(date) => date,
        DateSelection::Range(range) => range.end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleope_core::models::SensingRange;

    #[test]
    fn test_range_resolves_at_its_end() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 3, 15).unwrap();
        let range = SensingRange::new(start, end).unwrap();

        assert_eq!(requested_date(DateSelection::Range(range)), end);
        assert_eq!(requested_date(DateSelection::Single(start)), start);
    }
}
