//! Select command implementation

use crate::cli::{SelectArgs, SelectCommand};
use crate::config_loader::selection_store;
use crate::output::OutputWriter;
use crate::output_types::SelectOutput;
use anyhow::{Context, Result};
use cleope_core::config::LayeredConfig;
use cleope_core::error::CleopeError;
use cleope_core::models::{
    parse_mission_selection, parse_product_type_selection, AtmosphereVariable, LandVariable,
    ObservationTimes, SensingRange,
};
use cleope_core::selections::{parse_date, DateSelection, MissionSelection};
use cleope_geo::FootprintExt;
use std::fs;
use std::path::Path;

pub fn execute(args: SelectArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let store = selection_store(config);

    let (selection, path, value) = match args.command {
        SelectCommand::Aoi { path } => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let footprint = cleope_geo::footprint_from_geojson_str(&content)?;
            cleope_geo::ensure_valid(&footprint)?;

            if let Some([lon, lat]) = footprint.centroid_coords() {
                output.info(format!("Area of interest centred on {:.4}, {:.4}", lat, lon));
            }

            let saved = store.write_aoi(&footprint)?;
            ("area of interest", saved, serde_json::to_value(&footprint)?)
        }

        SelectCommand::Mission { mission, product_type } => {
            let mission = parse_mission_selection(&mission)?;
            let product_type =
                parse_product_type_selection(mission, product_type.as_deref().unwrap_or(""))?;
            let selection = MissionSelection { mission, product_type };

            let saved = store.write_mission(&selection)?;
            ("mission", saved, serde_json::to_value(&selection)?)
        }

        SelectCommand::Sensing { start, end, clear } => {
            let range = match (start, end, clear) {
                (Some(start), Some(end), false) => {
                    Some(SensingRange::new(parse_date(&start)?, parse_date(&end)?)?)
                }
                _ => None,
            };

            let saved = store.write_sensing(range.as_ref())?;
            ("sensing window", saved, serde_json::to_value(range)?)
        }

        SelectCommand::Variable { name } => {
            let code = variable_code(&name)?;
            let saved = store.write_variable(code)?;
            ("variable", saved, serde_json::json!(code))
        }

        SelectCommand::Gmt { gmt00, gmt12 } => {
            let times = ObservationTimes::from_flags(gmt00, gmt12);
            let saved = store.write_gmt(times)?;
            ("analysis times", saved, serde_json::to_value(times)?)
        }

        SelectCommand::Date { start, end } => {
            let selection = match end {
                Some(end) => {
                    DateSelection::Range(SensingRange::new(parse_date(&start)?, parse_date(&end)?)?)
                }
                None => DateSelection::Single(parse_date(&start)?),
            };
            let saved = store.write_dates(&selection)?;
            ("date", saved, serde_json::to_value(selection)?)
        }
    };

    report(output, selection, &path, value)
}

/// Directory code of an atmosphere or land variable given by label or code
fn variable_code(name: &str) -> Result<&'static str, CleopeError> {
    if let Ok(variable) = name.parse::<AtmosphereVariable>() {
        return Ok(variable.code());
    }
    name.parse::<LandVariable>().map(|variable| variable.code())
}

fn report(output: &OutputWriter, selection: &str, path: &Path, value: serde_json::Value) -> Result<()> {
    if output.is_json() {
        output.result(SelectOutput {
            selection: selection.to_string(),
            file: path.display().to_string(),
            value,
        })?;
    } else {
        output.success(format!("Recorded {} in {}", selection, path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_code_accepts_labels_and_codes() {
        assert_eq!(variable_code("carbon_monoxide").unwrap(), "tcco");
        assert_eq!(variable_code("tc_ch4").unwrap(), "tc_ch4");
        assert_eq!(variable_code("Leaf_Area_Index_1km").unwrap(), "LAI");
        assert_eq!(variable_code("NDVI").unwrap(), "NDVI");
        assert!(matches!(
            variable_code("ozone"),
            Err(CleopeError::UnknownVariable { .. })
        ));
    }
}
