//! Persisted user selections
//!
//! Each selection lives in a small JSON or CSV file inside the selections
//! directory. A missing file means "nothing selected" and reads as `Ok(None)`;
//! callers that need the selection turn that into
//! [`CleopeError::MissingSelection`] with [`SelectionStore::require`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CleopeError, Result};
use crate::models::{
    parse_mission_selection, parse_product_type_selection, Footprint, Mission, ObservationTimes,
    SensingRange,
};

pub const AOI_FILE: &str = "polygon.json";
pub const MISSION_FILE: &str = "m.log";
pub const SENSING_FILE: &str = "sen.log";
pub const DATES_FILE: &str = "dates.log";
pub const VARIABLE_FILE: &str = "variable.log";
pub const GMT_FILE: &str = "gmt.log";

/// Recorded mission and product type; `None` means "All"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSelection {
    pub mission: Option<Mission>,
    pub product_type: Option<String>,
}

/// Recorded date input of the series commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSelection {
    Range(SensingRange),
    Single(NaiveDate),
}

impl DateSelection {
    /// Range view; a single date spans one day
    pub fn as_range(&self) -> SensingRange {
        match self {
            DateSelection::Range(range) => *range,
            DateSelection::Single(date) => SensingRange::single(*date),
        }
    }
}

/// Parse a date written as `YYYY/MM/DD` or `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .map_err(|_| CleopeError::InvalidDate {
            value: value.to_string(),
            reason: "expected YYYY-MM-DD or YYYY/MM/DD".to_string(),
        })
}

/// Reads and writes selection files in one directory
#[derive(Debug, Clone)]
pub struct SelectionStore {
    dir: PathBuf,
}

impl SelectionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Turn an absent selection into a `MissingSelection` error
    pub fn require<T>(&self, value: Option<T>, what: &str, file: &str) -> Result<T> {
        value.ok_or_else(|| CleopeError::MissingSelection {
            what: what.to_string(),
            path: self.path(file),
        })
    }

    fn read_optional(&self, file: &str) -> Result<Option<String>> {
        let path = self.path(file);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No selection recorded");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, file: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(file);
        fs::write(&path, content)?;
        debug!(path = %path.display(), "Selection saved");
        Ok(path)
    }

    pub fn write_aoi(&self, footprint: &Footprint) -> Result<PathBuf> {
        let content = serde_json::to_string(footprint)?;
        self.write(AOI_FILE, &content)
    }

    pub fn read_aoi(&self) -> Result<Option<Footprint>> {
        match self.read_optional(AOI_FILE)? {
            Some(content) => {
                let value: serde_json::Value = serde_json::from_str(&content)?;
                Footprint::from_geojson(&value).map(Some)
            }
            None => Ok(None),
        }
    }

    pub fn write_mission(&self, selection: &MissionSelection) -> Result<PathBuf> {
        let mission = selection
            .mission
            .map(|m| m.catalogue_name().to_string())
            .unwrap_or_else(|| "All".to_string());
        let product_type = match (&selection.mission, &selection.product_type) {
            (_, Some(t)) => t.clone(),
            (Some(_), None) => "All".to_string(),
            (None, None) => "-".to_string(),
        };
        let content = serde_json::to_string(&[mission, product_type])?;
        self.write(MISSION_FILE, &content)
    }

    pub fn read_mission(&self) -> Result<Option<MissionSelection>> {
        let Some(content) = self.read_optional(MISSION_FILE)? else {
            return Ok(None);
        };

        let pair: Vec<String> = serde_json::from_str(&content)?;
        let mission_value = pair.first().map(String::as_str).unwrap_or("All");
        let type_value = pair.get(1).map(String::as_str).unwrap_or("-");

        let mission = parse_mission_selection(mission_value)?;
        let product_type = parse_product_type_selection(mission, type_value)?;
        Ok(Some(MissionSelection { mission, product_type }))
    }

    /// Record the catalogue sensing window, or `null` to clear it
    pub fn write_sensing(&self, range: Option<&SensingRange>) -> Result<PathBuf> {
        let value = range.map(|r| {
            [
                r.start().format("%Y-%m-%d").to_string(),
                r.end().format("%Y-%m-%d").to_string(),
            ]
        });
        let content = serde_json::to_string(&value)?;
        self.write(SENSING_FILE, &content)
    }

    pub fn read_sensing(&self) -> Result<Option<SensingRange>> {
        let Some(content) = self.read_optional(SENSING_FILE)? else {
            return Ok(None);
        };

        let value: Option<Vec<String>> = serde_json::from_str(&content)?;
        match value.as_deref() {
            None => Ok(None),
            Some([start, end]) => SensingRange::new(parse_date(start)?, parse_date(end)?).map(Some),
            Some(other) => Err(CleopeError::Serialization(format!(
                "{} must hold two dates, found {}",
                SENSING_FILE,
                other.len()
            ))),
        }
    }

    pub fn write_dates(&self, selection: &DateSelection) -> Result<PathBuf> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        match selection {
            DateSelection::Range(range) => {
                writer.write_record(["", "start", "stop"])?;
                writer.write_record([
                    "0".to_string(),
                    range.start().format("%Y/%m/%d").to_string(),
                    range.end().format("%Y/%m/%d").to_string(),
                ])?;
            }
            DateSelection::Single(date) => {
                writer.write_record(["", "date"])?;
                writer.write_record(["0".to_string(), date.format("%Y-%m-%d").to_string()])?;
            }
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CleopeError::Serialization(e.to_string()))?;
        let content = String::from_utf8(bytes).map_err(|e| CleopeError::Serialization(e.to_string()))?;
        self.write(DATES_FILE, &content)
    }

    pub fn read_dates(&self) -> Result<Option<DateSelection>> {
        let Some(content) = self.read_optional(DATES_FILE)? else {
            return Ok(None);
        };

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let Some(record) = reader.records().next().transpose()? else {
            return Ok(None);
        };
        let field = |i: usize| record.get(i).unwrap_or_default();

        match (column("start"), column("stop"), column("date")) {
            (Some(start), Some(stop), _) => {
                let range = SensingRange::new(parse_date(field(start))?, parse_date(field(stop))?)?;
                Ok(Some(DateSelection::Range(range)))
            }
            (_, _, Some(date)) => Ok(Some(DateSelection::Single(parse_date(field(date))?))),
            _ => Err(CleopeError::Serialization(format!(
                "{} needs start/stop or date columns",
                DATES_FILE
            ))),
        }
    }

    pub fn write_variable(&self, code: &str) -> Result<PathBuf> {
        let content = serde_json::to_string(code)?;
        self.write(VARIABLE_FILE, &content)
    }

    pub fn read_variable(&self) -> Result<Option<String>> {
        match self.read_optional(VARIABLE_FILE)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    pub fn write_gmt(&self, times: ObservationTimes) -> Result<PathBuf> {
        let (gmt00, gmt12) = times.flags();
        let content = format!(
            ",GMT00,GMT12\n0,{},{}\n",
            python_bool(gmt00),
            python_bool(gmt12)
        );
        self.write(GMT_FILE, &content)
    }

    pub fn read_gmt(&self) -> Result<Option<ObservationTimes>> {
        let Some(content) = self.read_optional(GMT_FILE)? else {
            return Ok(None);
        };

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let Some(record) = reader.records().next().transpose()? else {
            return Ok(None);
        };

        let flag = |i: usize| -> Result<bool> {
            let value = record.get(i).unwrap_or_default().trim();
            match value.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(CleopeError::Serialization(format!(
                    "{}: invalid flag {:?}",
                    GMT_FILE, value
                ))),
            }
        };

        Ok(Some(ObservationTimes::from_flags(flag(1)?, flag(2)?)))
    }
}

fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
