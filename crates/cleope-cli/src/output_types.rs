use cleope_core::models::{CatalogueResult, ResultRow};
use cleope_resolver::{MsiBandPair, OlciFiles, SlstrFiles};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// Output for select commands
#[derive(Debug, Serialize)]
pub struct SelectOutput {
    pub selection: String,
    pub file: String,
    pub value: serde_json::Value,
}

/// Output for search command
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub total: u64,
    pub rows: usize,
    pub offline: usize,
    pub csv_path: String,
    pub products: Vec<ProductRow>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ProductRow {
    #[tabled(rename = "Page")]
    pub page: usize,
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Sensing start")]
    pub begin_position: String,
    #[tabled(rename = "Size (MB)")]
    pub size_mb: String,
    #[tabled(rename = "Offline")]
    pub offline: bool,
}

impl From<&ResultRow> for ProductRow {
    fn from(row: &ResultRow) -> Self {
        Self {
            page: row.page,
            index: row.index,
            name: row.product.name.clone(),
            begin_position: row.product.begin_position.format("%Y-%m-%d %H:%M:%S").to_string(),
            size_mb: format!("{:.1}", row.product.size as f64 / 1_048_576.0),
            offline: row.product.offline,
        }
    }
}

/// Output for `search --dry-run`
#[derive(Debug, Serialize)]
pub struct SearchPlan {
    pub dry_run: bool,
    /// West, south, east, north
    pub bounding_box: Option<[f64; 4]>,
    pub steps: Vec<PlannedStep>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedStep {
    Count { url: String },
    Page { top: usize, skip: usize, url: String },
    Write { path: String },
}

/// Output for lookup command
#[derive(Debug, Serialize)]
pub struct LookupOutput {
    pub products: Vec<LookupRow>,
    pub offline: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct LookupRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Mount path")]
    pub mount_path: String,
    #[tabled(rename = "Offline")]
    pub offline: bool,
    #[tabled(rename = "On mount")]
    pub restored: bool,
}

impl LookupRow {
    pub fn new(product: &CatalogueResult, mount_path: String, restored: bool) -> Self {
        Self {
            name: product.name.clone(),
            mount_path,
            offline: product.offline,
            restored,
        }
    }
}

/// Output for series command
#[derive(Debug, Serialize)]
pub struct SeriesOutput {
    pub product: String,
    pub frequency: String,
    pub start: String,
    pub end: String,
    pub pseudopaths: Vec<String>,
    pub files: Vec<String>,
}

/// Output for monthly command
#[derive(Debug, Serialize)]
pub struct MonthlyOutput {
    pub variable: String,
    pub requested: String,
    pub file: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// Output for bands commands
#[derive(Debug, Serialize)]
pub struct BandsOutput<T> {
    pub index: String,
    pub products: usize,
    pub files: Vec<T>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct OlciRow {
    #[tabled(rename = "Product")]
    pub product: String,
    #[tabled(rename = "Family")]
    pub family: String,
    #[tabled(rename = "Geolocation")]
    pub geo_coordinates: String,
    #[tabled(rename = "Measurement")]
    pub band: String,
}

impl From<&OlciFiles> for OlciRow {
    fn from(files: &OlciFiles) -> Self {
        Self {
            product: file_name(&files.product),
            family: format!("{:?}", files.family),
            geo_coordinates: files.geo_coordinates.display().to_string(),
            band: files.band.display().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct SlstrRow {
    #[tabled(rename = "Product")]
    pub product: String,
    #[tabled(rename = "Geodetic")]
    pub geodetic: String,
    #[tabled(rename = "Brightness temperature")]
    pub band: String,
}

impl From<&SlstrFiles> for SlstrRow {
    fn from(files: &SlstrFiles) -> Self {
        Self {
            product: file_name(&files.product),
            geodetic: files.geodetic.display().to_string(),
            band: files.band.display().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct MsiRow {
    #[tabled(rename = "Product")]
    pub product: String,
    #[tabled(rename = "Sensing time")]
    pub sensing_time: String,
    #[tabled(rename = "First band")]
    pub first: String,
    #[tabled(rename = "Second band")]
    pub second: String,
}

impl From<&MsiBandPair> for MsiRow {
    fn from(pair: &MsiBandPair) -> Self {
        Self {
            product: file_name(&pair.product),
            sensing_time: pair
                .sensing_time
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
            first: pair.first.display().to_string(),
            second: pair.second.display().to_string(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
