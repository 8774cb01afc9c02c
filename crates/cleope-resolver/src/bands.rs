//! Band and geolocation files inside unpacked Sentinel-2 and Sentinel-3
//! products.

use chrono::NaiveDateTime;
use cleope_core::error::{CleopeError, Result};
use cleope_core::models::{BandIndex, MsiLevel, OlciFamily, OlciKey, Polarization, SlstrBand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::locator::{recursive_pattern, ProductLocator};

const GEO_COORDINATES: &str = "geo_coordinates.nc";

/// Geolocation and measurement files of one OLCI product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OlciFiles {
    pub product: PathBuf,
    pub family: OlciFamily,
    pub geo_coordinates: PathBuf,
    pub band: PathBuf,
}

/// Geodetic and brightness temperature files of one SLSTR product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlstrFiles {
    pub product: PathBuf,
    pub geodetic: PathBuf,
    pub band: PathBuf,
}

/// The two band images of a normalized difference index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsiBandPair {
    pub product: PathBuf,
    pub level: MsiLevel,
    pub index: BandIndex,
    pub first: PathBuf,
    pub second: PathBuf,
    pub sensing_time: Option<NaiveDateTime>,
}

fn product_name(product: &Path) -> String {
    product
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn first_match(locator: &dyn ProductLocator, product: &Path, file: &str) -> Result<Option<PathBuf>> {
    Ok(locator.find(&recursive_pattern(product, file))?.into_iter().next())
}

/// Sensing start encoded in the third `_` field of a product name
pub fn sensing_time_from_name(name: &str) -> Result<NaiveDateTime> {
    let invalid = |reason: &str| CleopeError::InvalidDate {
        value: name.to_string(),
        reason: reason.to_string(),
    };

    let field = name.split('_').nth(2).ok_or_else(|| invalid("no sensing time field"))?;
    NaiveDateTime::parse_from_str(field, "%Y%m%dT%H%M%S")
        .map_err(|_| invalid("sensing time is not YYYYMMDDTHHMMSS"))
}

/// Geolocation and `key` files of every OLCI level-2 product in the list.
///
/// Products of another family, or missing either file, are skipped.
pub fn olci_files(
    locator: &dyn ProductLocator,
    products: &[PathBuf],
    key: OlciKey,
) -> Result<Vec<OlciFiles>> {
    let mut files = Vec::new();

    for product in products {
        let name = product_name(product);
        let Some(family) = OlciFamily::from_product_name(&name) else {
            debug!(product = %name, "Not an OLCI level-2 product, skipped");
            continue;
        };

        let geo = first_match(locator, product, GEO_COORDINATES)?;
        let band = first_match(locator, product, key.file_name())?;
        match (geo, band) {
            (Some(geo_coordinates), Some(band)) => files.push(OlciFiles {
                product: product.clone(),
                family,
                geo_coordinates,
                band,
            }),
            _ => warn!(
                product = %name,
                key = %key,
                "Geolocation or measurement file missing, skipped"
            ),
        }
    }

    Ok(files)
}

/// Band images of `index` inside one MSI product
pub fn msi_band_pair(
    locator: &dyn ProductLocator,
    product: &Path,
    index: BandIndex,
) -> Result<MsiBandPair> {
    let name = product_name(product);
    let level = MsiLevel::from_product_name(&name).ok_or_else(|| CleopeError::UnsupportedProduct {
        product: name.clone(),
        reason: "not an MSI level-1C or level-2A product".to_string(),
    })?;

    if !index.supports(level) {
        return Err(CleopeError::UnsupportedProduct {
            product: name,
            reason: format!("{} needs a level-2A product", index),
        });
    }

    let (first_band, second_band) = index.bands();
    let find_band = |band: &str| -> Result<PathBuf> {
        let pattern = level.band_pattern(band);
        first_match(locator, product, &pattern)?.ok_or_else(|| CleopeError::MissingFile {
            product: product.to_path_buf(),
            pattern,
        })
    };

    Ok(MsiBandPair {
        product: product.to_path_buf(),
        level,
        index,
        first: find_band(first_band)?,
        second: find_band(second_band)?,
        sensing_time: sensing_time_from_name(&name).ok(),
    })
}

/// Band pairs of several products, skipping those that fail
pub fn msi_band_pairs(
    locator: &dyn ProductLocator,
    products: &[PathBuf],
    index: BandIndex,
) -> Vec<MsiBandPair> {
    products
        .iter()
        .filter_map(|product| match msi_band_pair(locator, product, index) {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!(product = %product.display(), error = %e, "Product skipped");
                None
            }
        })
        .collect()
}

/// Geodetic and `band` files of every SLSTR product in the list.
///
/// Products missing either file are skipped.
pub fn slstr_files(
    locator: &dyn ProductLocator,
    products: &[PathBuf],
    band: SlstrBand,
) -> Result<Vec<SlstrFiles>> {
    let mut files = Vec::new();

    for product in products {
        let geodetic = first_match(locator, product, SlstrBand::GEODETIC_FILE)?;
        let measurement = first_match(locator, product, band.file_name())?;
        match (geodetic, measurement) {
            (Some(geodetic), Some(band)) => files.push(SlstrFiles {
                product: product.clone(),
                geodetic,
                band,
            }),
            _ => warn!(
                product = %product_name(product),
                band = %band,
                "Geodetic or brightness temperature file missing, skipped"
            ),
        }
    }

    Ok(files)
}

/// Measurement images of one polarisation across Sentinel-1 products.
///
/// Products are visited in name order; one without a matching image is
/// skipped.
pub fn sar_images(
    locator: &dyn ProductLocator,
    products: &[PathBuf],
    polarization: Polarization,
) -> Result<Vec<PathBuf>> {
    let mut sorted: Vec<&PathBuf> = products.iter().collect();
    sorted.sort();

    let mut images = Vec::new();
    for product in sorted {
        let found = locator.find(&recursive_pattern(product, &polarization.tiff_pattern()))?;
        if found.is_empty() {
            warn!(
                product = %product_name(product),
                polarization = %polarization,
                "No measurement image for this polarisation, skipped"
            );
        }
        images.extend(found);
    }

    Ok(images)
}
