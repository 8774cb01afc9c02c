//! CLEOPE Geo - Area-of-interest footprints and product coverage
//!
//! This crate turns drawn or imported areas of interest into validated
//! footprints, parses the WKT coverage of catalogue results, and provides
//! the small spatial helpers used when presenting results on a map.

pub mod coverage;
pub mod models;
pub mod spatial;
pub mod validation;

pub use models::{footprint_from_geojson_str, FootprintExt};
pub use validation::{ensure_valid, validate_footprint, ValidationResult};
