//! Spatial helpers for presenting an area of interest and its results.
//!
//! Map widgets take (lat, lon) pairs, so the location helpers swap the
//! (lon, lat) order used everywhere else.

use cleope_core::error::Result;
use cleope_core::models::{CatalogueResult, Footprint};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::intersects::Intersects;
use geo::{MultiPolygon, Rect};
use tracing::debug;

use crate::coverage::parse_coverage;
use crate::models::FootprintExt;

/// Vertices of the area of interest as (lat, lon)
pub fn map_locations(footprint: &Footprint) -> Vec<(f64, f64)> {
    footprint.vertices().iter().map(|[lon, lat]| (*lat, *lon)).collect()
}

/// Map centre as (lat, lon): the first drawn vertex
pub fn map_centre(footprint: &Footprint) -> Option<(f64, f64)> {
    footprint.vertices().first().map(|[lon, lat]| (*lat, *lon))
}

/// Polygon outlines of a result coverage as (lat, lon) rings
pub fn coverage_locations(coverage: &MultiPolygon<f64>) -> Vec<Vec<(f64, f64)>> {
    coverage
        .iter()
        .map(|polygon| polygon.exterior().coords().map(|c| (c.y, c.x)).collect())
        .collect()
}

/// Bounding box of the area of interest
pub fn bounding_box(footprint: &Footprint) -> Result<Option<Rect<f64>>> {
    Ok(footprint.to_geo_polygon()?.bounding_rect())
}

/// Whether a result's coverage touches the area of interest
pub fn result_intersects(aoi: &Footprint, result: &CatalogueResult) -> Result<bool> {
    let polygon = aoi.to_geo_polygon()?;
    let coverage = parse_coverage(&result.footprint)?;
    let hit = coverage.intersects(&polygon);
    if !hit {
        debug!(product = %result.name, "Result coverage does not touch the area of interest");
    }
    Ok(hit)
}
