//! Footprint ingestion and conversion to the `geo` crate.
//!
//! Areas of interest arrive as GeoJSON: a bare geometry as written by the map
//! selection, or a Feature / FeatureCollection exported from a desktop GIS.
//! Only Polygon and LineString geometries are accepted.

use cleope_core::error::{CleopeError, Result};
use cleope_core::models::Footprint;
use geo::algorithm::centroid::Centroid;

/// Parse GeoJSON text into a footprint
pub fn footprint_from_geojson_str(content: &str) -> Result<Footprint> {
    let geojson: geojson::GeoJson = content.parse().map_err(|e| CleopeError::InvalidFootprint {
        reason: format!("Failed to parse GeoJSON: {}", e),
    })?;

    let geometry = match geojson {
        geojson::GeoJson::Geometry(geometry) => geometry,
        geojson::GeoJson::Feature(feature) => {
            feature.geometry.ok_or_else(|| CleopeError::InvalidFootprint {
                reason: "Feature has no geometry".to_string(),
            })?
        }
        geojson::GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .find_map(|feature| feature.geometry)
            .ok_or_else(|| CleopeError::InvalidFootprint {
                reason: "FeatureCollection has no feature with a geometry".to_string(),
            })?,
    };

    footprint_from_geometry(&geometry)
}

/// Convert a GeoJSON geometry into a footprint
pub fn footprint_from_geometry(geometry: &geojson::Geometry) -> Result<Footprint> {
    match &geometry.value {
        geojson::Value::Polygon(rings) => {
            let exterior = rings.first().ok_or_else(|| CleopeError::InvalidFootprint {
                reason: "Polygon has no exterior ring".to_string(),
            })?;
            Ok(Footprint::polygon(positions(exterior)?))
        }
        geojson::Value::LineString(line) => Ok(Footprint::line_string(positions(line)?)),
        other => Err(CleopeError::InvalidFootprint {
            reason: format!("{} is not a supported area of interest", value_name(other)),
        }),
    }
}

fn value_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn positions(line: &[Vec<f64>]) -> Result<Vec<[f64; 2]>> {
    line.iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Ok([*lon, *lat]),
            _ => Err(CleopeError::InvalidFootprint {
                reason: format!("position {:?} needs longitude and latitude", position),
            }),
        })
        .collect()
}

/// Extension trait for Footprint with geo-crate operations
pub trait FootprintExt {
    /// Closed polygon in (lon, lat)
    fn to_geo_polygon(&self) -> Result<geo::Polygon<f64>>;

    /// Get the centroid as coordinates
    fn centroid_coords(&self) -> Option<[f64; 2]>;
}

impl FootprintExt for Footprint {
    fn to_geo_polygon(&self) -> Result<geo::Polygon<f64>> {
        let ring: Vec<geo::Coord<f64>> = self
            .closed_ring()?
            .into_iter()
            .map(|[x, y]| geo::Coord { x, y })
            .collect();
        Ok(geo::Polygon::new(geo::LineString::new(ring), vec![]))
    }

    fn centroid_coords(&self) -> Option<[f64; 2]> {
        let polygon = self.to_geo_polygon().ok()?;
        polygon.centroid().map(|p| [p.x(), p.y()])
    }
}
