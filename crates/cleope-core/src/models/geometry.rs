//! Area-of-interest footprint as recorded from the map selection.
//!
//! The enum maps directly onto the GeoJSON geometry objects written by the
//! selection step, so `polygon.json` deserializes without an adapter.

use serde::{Deserialize, Serialize};

use crate::error::{CleopeError, Result};

/// Footprint kind, used when the caller only needs the tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FootprintKind {
    Polygon,
    LineString,
}

/// GeoJSON-compatible footprint (lon, lat order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Footprint {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    LineString { coordinates: Vec<[f64; 2]> },
}

impl Footprint {
    /// Create a Polygon footprint from its exterior ring
    pub fn polygon(ring: Vec<[f64; 2]>) -> Self {
        Footprint::Polygon { coordinates: vec![ring] }
    }

    /// Create a LineString footprint
    pub fn line_string(coords: Vec<[f64; 2]>) -> Self {
        Footprint::LineString { coordinates: coords }
    }

    pub fn kind(&self) -> FootprintKind {
        match self {
            Footprint::Polygon { .. } => FootprintKind::Polygon,
            Footprint::LineString { .. } => FootprintKind::LineString,
        }
    }

    /// Vertices as drawn: the exterior ring of a polygon, or the line itself
    pub fn vertices(&self) -> &[[f64; 2]] {
        match self {
            Footprint::Polygon { coordinates } => {
                coordinates.first().map(|ring| ring.as_slice()).unwrap_or(&[])
            }
            Footprint::LineString { coordinates } => coordinates,
        }
    }

    /// Closed exterior ring ready for serialization.
    ///
    /// The first vertex is repeated at the end unless the ring already ends
    /// on it. At least three distinct vertices are required.
    pub fn closed_ring(&self) -> Result<Vec<[f64; 2]>> {
        let vertices = self.vertices();

        let (first, last) = match (vertices.first(), vertices.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(CleopeError::InvalidFootprint {
                    reason: "footprint has no vertices".to_string(),
                })
            }
        };

        let mut ring = vertices.to_vec();
        if first != last {
            ring.push(first);
        }

        let distinct = ring.len() - 1;
        if distinct < 3 {
            return Err(CleopeError::InvalidFootprint {
                reason: format!("a closed footprint needs at least 3 vertices, found {}", distinct),
            });
        }

        Ok(ring)
    }

    /// Parse from a serde_json::Value (GeoJSON geometry)
    pub fn from_geojson(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| CleopeError::InvalidFootprint {
            reason: format!("expected a Polygon or LineString geometry: {}", e),
        })
    }

    /// Convert to serde_json::Value (GeoJSON geometry)
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
