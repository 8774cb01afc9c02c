//! Product coverage parsed from the catalogue's WKT footprints.

use cleope_core::error::{CleopeError, Result};
use geo::{Geometry, MultiPolygon};
use wkt::TryFromWkt;

/// Parse a result footprint (POLYGON or MULTIPOLYGON) into a multipolygon
pub fn parse_coverage(footprint: &str) -> Result<MultiPolygon<f64>> {
    let geometry = Geometry::<f64>::try_from_wkt_str(footprint.trim()).map_err(|e| {
        CleopeError::InvalidFootprint {
            reason: format!("Failed to parse WKT footprint: {}", e),
        }
    })?;

    match geometry {
        Geometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        Geometry::MultiPolygon(multi) => Ok(multi),
        _ => Err(CleopeError::InvalidFootprint {
            reason: "Result footprint is not a polygon or multipolygon".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_is_wrapped() {
        let coverage = parse_coverage("POLYGON((10 40,12 40,12 42,10 42,10 40))").unwrap();
        assert_eq!(coverage.0.len(), 1);
        assert_eq!(coverage.0[0].exterior().0.len(), 5);
    }

    #[test]
    fn test_true_multipolygon() {
        let coverage = parse_coverage(
            "MULTIPOLYGON(((179 10,180 10,180 11,179 10)),((-180 10,-179 10,-179 11,-180 10)))",
        )
        .unwrap();
        assert_eq!(coverage.0.len(), 2);
    }

    #[test]
    fn test_point_rejected() {
        assert!(parse_coverage("POINT(10 40)").is_err());
        assert!(parse_coverage("not wkt").is_err());
    }
}
