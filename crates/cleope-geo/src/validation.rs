use cleope_core::error::{CleopeError, Result};
use cleope_core::models::Footprint;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }
}

/// Validate an area of interest
///
/// Coordinates must be finite WGS84 longitudes and latitudes, and the ring
/// must have at least three distinct vertices once closed.
pub fn validate_footprint(footprint: &Footprint) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for (i, [lon, lat]) in footprint.vertices().iter().enumerate() {
        if !lon.is_finite() || !lat.is_finite() {
            result.add_error(format!("vertex[{}]", i), "Coordinates must be finite".to_string());
            continue;
        }
        if !(-180.0..=180.0).contains(lon) {
            result.add_error(
                format!("vertex[{}]", i),
                format!("Longitude {} is outside [-180, 180]", lon),
            );
        }
        if !(-90.0..=90.0).contains(lat) {
            result.add_error(
                format!("vertex[{}]", i),
                format!("Latitude {} is outside [-90, 90]", lat),
            );
        }
    }

    match footprint.closed_ring() {
        Ok(ring) => {
            let open = &ring[..ring.len() - 1];
            let mut distinct: Vec<[f64; 2]> = Vec::with_capacity(open.len());
            for vertex in open {
                if !distinct.contains(vertex) {
                    distinct.push(*vertex);
                }
            }
            if distinct.len() < 3 {
                result.add_error(
                    "ring".to_string(),
                    format!("Footprint needs 3 distinct vertices, found {}", distinct.len()),
                );
            }
        }
        Err(e) => result.add_error("ring".to_string(), e.to_string()),
    }

    result
}

/// Fail with `InvalidFootprint` on the first problem found
pub fn ensure_valid(footprint: &Footprint) -> Result<()> {
    let validation = validate_footprint(footprint);
    if validation.is_valid {
        return Ok(());
    }

    Err(CleopeError::InvalidFootprint {
        reason: validation
            .errors
            .first()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .unwrap_or_else(|| "Invalid footprint".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_square() {
        let footprint = Footprint::line_string(vec![[10.0, 40.0], [12.0, 40.0], [12.0, 42.0], [10.0, 42.0]]);
        assert!(validate_footprint(&footprint).is_valid);
        assert!(ensure_valid(&footprint).is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        let footprint = Footprint::line_string(vec![[10.0, 40.0], [12.0, 95.0], [12.0, 42.0]]);
        let result = validate_footprint(&footprint);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].location, "vertex[1]");
    }

    #[test]
    fn test_non_finite_coordinates() {
        let footprint = Footprint::line_string(vec![[f64::NAN, 40.0], [12.0, 40.0], [12.0, 42.0]]);
        assert!(!validate_footprint(&footprint).is_valid);
    }

    #[test]
    fn test_repeated_vertices_do_not_count() {
        let footprint = Footprint::polygon(vec![[0.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 0.0]]);
        let err = ensure_valid(&footprint).unwrap_err();
        assert!(matches!(err, CleopeError::InvalidFootprint { .. }));
    }

    #[test]
    fn test_empty_footprint() {
        let footprint = Footprint::polygon(vec![]);
        assert!(ensure_valid(&footprint).is_err());
    }
}
