//! Catalogue search expressions.
//!
//! The catalogue parser is sensitive to the exact clause nesting, so the
//! redundant parentheses below are part of the wire format. Expressions are
//! built with plain spaces and quotes, then encoded with `%20` and `%22`.

use cleope_core::error::Result;
use cleope_core::models::{Mission, SearchFilter};

/// Encode the only two characters the catalogue needs escaped
pub fn encode_expression(plain: &str) -> String {
    plain.replace(' ', "%20").replace('"', "%22")
}

/// Build the unencoded search expression for a filter
pub fn build_plain_expression(filter: &SearchFilter) -> Result<String> {
    let footprint = footprint_clause(filter)?;

    let Some(mission) = filter.mission() else {
        return Ok(match filter.sensing() {
            Some(range) => format!("{} AND {}", sensing_clause(&range.interval()), footprint),
            None => footprint,
        });
    };

    let mission_terms = mission_terms(mission, filter.product_type());

    Ok(match (filter.sensing(), filter.product_type()) {
        (None, None) => format!("( {} ) AND {}", mission_terms, footprint),
        (None, Some(_)) => format!("( ( {} ) ) AND {}", mission_terms, footprint),
        (Some(range), _) => format!(
            "( ( ( {} ) ) AND ( {} ) ) AND {}",
            mission_terms,
            sensing_clause(&range.interval()),
            footprint
        ),
    })
}

/// Build the percent-encoded search expression for a filter
pub fn build_filter_expression(filter: &SearchFilter) -> Result<String> {
    build_plain_expression(filter).map(|plain| encode_expression(&plain))
}

fn footprint_clause(filter: &SearchFilter) -> Result<String> {
    let vertices: Vec<String> = filter
        .footprint()
        .closed_ring()?
        .iter()
        .map(|[lon, lat]| format!("{} {}", coordinate(*lon), coordinate(*lat)))
        .collect();

    Ok(format!("footprint:\"Intersects(POLYGON(({})))\"", vertices.join(",")))
}

/// Plain decimal text of a coordinate; whole degrees keep a `.0`
fn coordinate(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn sensing_clause(interval: &str) -> String {
    format!("( beginPosition:{} AND endPosition:{} )", interval, interval)
}

fn mission_terms(mission: Mission, product_type: Option<&str>) -> String {
    let key = if mission.is_satellite() { "platformName" } else { "productMainClass" };

    match product_type {
        None => format!("{}:{}", key, mission.catalogue_name()),
        Some(product_type) if mission.wildcard_product_types() => {
            format!("platformName:{} AND productType:*{}*", mission.catalogue_name(), product_type)
        }
        Some(product_type) => {
            format!("platformName:{} AND productType:{}", mission.catalogue_name(), product_type)
        }
    }
}
