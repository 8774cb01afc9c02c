//! Decoding of catalogue response bodies

use chrono::{DateTime, Utc};
use cleope_core::error::{CleopeError, Result};
use cleope_core::models::CatalogueResult;
use serde::Deserialize;

/// Product entry as returned in the `value` array
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: String,
    name: String,
    #[serde(default)]
    pseudopath: Option<String>,
    begin_position: DateTime<Utc>,
    footprint: String,
    size: u64,
    offline: bool,
}

impl From<ProductRecord> for CatalogueResult {
    fn from(record: ProductRecord) -> Self {
        // The catalogue lists alternative locations separated by commas
        let pseudopath = record
            .pseudopath
            .as_deref()
            .and_then(|p| p.split(',').next())
            .unwrap_or_default()
            .to_string();

        CatalogueResult {
            id: record.id,
            name: record.name,
            pseudopath,
            begin_position: record.begin_position,
            footprint: record.footprint,
            size: record.size,
            offline: record.offline,
        }
    }
}

/// Decode the `value` array of a search response
pub(crate) fn parse_products(body: &serde_json::Value) -> Result<Vec<CatalogueResult>> {
    let values = body
        .get("value")
        .and_then(|v| v.as_array())
        .ok_or_else(|| CleopeError::MalformedResponse {
            reason: "missing `value` array".to_string(),
        })?;

    values
        .iter()
        .map(|v| {
            serde_json::from_value::<ProductRecord>(v.clone())
                .map(CatalogueResult::from)
                .map_err(|e| CleopeError::MalformedResponse {
                    reason: format!("invalid product entry: {}", e),
                })
        })
        .collect()
}

/// Decode a `$count` body, a bare integer
pub(crate) fn parse_count(body: &str) -> Result<u64> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(CleopeError::MalformedResponse {
            reason: "empty count response".to_string(),
        });
    }
    trimmed.parse().map_err(|_| CleopeError::MalformedResponse {
        reason: format!("count response is not an integer: {}", trimmed),
    })
}
