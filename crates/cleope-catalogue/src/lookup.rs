//! Product lookup by name and location on the shared mount.

use cleope_core::error::{CleopeError, Result};
use cleope_core::models::CatalogueResult;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::endpoint::Endpoint;
use crate::ports::CatalogueClient;
use crate::response::parse_products;

/// Add the archive extension the catalogue indexes products under.
///
/// Landsat-8 scenes are `.tar.gz` archives, Sentinel products `.zip`.
pub fn normalize_product_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("LC08") && !name.ends_with(".tar.gz") {
        format!("{}.tar.gz", name)
    } else if name.starts_with('S') && !name.ends_with(".zip") {
        format!("{}.zip", name)
    } else {
        name.to_string()
    }
}

/// Path of a product inside the mount: `<mount>/<pseudopath>/<name>`
pub fn mount_path(mount_root: &Path, result: &CatalogueResult) -> PathBuf {
    mount_root.join(&result.pseudopath).join(&result.name)
}

/// Mount paths of several products, warning when some are archived
pub fn mount_paths(mount_root: &Path, results: &[CatalogueResult]) -> Vec<PathBuf> {
    let offline = results.iter().filter(|r| r.offline).count();
    if offline > 0 {
        warn!(
            offline,
            "Some products are archived and must be ordered before they appear on the mount"
        );
    }

    results.iter().map(|r| mount_path(mount_root, r)).collect()
}

/// Whether an ordered product has been restored onto the mount
pub fn is_restored(mount_root: &Path, result: &CatalogueResult) -> bool {
    mount_path(mount_root, result).exists()
}

/// Looks products up by file name
pub struct ProductLookup<'a> {
    client: &'a dyn CatalogueClient,
    endpoint: Endpoint,
}

impl<'a> ProductLookup<'a> {
    pub fn new(client: &'a dyn CatalogueClient, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    /// First catalogue match for a product name
    pub fn find(&self, name: &str) -> Result<CatalogueResult> {
        let normalized = normalize_product_name(name);
        let url = self.endpoint.lookup_url(&normalized);
        debug!(url = %url, "Looking up product");

        parse_products(&self.client.get_json(&url)?)?
            .into_iter()
            .next()
            .ok_or(CleopeError::ProductNotFound { name: normalized })
    }

    /// Look up every non-empty line of a product list
    pub fn find_all<I, S>(&self, names: I) -> Result<Vec<CatalogueResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter(|n| !n.as_ref().trim().is_empty())
            .map(|n| self.find(n.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    struct SingleProduct;

    impl CatalogueClient for SingleProduct {
        fn get_json(&self, url: &str) -> Result<serde_json::Value> {
            if url.contains("MISSING") {
                return Ok(serde_json::json!({ "value": [] }));
            }
            Ok(serde_json::json!({
                "value": [{
                    "id": "uuid-1",
                    "name": "S1A_IW_GRDH_1SDV_20200101T052345.zip",
                    "pseudopath": "S1/1A/LEVEL-1/GRD/2020/01/01",
                    "beginPosition": "2020-01-01T05:23:45.000Z",
                    "footprint": "POLYGON((10 40,12 40,12 42,10 40))",
                    "size": 42,
                    "offline": true
                }]
            }))
        }

        fn get_text(&self, _url: &str) -> Result<String> {
            Ok(String::new())
        }
    }

    fn result(name: &str, offline: bool) -> CatalogueResult {
        CatalogueResult {
            id: "id".to_string(),
            name: name.to_string(),
            pseudopath: "S2/2A/LEVEL-2A/2020/01/01".to_string(),
            begin_position: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            footprint: String::new(),
            size: 0,
            offline,
        }
    }

    #[test]
    fn test_normalize_product_name() {
        assert_eq!(normalize_product_name("S2A_MSIL2A_X"), "S2A_MSIL2A_X.zip");
        assert_eq!(normalize_product_name("S2A_MSIL2A_X.zip"), "S2A_MSIL2A_X.zip");
        assert_eq!(normalize_product_name("LC08_L1TP_X"), "LC08_L1TP_X.tar.gz");
        assert_eq!(normalize_product_name("LC08_L1TP_X.tar.gz"), "LC08_L1TP_X.tar.gz");
        assert_eq!(normalize_product_name("ASA_IM__0P_X"), "ASA_IM__0P_X");
    }

    #[test]
    fn test_find_and_not_found() {
        let client = SingleProduct;
        let lookup = ProductLookup::new(&client, Endpoint::new("http://catalogue"));

        let found = lookup.find("S1A_IW_GRDH_1SDV_20200101T052345").unwrap();
        assert_eq!(found.id, "uuid-1");

        let err = lookup.find("S2_MISSING").unwrap_err();
        assert!(matches!(err, CleopeError::ProductNotFound { name } if name == "S2_MISSING.zip"));
    }

    #[test]
    fn test_find_all_skips_blank_lines() {
        let client = SingleProduct;
        let lookup = ProductLookup::new(&client, Endpoint::new("http://catalogue"));
        let found = lookup.find_all(["S1A_ONE", "", "  ", "S1A_TWO"]).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_mount_paths_and_restoration() {
        let mount = TempDir::new().unwrap();
        let online = result("S2A_ONLINE.zip", false);
        let archived = result("S2A_ARCHIVED.zip", true);

        let paths = mount_paths(mount.path(), &[online.clone(), archived.clone()]);
        assert_eq!(
            paths[0],
            mount.path().join("S2/2A/LEVEL-2A/2020/01/01").join("S2A_ONLINE.zip")
        );

        assert!(!is_restored(mount.path(), &archived));
        std::fs::create_dir_all(&paths[1]).unwrap();
        assert!(is_restored(mount.path(), &archived));
    }
}
