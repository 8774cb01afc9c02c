use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CleopeError, Result};

/// Missions and product main classes known to the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mission {
    Sentinel1,
    Sentinel2,
    Sentinel3,
    Sentinel5P,
    Envisat,
    Landsat,
    CopernicusLand,
    CopernicusMarine,
    CopernicusAtmosphere,
}

const SENTINEL1_TYPES: &[&str] = &["SLC", "GRD", "OCN", "RAW"];

const SENTINEL2_TYPES: &[&str] = &["S2MSI1C", "S2MSI2A", "S2MSI2Ap"];

const SENTINEL3_TYPES: &[&str] = &[
    "SR_1_SRA___",
    "SR_1_SRA_A_",
    "SR_1_SRA_BS",
    "SR_2_LAN___",
    "OL_1_EFR___",
    "OL_1_ERR___",
    "SL_1_RBT___",
    "OL_2_LFR___",
    "OL_2_LRR___",
    "SL_2_LST___",
    "OL_2_WFR___",
    "OL_2_WRR___",
    "SL_2_WST___",
    "SR_2_WAT___",
    "SY_2_SYN___",
    "SY_2_V10___",
    "SY_2_VG1___",
    "SY_2_VGP___",
];

const SENTINEL5P_TYPES: &[&str] = &[
    "L1B_IR_SIR",
    "L1B_IR_UVN",
    "L1B_RA_BD1",
    "L1B_RA_BD2",
    "L1B_RA_BD3",
    "L1B_RA_BD4",
    "L1B_RA_BD5",
    "L1B_RA_BD6",
    "L1B_RA_BD7",
    "L1B_RA_BD8",
    "L2__AER_AI",
    "L2__CH4___",
    "L2__CLOUD_",
    "L2__SO2___",
    "L2__CO____",
    "L2__HCHO__",
    "L2__NO2___",
    "L2__O3____",
    "L2__O3_TCL",
];

const ENVISAT_TYPES: &[&str] = &["ASA_IM__0P", "ASA_WS__0P"];

const LANDSAT_TYPES: &[&str] = &["L1TP"];

/// Product-name prefixes, longest first so `S5P` wins over `S5`
const NAME_PREFIXES: &[(&str, Mission)] = &[
    ("S5P", Mission::Sentinel5P),
    ("LC08", Mission::Landsat),
    ("ASA", Mission::Envisat),
    ("S1", Mission::Sentinel1),
    ("S2", Mission::Sentinel2),
    ("S3", Mission::Sentinel3),
];

impl Mission {
    pub const ALL: [Mission; 9] = [
        Mission::Sentinel1,
        Mission::Sentinel2,
        Mission::Sentinel3,
        Mission::Sentinel5P,
        Mission::Envisat,
        Mission::Landsat,
        Mission::CopernicusLand,
        Mission::CopernicusMarine,
        Mission::CopernicusAtmosphere,
    ];

    /// Name used in catalogue expressions
    pub fn catalogue_name(&self) -> &'static str {
        match self {
            Mission::Sentinel1 => "Sentinel-1",
            Mission::Sentinel2 => "Sentinel-2",
            Mission::Sentinel3 => "Sentinel-3",
            Mission::Sentinel5P => "Sentinel-5 Precursor",
            Mission::Envisat => "Envisat",
            Mission::Landsat => "Landsat-*",
            Mission::CopernicusLand => "Copernicus-Land",
            Mission::CopernicusMarine => "Copernicus-Marine",
            Mission::CopernicusAtmosphere => "Copernicus-Atmosphere",
        }
    }

    /// Satellite missions are filtered by `platformName`, the rest by
    /// `productMainClass`
    pub fn is_satellite(&self) -> bool {
        !matches!(
            self,
            Mission::CopernicusLand | Mission::CopernicusMarine | Mission::CopernicusAtmosphere
        )
    }

    /// Whether product types are short codes matched with `*T*`
    pub fn wildcard_product_types(&self) -> bool {
        matches!(self, Mission::Sentinel1)
    }

    /// Product types the catalogue accepts for this mission
    pub fn product_types(&self) -> &'static [&'static str] {
        match self {
            Mission::Sentinel1 => SENTINEL1_TYPES,
            Mission::Sentinel2 => SENTINEL2_TYPES,
            Mission::Sentinel3 => SENTINEL3_TYPES,
            Mission::Sentinel5P => SENTINEL5P_TYPES,
            Mission::Envisat => ENVISAT_TYPES,
            Mission::Landsat => LANDSAT_TYPES,
            Mission::CopernicusLand | Mission::CopernicusMarine | Mission::CopernicusAtmosphere => {
                &[]
            }
        }
    }

    /// Validate a concrete product type against this mission's table
    pub fn validate_product_type(&self, product_type: &str) -> Result<()> {
        if self.product_types().contains(&product_type) {
            Ok(())
        } else {
            Err(CleopeError::UnknownProductType {
                mission: self.catalogue_name().to_string(),
                product_type: product_type.to_string(),
            })
        }
    }

    /// Resolve the mission from a product file name prefix
    pub fn from_product_name(name: &str) -> Option<Mission> {
        NAME_PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, mission)| *mission)
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalogue_name())
    }
}

impl FromStr for Mission {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Mission::ALL
            .iter()
            .find(|m| m.catalogue_name().eq_ignore_ascii_case(trimmed))
            .copied()
            .or(match trimmed.to_ascii_uppercase().as_str() {
                "S1" => Some(Mission::Sentinel1),
                "S2" => Some(Mission::Sentinel2),
                "S3" => Some(Mission::Sentinel3),
                "S5P" => Some(Mission::Sentinel5P),
                "LANDSAT" => Some(Mission::Landsat),
                _ => None,
            })
            .ok_or_else(|| CleopeError::UnknownMission { name: s.to_string() })
    }
}

/// Parse a recorded mission selection; "All" means no mission filter
pub fn parse_mission_selection(value: &str) -> Result<Option<Mission>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Parse a recorded product-type selection.
///
/// Labels starting with `All` (such as "All S1"), "-" and the empty string
/// mean no product-type filter. A concrete type must belong to the mission.
pub fn parse_product_type_selection(
    mission: Option<Mission>,
    value: &str,
) -> Result<Option<String>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.starts_with("All") {
        return Ok(None);
    }

    match mission {
        Some(mission) => {
            mission.validate_product_type(trimmed)?;
            Ok(Some(trimmed.to_string()))
        }
        None => Err(CleopeError::UnknownProductType {
            mission: "All".to_string(),
            product_type: trimmed.to_string(),
        }),
    }
}
