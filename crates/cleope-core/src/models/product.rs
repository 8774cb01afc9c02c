use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CleopeError, Result};

/// OLCI level-2 product family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OlciFamily {
    /// Water full resolution
    WaterFull,
    /// Land full resolution
    LandFull,
}

impl OlciFamily {
    /// Family of a product name, if it is an OLCI L2 full-resolution product
    pub fn from_product_name(name: &str) -> Option<OlciFamily> {
        if name.contains("_OL_2_WFR") {
            Some(OlciFamily::WaterFull)
        } else if name.contains("_OL_2_LFR") {
            Some(OlciFamily::LandFull)
        } else {
            None
        }
    }
}

/// OLCI L2 measurement stored in its own NetCDF file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OlciKey {
    TsmNn,
    ChlOc4me,
    ChlNn,
    Iwv,
    Otci,
    Ogvi,
}

const OLCI_KEYS: &[(OlciKey, &str, &str)] = &[
    (OlciKey::TsmNn, "TSM_NN", "tsm_nn.nc"),
    (OlciKey::ChlOc4me, "CHL_OC4ME", "chl_oc4me.nc"),
    (OlciKey::ChlNn, "CHL_NN", "chl_nn.nc"),
    (OlciKey::Iwv, "IWV", "iwv.nc"),
    (OlciKey::Otci, "OTCI", "otci.nc"),
    (OlciKey::Ogvi, "OGVI", "ogvi.nc"),
];

impl OlciKey {
    fn entry(&self) -> (&'static str, &'static str) {
        OLCI_KEYS
            .iter()
            .find(|(k, _, _)| k == self)
            .map(|(_, name, file)| (*name, *file))
            .unwrap_or(("", ""))
    }

    pub fn name(&self) -> &'static str {
        self.entry().0
    }

    pub fn file_name(&self) -> &'static str {
        self.entry().1
    }
}

impl FromStr for OlciKey {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        OLCI_KEYS
            .iter()
            .find(|(_, name, _)| *name == upper)
            .map(|(k, _, _)| *k)
            .ok_or_else(|| CleopeError::UnknownVariable { name: s.to_string() })
    }
}

impl fmt::Display for OlciKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// MSI processing level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsiLevel {
    L1C,
    L2A,
}

impl MsiLevel {
    pub fn from_product_name(name: &str) -> Option<MsiLevel> {
        if name.contains("MSIL2A") {
            Some(MsiLevel::L2A)
        } else if name.contains("MSIL1C") {
            Some(MsiLevel::L1C)
        } else {
            None
        }
    }

    /// Glob pattern for a band image, 20 m resolution on L2A
    pub fn band_pattern(&self, band: &str) -> String {
        match self {
            MsiLevel::L2A => format!("*{}_20m.jp2", band),
            MsiLevel::L1C => format!("*{}.jp2", band),
        }
    }
}

/// Normalized difference indices computed from a pair of MSI bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandIndex {
    /// Normalized burn ratio
    Nbr,
    /// Normalized difference snow index
    Ndsi,
}

impl BandIndex {
    /// Bands as (first, second) of the ratio
    pub fn bands(&self) -> (&'static str, &'static str) {
        match self {
            BandIndex::Nbr => ("B8A", "B12"),
            BandIndex::Ndsi => ("B03", "B11"),
        }
    }

    pub fn supports(&self, level: MsiLevel) -> bool {
        !matches!((self, level), (BandIndex::Ndsi, MsiLevel::L1C))
    }
}

impl FromStr for BandIndex {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nbr" => Ok(BandIndex::Nbr),
            "ndsi" => Ok(BandIndex::Ndsi),
            _ => Err(CleopeError::UnknownVariable { name: s.to_string() }),
        }
    }
}

impl fmt::Display for BandIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandIndex::Nbr => f.write_str("NBR"),
            BandIndex::Ndsi => f.write_str("NDSI"),
        }
    }
}

/// SLSTR nadir-view brightness temperature channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlstrBand {
    S7,
    S8,
    S9,
}

impl SlstrBand {
    /// Geolocation file shared by every nadir-view channel
    pub const GEODETIC_FILE: &'static str = "geodetic_in.nc";

    pub fn file_name(&self) -> &'static str {
        match self {
            SlstrBand::S7 => "S7_BT_in.nc",
            SlstrBand::S8 => "S8_BT_in.nc",
            SlstrBand::S9 => "S9_BT_in.nc",
        }
    }
}

impl Default for SlstrBand {
    fn default() -> Self {
        SlstrBand::S9
    }
}

impl FromStr for SlstrBand {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.trim_end_matches("_BT_IN") {
            "S7" => Ok(SlstrBand::S7),
            "S8" => Ok(SlstrBand::S8),
            "S9" => Ok(SlstrBand::S9),
            _ => Err(CleopeError::UnknownVariable { name: s.to_string() }),
        }
    }
}

impl fmt::Display for SlstrBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name().trim_end_matches(".nc"))
    }
}

/// Sentinel-1 polarisation channel of a GRD measurement image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarization {
    Vv,
    Vh,
    Hh,
    Hv,
}

impl Polarization {
    pub fn code(&self) -> &'static str {
        match self {
            Polarization::Vv => "vv",
            Polarization::Vh => "vh",
            Polarization::Hh => "hh",
            Polarization::Hv => "hv",
        }
    }

    /// Glob pattern for the measurement images of this channel
    pub fn tiff_pattern(&self) -> String {
        format!("*{}*.tiff", self.code())
    }
}

impl Default for Polarization {
    fn default() -> Self {
        Polarization::Vh
    }
}

impl FromStr for Polarization {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vv" => Ok(Polarization::Vv),
            "vh" => Ok(Polarization::Vh),
            "hh" => Ok(Polarization::Hh),
            "hv" => Ok(Polarization::Hv),
            _ => Err(CleopeError::UnknownVariable { name: s.to_string() }),
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_ascii_uppercase())
    }
}

/// Continental tile of the global dry matter productivity archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DmpRegion {
    Euro,
    Asia,
    Afri,
}

impl DmpRegion {
    pub fn code(&self) -> &'static str {
        match self {
            DmpRegion::Euro => "EURO",
            DmpRegion::Asia => "ASIA",
            DmpRegion::Afri => "AFRI",
        }
    }

    /// Archive name pattern of this region's products
    pub fn archive_pattern(&self) -> String {
        format!("g2_BIOPAR_DMP*{}*.zip", self.code())
    }
}

impl Default for DmpRegion {
    fn default() -> Self {
        DmpRegion::Euro
    }
}

impl FromStr for DmpRegion {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EURO" => Ok(DmpRegion::Euro),
            "ASIA" => Ok(DmpRegion::Asia),
            "AFRI" => Ok(DmpRegion::Afri),
            _ => Err(CleopeError::UnknownVariable { name: s.to_string() }),
        }
    }
}

impl fmt::Display for DmpRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_olci_family() {
        assert_eq!(
            OlciFamily::from_product_name("S3A_OL_2_WFR____20200101T100000"),
            Some(OlciFamily::WaterFull)
        );
        assert_eq!(
            OlciFamily::from_product_name("S3B_OL_2_LFR____20200101T100000"),
            Some(OlciFamily::LandFull)
        );
        assert_eq!(OlciFamily::from_product_name("S3A_SL_2_LST____20200101"), None);
    }

    #[test]
    fn test_olci_keys() {
        let key: OlciKey = "chl_nn".parse().unwrap();
        assert_eq!(key, OlciKey::ChlNn);
        assert_eq!(key.file_name(), "chl_nn.nc");
        assert_eq!(OlciKey::TsmNn.file_name(), "tsm_nn.nc");
        assert!("NDVI".parse::<OlciKey>().is_err());
    }

    #[test]
    fn test_msi_level_patterns() {
        let level = MsiLevel::from_product_name("S2A_MSIL2A_20200101T101021_N0213").unwrap();
        assert_eq!(level.band_pattern("B8A"), "*B8A_20m.jp2");
        assert_eq!(MsiLevel::L1C.band_pattern("B12"), "*B12.jp2");
        assert_eq!(MsiLevel::from_product_name("S1A_IW_GRDH"), None);
    }

    #[test]
    fn test_band_index_support() {
        assert!(BandIndex::Nbr.supports(MsiLevel::L1C));
        assert!(!BandIndex::Ndsi.supports(MsiLevel::L1C));
        assert_eq!(BandIndex::Ndsi.bands(), ("B03", "B11"));
        assert_eq!("NBR".parse::<BandIndex>().unwrap(), BandIndex::Nbr);
    }

    #[test]
    fn test_slstr_bands() {
        assert_eq!(SlstrBand::default().file_name(), "S9_BT_in.nc");
        assert_eq!("s7".parse::<SlstrBand>().unwrap(), SlstrBand::S7);
        assert_eq!("S8_BT_in".parse::<SlstrBand>().unwrap(), SlstrBand::S8);
        assert_eq!(SlstrBand::S9.to_string(), "S9_BT_in");
        assert!("S1".parse::<SlstrBand>().is_err());
    }

    #[test]
    fn test_polarization_patterns() {
        assert_eq!(Polarization::default().tiff_pattern(), "*vh*.tiff");
        assert_eq!("VV".parse::<Polarization>().unwrap(), Polarization::Vv);
        assert!("xx".parse::<Polarization>().is_err());
    }

    #[test]
    fn test_dmp_regions() {
        assert_eq!(DmpRegion::default().archive_pattern(), "g2_BIOPAR_DMP*EURO*.zip");
        assert_eq!("afri".parse::<DmpRegion>().unwrap(), DmpRegion::Afri);
        assert!("AMER".parse::<DmpRegion>().is_err());
    }
}
