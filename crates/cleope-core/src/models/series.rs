//! Series products resolved from the shared mount: atmosphere analyses,
//! marine sea-surface temperature and land monthly products.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CleopeError, Result};

/// Sampling unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyUnit {
    Day,
    Week,
    Month,
}

impl FrequencyUnit {
    fn days(&self) -> u32 {
        match self {
            FrequencyUnit::Day => 1,
            FrequencyUnit::Week => 7,
            FrequencyUnit::Month => 30,
        }
    }

    fn letter(&self) -> &'static str {
        match self {
            FrequencyUnit::Day => "D",
            FrequencyUnit::Week => "W",
            FrequencyUnit::Month => "M",
        }
    }
}

/// Sampling frequency such as `D`, `W`, `M` or `2 W`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub multiplier: u32,
    pub unit: FrequencyUnit,
}

impl Frequency {
    pub const DAILY: Frequency = Frequency { multiplier: 1, unit: FrequencyUnit::Day };

    /// Longest accepted step, one century of days
    pub const MAX_STEP_DAYS: u32 = 36_525;

    /// Step between sampled dates; a month counts as 30 days
    pub fn step_days(&self) -> u32 {
        self.multiplier.saturating_mul(self.unit.days())
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::DAILY
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiplier == 1 {
            f.write_str(self.unit.letter())
        } else {
            write!(f, "{} {}", self.multiplier, self.unit.letter())
        }
    }
}

impl FromStr for Frequency {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CleopeError::InvalidFrequency { value: s.to_string() };

        let unit_of = |token: &str| match token {
            "D" => Some(FrequencyUnit::Day),
            "W" => Some(FrequencyUnit::Week),
            "M" => Some(FrequencyUnit::Month),
            _ => None,
        };

        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [unit] => {
                let unit = unit_of(unit).ok_or_else(invalid)?;
                Ok(Frequency { multiplier: 1, unit })
            }
            [multiplier, unit] => {
                let multiplier: u32 = multiplier.parse().map_err(|_| invalid())?;
                let unit = unit_of(unit).ok_or_else(invalid)?;
                match multiplier.checked_mul(unit.days()) {
                    Some(step) if step > 0 && step <= Frequency::MAX_STEP_DAYS => {
                        Ok(Frequency { multiplier, unit })
                    }
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

/// Atmosphere analysis variables (surface fields)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtmosphereVariable {
    NitrogenDioxide,
    CarbonMonoxide,
    SulfurDioxide,
    Methane,
    Ethane,
    Propane,
    Isoprene,
    HydrogenPeroxide,
    Formaldehyde,
    NitricAcid,
    NitrogenMonoxide,
    Hydroxide,
    PeroxyacylNitrates,
}

const ATMOSPHERE_TABLE: &[(AtmosphereVariable, &str, &str)] = &[
    (AtmosphereVariable::NitrogenDioxide, "nitrogen_dioxide", "tcno2"),
    (AtmosphereVariable::CarbonMonoxide, "carbon_monoxide", "tcco"),
    (AtmosphereVariable::SulfurDioxide, "sulfur_dioxide", "tcso2"),
    (AtmosphereVariable::Methane, "methane", "tc_ch4"),
    (AtmosphereVariable::Ethane, "ethane", "tc_c2h6"),
    (AtmosphereVariable::Propane, "propane", "tc_c3h8"),
    (AtmosphereVariable::Isoprene, "isoprene", "tc_c5h8"),
    (AtmosphereVariable::HydrogenPeroxide, "hydrogen_peroxide", "tc_h2o2"),
    (AtmosphereVariable::Formaldehyde, "formaldehyde", "tchcho"),
    (AtmosphereVariable::NitricAcid, "nitric_acid", "tc_hno3"),
    (AtmosphereVariable::NitrogenMonoxide, "nitrogen_monoxide", "tc_no"),
    (AtmosphereVariable::Hydroxide, "hydroxide", "tc_oh"),
    (AtmosphereVariable::PeroxyacylNitrates, "peroxyacyl_nitrates", "tc_pan"),
];

impl AtmosphereVariable {
    fn entry(&self) -> (&'static str, &'static str) {
        ATMOSPHERE_TABLE
            .iter()
            .find(|(v, _, _)| v == self)
            .map(|(_, label, code)| (*label, *code))
            .unwrap_or(("", ""))
    }

    pub fn label(&self) -> &'static str {
        self.entry().0
    }

    /// Directory code under the surface-fields root
    pub fn code(&self) -> &'static str {
        self.entry().1
    }

    pub fn all() -> impl Iterator<Item = AtmosphereVariable> {
        ATMOSPHERE_TABLE.iter().map(|(v, _, _)| *v)
    }
}

impl FromStr for AtmosphereVariable {
    type Err = CleopeError;

    /// Accepts the label or the code
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        ATMOSPHERE_TABLE
            .iter()
            .find(|(_, label, code)| *label == trimmed || *code == trimmed)
            .map(|(v, _, _)| *v)
            .ok_or_else(|| CleopeError::UnknownVariable { name: s.to_string() })
    }
}

impl fmt::Display for AtmosphereVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Land monitoring variables published monthly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandVariable {
    Ndvi,
    Fapar,
    Fcover,
    Lai,
}

const LAND_TABLE: &[(LandVariable, &str, &str)] = &[
    (LandVariable::Ndvi, "Normalized_Difference_Vegetation_Index", "NDVI"),
    (
        LandVariable::Fapar,
        "Frac_Absorbed_Photosynthetically_Active_Radiation_1km",
        "FAPAR",
    ),
    (LandVariable::Fcover, "Fraction_green_Vegetation_Cover_1km", "FCOVER"),
    (LandVariable::Lai, "Leaf_Area_Index_1km", "LAI"),
];

impl LandVariable {
    fn entry(&self) -> (&'static str, &'static str) {
        LAND_TABLE
            .iter()
            .find(|(v, _, _)| v == self)
            .map(|(_, label, code)| (*label, *code))
            .unwrap_or(("", ""))
    }

    pub fn label(&self) -> &'static str {
        self.entry().0
    }

    pub fn code(&self) -> &'static str {
        self.entry().1
    }

    /// File name pattern inside a month directory
    pub fn file_pattern(&self) -> String {
        format!("c_gls_{}_*.nc", self.code())
    }

    pub fn all() -> impl Iterator<Item = LandVariable> {
        LAND_TABLE.iter().map(|(v, _, _)| *v)
    }
}

impl FromStr for LandVariable {
    type Err = CleopeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        LAND_TABLE
            .iter()
            .find(|(_, label, code)| *label == trimmed || *code == trimmed)
            .map(|(v, _, _)| *v)
            .ok_or_else(|| CleopeError::UnknownVariable { name: s.to_string() })
    }
}

impl fmt::Display for LandVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Daily analysis times of atmosphere products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationTimes {
    Midnight,
    Noon,
    Both,
}

impl ObservationTimes {
    /// From the recorded GMT flags; no flag set selects both times
    pub fn from_flags(gmt00: bool, gmt12: bool) -> Self {
        match (gmt00, gmt12) {
            (true, false) => ObservationTimes::Midnight,
            (false, true) => ObservationTimes::Noon,
            _ => ObservationTimes::Both,
        }
    }

    pub fn flags(&self) -> (bool, bool) {
        match self {
            ObservationTimes::Midnight => (true, false),
            ObservationTimes::Noon => (false, true),
            ObservationTimes::Both => (true, true),
        }
    }

    /// File patterns, midnight first
    pub fn patterns(&self) -> Vec<&'static str> {
        match self {
            ObservationTimes::Midnight => vec!["*000000_*.nc"],
            ObservationTimes::Noon => vec!["*120000_*.nc"],
            ObservationTimes::Both => vec!["*000000_*.nc", "*120000_*.nc"],
        }
    }
}

impl Default for ObservationTimes {
    fn default() -> Self {
        ObservationTimes::Both
    }
}

/// Product family of a series request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesProduct {
    Atmosphere(AtmosphereVariable),
    /// Global L4 sea-surface temperature analysis
    Marine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("D".parse::<Frequency>().unwrap().step_days(), 1);
        assert_eq!("W".parse::<Frequency>().unwrap().step_days(), 7);
        assert_eq!("M".parse::<Frequency>().unwrap().step_days(), 30);
        assert_eq!("2 W".parse::<Frequency>().unwrap().step_days(), 14);
        assert_eq!("3 M".parse::<Frequency>().unwrap().step_days(), 90);
        assert_eq!(" 5   D ".parse::<Frequency>().unwrap().step_days(), 5);
    }

    #[test]
    fn test_frequency_rejects_oversized_steps() {
        for huge in ["100000000 D", "200000000 M", "5218 W", "1218 M"] {
            assert!(
                matches!(huge.parse::<Frequency>(), Err(CleopeError::InvalidFrequency { .. })),
                "{} should be rejected",
                huge
            );
        }
        assert_eq!("36525 D".parse::<Frequency>().unwrap().step_days(), Frequency::MAX_STEP_DAYS);

        let built = Frequency { multiplier: u32::MAX, unit: FrequencyUnit::Month };
        assert_eq!(built.step_days(), u32::MAX);
    }

    #[test]
    fn test_frequency_rejects_invalid_input() {
        for bad in ["", "Q", "d", "0 D", "x D", "2 D X", "-1 W", "2"] {
            let err = bad.parse::<Frequency>().unwrap_err();
            assert!(matches!(err, CleopeError::InvalidFrequency { .. }), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_frequency_display() {
        assert_eq!(Frequency::DAILY.to_string(), "D");
        assert_eq!("2 W".parse::<Frequency>().unwrap().to_string(), "2 W");
    }

    #[test]
    fn test_atmosphere_label_and_code() {
        let by_label: AtmosphereVariable = "nitrogen_dioxide".parse().unwrap();
        let by_code: AtmosphereVariable = "tcno2".parse().unwrap();
        assert_eq!(by_label, by_code);
        assert_eq!(by_label.code(), "tcno2");
        assert_eq!(AtmosphereVariable::all().count(), 13);
        assert!("ozone".parse::<AtmosphereVariable>().is_err());
    }

    #[test]
    fn test_land_variables() {
        let lai: LandVariable = "Leaf_Area_Index_1km".parse().unwrap();
        assert_eq!(lai, LandVariable::Lai);
        assert_eq!(lai.file_pattern(), "c_gls_LAI_*.nc");
        assert_eq!("FAPAR".parse::<LandVariable>().unwrap(), LandVariable::Fapar);
        assert!(matches!(
            "NDWI".parse::<LandVariable>(),
            Err(CleopeError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn test_observation_times() {
        assert_eq!(ObservationTimes::from_flags(false, false), ObservationTimes::Both);
        assert_eq!(ObservationTimes::from_flags(true, false).patterns(), vec!["*000000_*.nc"]);
        assert_eq!(ObservationTimes::Both.patterns().len(), 2);
    }
}
