pub mod filter;
pub mod geometry;
pub mod mission;
pub mod product;
pub mod result;
pub mod series;

pub use filter::{SearchFilter, SearchFilterBuilder, SensingRange};
pub use geometry::{Footprint, FootprintKind};
pub use mission::{parse_mission_selection, parse_product_type_selection, Mission};
pub use product::{BandIndex, DmpRegion, MsiLevel, OlciFamily, OlciKey, Polarization, SlstrBand};
pub use result::{CatalogueResult, ResultRow, ResultTable};
pub use series::{
    AtmosphereVariable, Frequency, FrequencyUnit, LandVariable, ObservationTimes, SeriesProduct,
};
