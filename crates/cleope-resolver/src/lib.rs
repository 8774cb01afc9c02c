//! CLEOPE Resolver - Mount paths of dated products
//!
//! This crate maps sensing dates to the directories products are published
//! under, and finds the files inside them: daily atmosphere and marine
//! series, monthly land products with lookback, dry matter productivity
//! images, and per-product band files.

pub mod bands;
pub mod dates;
pub mod locator;
pub mod month;
pub mod monthly;
pub mod series;

pub use bands::{
    msi_band_pair, msi_band_pairs, olci_files, sar_images, sensing_time_from_name, slstr_files,
    MsiBandPair, OlciFiles, SlstrFiles,
};
pub use dates::{date_dir, date_fragment, dates_list, month_dir, sample_dates};
pub use locator::{pattern_in, recursive_pattern, GlobLocator, MemoryLocator, ProductLocator};
pub use month::one_month_back;
pub use monthly::{land_archive_start, DmpResolver, MonthlyResolver};
pub use series::SeriesResolver;
