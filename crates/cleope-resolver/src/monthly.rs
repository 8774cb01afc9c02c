//! Land products, published at irregular dates within a month.
//!
//! The requested month is searched first; when it holds no product the
//! resolver steps back one month at a time until a product turns up, the
//! lookback budget is spent, or the archive start is reached.

use chrono::{Local, NaiveDate};
use cleope_core::config::Settings;
use cleope_core::error::{CleopeError, Result};
use cleope_core::models::{DmpRegion, LandVariable};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::dates::month_dir;
use crate::locator::{pattern_in, recursive_pattern, ProductLocator};
use crate::month::one_month_back;

/// First day covered by the land archive
pub fn land_archive_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 6, 1).unwrap_or_default()
}

/// Finds the latest land product at or before a date
pub struct MonthlyResolver<'a> {
    locator: &'a dyn ProductLocator,
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a> MonthlyResolver<'a> {
    pub fn new(locator: &'a dyn ProductLocator, settings: &'a Settings) -> Self {
        Self::with_today(locator, settings, Local::now().date_naive())
    }

    pub fn with_today(
        locator: &'a dyn ProductLocator,
        settings: &'a Settings,
        today: NaiveDate,
    ) -> Self {
        Self { locator, settings, today }
    }

    /// The requested date, or today when it falls outside the archive
    pub fn effective_date(&self, date: NaiveDate) -> NaiveDate {
        if date > self.today || date < land_archive_start() {
            warn!(
                requested = %date,
                today = %self.today,
                "Date outside the land archive, using the current month"
            );
            self.today
        } else {
            date
        }
    }

    /// Glob pattern for a variable's files in the month of `date`
    pub fn month_pattern(&self, variable: LandVariable, date: NaiveDate) -> String {
        let root = self.settings.land_root().join(variable.code());
        recursive_pattern(&month_dir(&root, date), &variable.file_pattern())
    }

    /// Latest product of the month of `date`, stepping back while empty
    pub fn resolve(&self, variable: LandVariable, date: NaiveDate) -> Result<PathBuf> {
        let requested = self.effective_date(date);
        let floor = land_archive_start();

        let mut current = requested;
        let mut earliest = requested;
        for step in 0..=self.settings.max_lookback_months {
            if current < floor {
                break;
            }
            earliest = current;

            let pattern = self.month_pattern(variable, current);
            debug!(pattern = %pattern, "Searching month");
            if let Some(latest) = self.locator.find(&pattern)?.pop() {
                if step > 0 {
                    info!(
                        month = %current.format("%Y-%m"),
                        months_back = step,
                        "{} product found in an earlier month",
                        variable.code()
                    );
                }
                return Ok(latest);
            }

            warn!(
                month = %current.format("%Y-%m"),
                "No {} product this month, going one month back",
                variable.code()
            );
            current = one_month_back(current);
        }

        Err(CleopeError::NoDataFound {
            variable: variable.code().to_string(),
            earliest,
            latest: requested,
        })
    }
}

/// Dry matter productivity images inside unpacked dekadal archives
pub struct DmpResolver<'a> {
    locator: &'a dyn ProductLocator,
    settings: &'a Settings,
}

impl<'a> DmpResolver<'a> {
    pub fn new(locator: &'a dyn ProductLocator, settings: &'a Settings) -> Self {
        Self { locator, settings }
    }

    /// `<land>/DMP/<year>/*/01/<archive>/*/*.tiff`
    pub fn year_pattern(&self, year: i32, region: DmpRegion) -> String {
        let dir = self
            .settings
            .land_root()
            .join("DMP")
            .join(year.to_string())
            .join("*")
            .join("01")
            .join(region.archive_pattern())
            .join("*");
        pattern_in(&dir, "*.tiff")
    }

    /// Images of every first-of-month product of a year
    pub fn year_products(&self, year: i32, region: DmpRegion) -> Result<Vec<PathBuf>> {
        let found = self.locator.find(&self.year_pattern(year, region))?;
        if found.is_empty() {
            warn!(year, region = %region, "No DMP products found");
        } else {
            info!(year, region = %region, "{} DMP images found", found.len());
        }
        Ok(found)
    }

    /// First image inside each listed product, sorted.
    ///
    /// Products without an image are skipped.
    pub fn listed_products(&self, products: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut images = Vec::new();
        for product in products {
            match self.locator.find(&recursive_pattern(product, "*.tiff"))?.into_iter().next() {
                Some(image) => images.push(image),
                None => warn!(product = %product.display(), "No DMP image in product, skipped"),
            }
        }
        images.sort();
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::MemoryLocator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings() -> Settings {
        Settings { mount_root: PathBuf::from("/mnt/Copernicus"), ..Settings::default() }
    }

    fn ndvi(year: i32, month: u32, day: u32) -> PathBuf {
        PathBuf::from(format!(
            "/mnt/Copernicus/Copernicus-land/NDVI/{y}/{m:02}/{d:02}/\
             c_gls_NDVI_{y}{m:02}{d:02}0000_GLOBE_PROBAV_V2.2.1.nc",
            y = year,
            m = month,
            d = day
        ))
    }

    #[test]
    fn test_latest_product_of_the_month() {
        let settings = settings();
        let locator = MemoryLocator::new([ndvi(2020, 5, 1), ndvi(2020, 5, 21), ndvi(2020, 5, 11)]);
        let resolver = MonthlyResolver::with_today(&locator, &settings, date(2024, 1, 1));

        let found = resolver.resolve(LandVariable::Ndvi, date(2020, 5, 15)).unwrap();
        assert_eq!(found, ndvi(2020, 5, 21));
    }

    #[test]
    fn test_steps_back_to_earlier_month() {
        let settings = settings();
        let locator = MemoryLocator::new([ndvi(2020, 2, 1), ndvi(2020, 2, 11)]);
        let resolver = MonthlyResolver::with_today(&locator, &settings, date(2024, 1, 1));

        let found = resolver.resolve(LandVariable::Ndvi, date(2020, 4, 30)).unwrap();
        assert_eq!(found, ndvi(2020, 2, 11));
    }

    #[test]
    fn test_lookback_budget() {
        let settings = Settings { max_lookback_months: 1, ..settings() };
        let locator = MemoryLocator::new([ndvi(2020, 2, 1)]);
        let resolver = MonthlyResolver::with_today(&locator, &settings, date(2024, 1, 1));

        let err = resolver.resolve(LandVariable::Ndvi, date(2020, 4, 30)).unwrap_err();
        match err {
            CleopeError::NoDataFound { variable, earliest, latest } => {
                assert_eq!(variable, "NDVI");
                assert_eq!(earliest, date(2020, 3, 30));
                assert_eq!(latest, date(2020, 4, 30));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_tree_stops_at_archive_start() {
        let settings = Settings { max_lookback_months: 10_000, ..settings() };
        let locator = MemoryLocator::default();
        let resolver = MonthlyResolver::with_today(&locator, &settings, date(2024, 1, 1));

        let err = resolver.resolve(LandVariable::Fapar, date(2018, 1, 20)).unwrap_err();
        assert!(matches!(
            err,
            CleopeError::NoDataFound { earliest, .. } if earliest == date(2017, 6, 20)
        ));
    }

    #[test]
    fn test_out_of_archive_dates_use_today() {
        let settings = settings();
        let locator = MemoryLocator::default();
        let resolver = MonthlyResolver::with_today(&locator, &settings, date(2024, 1, 1));

        assert_eq!(resolver.effective_date(date(2030, 1, 1)), date(2024, 1, 1));
        assert_eq!(resolver.effective_date(date(2016, 1, 1)), date(2024, 1, 1));
        assert_eq!(resolver.effective_date(date(2019, 9, 9)), date(2019, 9, 9));

        assert_eq!(
            resolver.month_pattern(LandVariable::Lai, date(2019, 9, 9)),
            "/mnt/Copernicus/Copernicus-land/LAI/2019/09/**/c_gls_LAI_*.nc"
        );
    }

    fn dmp(region: &str, month: u32) -> PathBuf {
        let archive = format!("g2_BIOPAR_DMP_2019{month:02}010000_{region}_PROBAV_V2.0.1.zip");
        PathBuf::from(format!(
            "/mnt/Copernicus/Copernicus-land/DMP/2019/{month:02}/01/{archive}/unpacked/\
             c_gls_DMP_2019{month:02}010000_{region}_PROBAV_V2.0.1.tiff"
        ))
    }

    #[test]
    fn test_dmp_year_products_per_region() {
        let settings = settings();
        let mut locator = MemoryLocator::new([dmp("EURO", 3), dmp("EURO", 1), dmp("AFRI", 1)]);
        locator.insert(
            "/mnt/Copernicus/Copernicus-land/DMP/2019/01/11/\
             g2_BIOPAR_DMP_201901110000_EURO_PROBAV_V2.0.1.zip/unpacked/c_gls_DMP.tiff",
        );
        let resolver = DmpResolver::new(&locator, &settings);

        assert_eq!(
            resolver.year_pattern(2019, DmpRegion::Asia),
            "/mnt/Copernicus/Copernicus-land/DMP/2019/*/01/g2_BIOPAR_DMP*ASIA*.zip/*/*.tiff"
        );
        assert_eq!(
            resolver.year_products(2019, DmpRegion::Euro).unwrap(),
            vec![dmp("EURO", 1), dmp("EURO", 3)]
        );
        assert_eq!(resolver.year_products(2019, DmpRegion::Afri).unwrap(), vec![dmp("AFRI", 1)]);
        assert!(resolver.year_products(2019, DmpRegion::Asia).unwrap().is_empty());
    }

    #[test]
    fn test_dmp_listed_products_skip_empty() {
        let settings = settings();
        let locator = MemoryLocator::new([
            PathBuf::from("/data/dmp/b/image.tiff"),
            PathBuf::from("/data/dmp/a/nested/image.tiff"),
            PathBuf::from("/data/dmp/a/nested/quicklook.tiff"),
        ]);
        let resolver = DmpResolver::new(&locator, &settings);

        let products =
            vec![PathBuf::from("/data/dmp/b"), PathBuf::from("/data/dmp/a"), PathBuf::from("/data/dmp/c")];
        assert_eq!(
            resolver.listed_products(&products).unwrap(),
            vec![
                PathBuf::from("/data/dmp/a/nested/image.tiff"),
                PathBuf::from("/data/dmp/b/image.tiff")
            ]
        );
    }
}
