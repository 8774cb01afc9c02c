//! Daily and weekly series of atmosphere and marine analyses.

use chrono::{Local, NaiveDate};
use cleope_core::config::Settings;
use cleope_core::error::Result;
use cleope_core::models::{AtmosphereVariable, Frequency, ObservationTimes, SensingRange, SeriesProduct};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::dates::{date_dir, sample_dates};
use crate::locator::{pattern_in, ProductLocator};

const MARINE_PATTERN: &str = "*.nc";

/// Resolves dated directories and the files inside them
pub struct SeriesResolver<'a> {
    locator: &'a dyn ProductLocator,
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a> SeriesResolver<'a> {
    pub fn new(locator: &'a dyn ProductLocator, settings: &'a Settings) -> Self {
        Self::with_today(locator, settings, Local::now().date_naive())
    }

    /// Resolver with a fixed notion of today
    pub fn with_today(
        locator: &'a dyn ProductLocator,
        settings: &'a Settings,
        today: NaiveDate,
    ) -> Self {
        Self { locator, settings, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Directories expected to hold the product on each sampled date
    pub fn compose_pseudopaths(
        &self,
        product: SeriesProduct,
        range: &SensingRange,
        frequency: Frequency,
    ) -> Vec<PathBuf> {
        let dates = sample_dates(range, frequency, self.today, self.settings.series_limit);

        match product {
            SeriesProduct::Atmosphere(variable) => {
                let root = self.settings.atmosphere_root().join(variable.code());
                dates.iter().map(|d| date_dir(&root, *d)).collect()
            }
            SeriesProduct::Marine => {
                let root = self.settings.marine_root();
                dates.iter().map(|d| date_dir(&root, *d)).collect()
            }
        }
    }

    /// Analysis files of an atmosphere variable.
    ///
    /// With both observation times a date contributes only when both files
    /// exist, midnight first. Dates without files are skipped.
    pub fn resolve_atmosphere(
        &self,
        variable: AtmosphereVariable,
        range: &SensingRange,
        frequency: Frequency,
        times: ObservationTimes,
    ) -> Result<Vec<PathBuf>> {
        let patterns = times.patterns();
        let mut files = Vec::new();

        for dir in self.compose_pseudopaths(SeriesProduct::Atmosphere(variable), range, frequency) {
            let mut per_time = Vec::with_capacity(patterns.len());
            for pattern in &patterns {
                per_time.push(self.locator.find(&pattern_in(&dir, pattern))?.into_iter().next());
            }

            if per_time.iter().all(Option::is_some) {
                files.extend(per_time.into_iter().flatten());
            } else {
                warn!(dir = %dir.display(), "No complete set of analyses for this date, skipped");
            }
        }

        self.report(variable.code(), &files);
        Ok(files)
    }

    /// Every sea-surface temperature file of the sampled dates
    pub fn resolve_marine(&self, range: &SensingRange, frequency: Frequency) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for dir in self.compose_pseudopaths(SeriesProduct::Marine, range, frequency) {
            let found = self.locator.find(&pattern_in(&dir, MARINE_PATTERN))?;
            if found.is_empty() {
                warn!(dir = %dir.display(), "No marine analysis for this date, skipped");
            }
            files.extend(found);
        }

        self.report("SST", &files);
        Ok(files)
    }

    fn report(&self, what: &str, files: &[PathBuf]) {
        if files.is_empty() {
            warn!("No {} files found for the requested dates", what);
        } else {
            info!("{} {} files found", files.len(), what);
            debug!(first = %files[0].display(), "First resolved file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::MemoryLocator;
    use std::path::Path;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings() -> Settings {
        Settings { mount_root: PathBuf::from("/mnt/Copernicus"), ..Settings::default() }
    }

    fn cams(day: u32, time: &str) -> PathBuf {
        PathBuf::from(format!(
            "/mnt/Copernicus/Copernicus-atmosphere/ANALYSIS/SURFACE_FIELDS/tcco/2024/01/{:02}/\
             z_cams_c_ecmf_202401{:02}{}_prod_fc_sfc_000_tcco.nc",
            day, day, time
        ))
    }

    #[test]
    fn test_compose_pseudopaths() {
        let settings = settings();
        let locator = MemoryLocator::default();
        let resolver = SeriesResolver::with_today(&locator, &settings, date(2024, 6, 1));
        let range = SensingRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();

        let atmosphere = resolver.compose_pseudopaths(
            SeriesProduct::Atmosphere(AtmosphereVariable::CarbonMonoxide),
            &range,
            Frequency::DAILY,
        );
        assert_eq!(atmosphere.len(), 3);
        assert_eq!(
            atmosphere[0],
            Path::new("/mnt/Copernicus/Copernicus-atmosphere/ANALYSIS/SURFACE_FIELDS/tcco/2024/01/01")
        );

        let marine = resolver.compose_pseudopaths(SeriesProduct::Marine, &range, Frequency::DAILY);
        assert!(marine[2].ends_with("METOFFICE-GLO-SST-L4-NRT-OBS-GMPE-V3/2024/01/03"));
    }

    #[test]
    fn test_atmosphere_both_times_requires_pairs() {
        let settings = settings();
        let locator = MemoryLocator::new([
            cams(1, "000000"),
            cams(1, "120000"),
            cams(2, "000000"),
            cams(3, "120000"),
            cams(3, "000000"),
        ]);
        let resolver = SeriesResolver::with_today(&locator, &settings, date(2024, 6, 1));
        let range = SensingRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();

        let files = resolver
            .resolve_atmosphere(
                AtmosphereVariable::CarbonMonoxide,
                &range,
                Frequency::DAILY,
                ObservationTimes::Both,
            )
            .unwrap();
        assert_eq!(
            files,
            vec![cams(1, "000000"), cams(1, "120000"), cams(3, "000000"), cams(3, "120000")]
        );
    }

    #[test]
    fn test_atmosphere_single_time_takes_first_match() {
        let settings = settings();
        let locator = MemoryLocator::new([cams(1, "120000"), cams(2, "000000"), cams(3, "120000")]);
        let resolver = SeriesResolver::with_today(&locator, &settings, date(2024, 6, 1));
        let range = SensingRange::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();

        let noon = resolver
            .resolve_atmosphere(
                AtmosphereVariable::CarbonMonoxide,
                &range,
                Frequency::DAILY,
                ObservationTimes::Noon,
            )
            .unwrap();
        assert_eq!(noon, vec![cams(1, "120000"), cams(3, "120000")]);
    }

    #[test]
    fn test_marine_collects_every_file() {
        let settings = settings();
        let root = settings.marine_root();
        let locator = MemoryLocator::new([
            root.join("2024/01/01/20240101120000-UKMO-L4_GHRSST-SSTfnd-GMPE-GLOB-v03.0-fv03.0.nc"),
            root.join("2024/01/01/20240101120000-UKMO-L4_GHRSST-SSTfnd-GMPE-GLOB-v03.0-fv03.0.nc.md5"),
            root.join("2024/01/02/20240102120000-UKMO-L4_GHRSST-SSTfnd-GMPE-GLOB-v03.0-fv03.0.nc"),
        ]);
        let resolver = SeriesResolver::with_today(&locator, &settings, date(2024, 6, 1));
        let range = SensingRange::new(date(2024, 1, 1), date(2024, 1, 5)).unwrap();

        let files = resolver.resolve_marine(&range, Frequency::DAILY).unwrap();
        assert_eq!(files.len(), 2);
    }
}
