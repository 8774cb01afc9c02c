use crate::error::{CleopeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOGUE_URL: &str = "https://catalogue.onda-dias.eu/dias-catalogue";
pub const DEFAULT_MOUNT_ROOT: &str = "/mnt/Copernicus";
pub const DEFAULT_SELECTIONS_DIR: &str = "outputs";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_SERIES_LIMIT: usize = 30;
pub const DEFAULT_MAX_LOOKBACK_MONTHS: u32 = 24;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Resolved settings handed to the paginator and the resolvers.
///
/// Every path the toolkit touches is derived from this object; nothing is
/// resolved against the process working directory implicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub catalogue_url: String,
    pub mount_root: PathBuf,
    pub selections_dir: PathBuf,
    pub page_size: usize,
    pub series_limit: usize,
    pub max_lookback_months: u32,
}

impl Default for Settings {
    fn default() -> Self {
        LayeredConfig::with_defaults().settings()
    }
}

impl Settings {
    /// Root of the atmosphere (CAMS) surface-field analyses
    pub fn atmosphere_root(&self) -> PathBuf {
        self.mount_root.join("Copernicus-atmosphere").join("ANALYSIS").join("SURFACE_FIELDS")
    }

    /// Root of the marine (CMEMS) global SST L4 product
    pub fn marine_root(&self) -> PathBuf {
        self.mount_root
            .join("Copernicus-marine")
            .join("SST_GLO_SST_L4_NRT_OBSERVATIONS_010_005")
            .join("METOFFICE-GLO-SST-L4-NRT-OBS-GMPE-V3")
    }

    /// Root of the land (CGLS) biophysical products
    pub fn land_root(&self) -> PathBuf {
        self.mount_root.join("Copernicus-land")
    }
}

/// Layered configuration for CLEOPE
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub catalogue_url: ConfigValue<String>,
    pub mount_root: ConfigValue<PathBuf>,
    pub selections_dir: ConfigValue<PathBuf>,
    pub page_size: ConfigValue<usize>,
    pub series_limit: ConfigValue<usize>,
    pub max_lookback_months: ConfigValue<u32>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            catalogue_url: ConfigValue::new(
                DEFAULT_CATALOGUE_URL.to_string(),
                ConfigSource::Default,
            ),
            mount_root: ConfigValue::new(PathBuf::from(DEFAULT_MOUNT_ROOT), ConfigSource::Default),
            selections_dir: ConfigValue::new(
                PathBuf::from(DEFAULT_SELECTIONS_DIR),
                ConfigSource::Default,
            ),
            page_size: ConfigValue::new(DEFAULT_PAGE_SIZE, ConfigSource::Default),
            series_limit: ConfigValue::new(DEFAULT_SERIES_LIMIT, ConfigSource::Default),
            max_lookback_months: ConfigValue::new(
                DEFAULT_MAX_LOOKBACK_MONTHS,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CleopeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CleopeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(url) = file_config.catalogue_url {
            self.catalogue_url.update(url, ConfigSource::File);
        }

        if let Some(root) = file_config.mount_root {
            self.mount_root.update(root, ConfigSource::File);
        }

        if let Some(dir) = file_config.selections_dir {
            self.selections_dir.update(dir, ConfigSource::File);
        }

        if let Some(size) = file_config.page_size {
            self.page_size.update(validate_positive("page_size", size)?, ConfigSource::File);
        }

        if let Some(limit) = file_config.series_limit {
            self.series_limit.update(validate_positive("series_limit", limit)?, ConfigSource::File);
        }

        if let Some(months) = file_config.max_lookback_months {
            self.max_lookback_months.update(months, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(url) = env::var("CLEOPE_CATALOGUE_URL") {
            self.catalogue_url.update(url, ConfigSource::Environment);
        }

        if let Ok(root) = env::var("CLEOPE_MOUNT_ROOT") {
            self.mount_root.update(PathBuf::from(root), ConfigSource::Environment);
        }

        if let Ok(dir) = env::var("CLEOPE_SELECTIONS_DIR") {
            self.selections_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        if let Ok(size_str) = env::var("CLEOPE_PAGE_SIZE") {
            match parse_positive("page_size", &size_str) {
                Ok(size) => self.page_size.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CLEOPE_PAGE_SIZE value '{}': expected a positive integer",
                    size_str
                ),
            }
        }

        if let Ok(limit_str) = env::var("CLEOPE_SERIES_LIMIT") {
            match parse_positive("series_limit", &limit_str) {
                Ok(limit) => self.series_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CLEOPE_SERIES_LIMIT value '{}': expected a positive integer",
                    limit_str
                ),
            }
        }

        if let Ok(months_str) = env::var("CLEOPE_MAX_LOOKBACK_MONTHS") {
            match months_str.trim().parse::<u32>() {
                Ok(months) => self.max_lookback_months.update(months, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CLEOPE_MAX_LOOKBACK_MONTHS value '{}': expected an integer",
                    months_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(url) = overrides.catalogue_url {
            self.catalogue_url.update(url, ConfigSource::Cli);
        }

        if let Some(root) = overrides.mount_root {
            self.mount_root.update(root, ConfigSource::Cli);
        }

        if let Some(dir) = overrides.selections_dir {
            self.selections_dir.update(dir, ConfigSource::Cli);
        }

        if let Some(size) = overrides.page_size {
            self.page_size.update(size, ConfigSource::Cli);
        }
    }

    /// Collapse the layers into the plain settings object
    pub fn settings(&self) -> Settings {
        Settings {
            catalogue_url: self.catalogue_url.value.trim_end_matches('/').to_string(),
            mount_root: self.mount_root.value.clone(),
            selections_dir: self.selections_dir.value.clone(),
            page_size: self.page_size.value,
            series_limit: self.series_limit.value,
            max_lookback_months: self.max_lookback_months.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "catalogue_url".to_string(),
            (self.catalogue_url.value.clone(), self.catalogue_url.source),
        );
        map.insert(
            "mount_root".to_string(),
            (self.mount_root.value.display().to_string(), self.mount_root.source),
        );
        map.insert(
            "selections_dir".to_string(),
            (self.selections_dir.value.display().to_string(), self.selections_dir.source),
        );
        map.insert(
            "page_size".to_string(),
            (self.page_size.value.to_string(), self.page_size.source),
        );
        map.insert(
            "series_limit".to_string(),
            (self.series_limit.value.to_string(), self.series_limit.source),
        );
        map.insert(
            "max_lookback_months".to_string(),
            (self.max_lookback_months.value.to_string(), self.max_lookback_months.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    catalogue_url: Option<String>,
    mount_root: Option<PathBuf>,
    selections_dir: Option<PathBuf>,
    page_size: Option<usize>,
    series_limit: Option<usize>,
    max_lookback_months: Option<u32>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub catalogue_url: Option<String>,
    pub mount_root: Option<PathBuf>,
    pub selections_dir: Option<PathBuf>,
    pub page_size: Option<usize>,
}

/// Parse a strictly positive integer setting
pub fn parse_positive(key: &str, s: &str) -> Result<usize> {
    let value = s.trim().parse::<usize>().map_err(|_| CleopeError::ConfigInvalid {
        key: key.to_string(),
        reason: format!("'{}' is not an integer", s),
    })?;
    validate_positive(key, value)
}

fn validate_positive(key: &str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(CleopeError::ConfigInvalid {
            key: key.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
