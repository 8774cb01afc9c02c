//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use cleope_core::config::{CliConfigOverrides, LayeredConfig};
use cleope_core::selections::SelectionStore;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cleope.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_file(cli.config.as_deref()) {
        debug!(path = %path.display(), "Loading configuration file");
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        catalogue_url: cli.catalogue_url.clone(),
        mount_root: cli.mount_root.clone(),
        selections_dir: cli.selections_dir.clone(),
        page_size: None,
    });
    Ok(config)
}

/// Explicit config file, or `cleope.toml` when one exists here
fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

/// Selection store in the configured selections directory
pub fn selection_store(config: &LayeredConfig) -> SelectionStore {
    SelectionStore::new(config.settings().selections_dir)
}

/// Non-empty, trimmed lines of a list file
pub fn read_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read list file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
