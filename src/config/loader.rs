//! Configuration loading from file system
//!
//! The config file is plain JSON with camelCase keys.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::Config;
use crate::error::{LauncherError, Result};

/// Get the default config file path (~/.tag-launcher/config.json)
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Load configuration from ~/.tag-launcher/config.json
///
/// Returns Config::default() if the file is missing or invalid.
pub fn load_config() -> Config {
    load_config_from(&default_config_path())
}

/// Load configuration from an explicit path, falling back to defaults.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return Config::default();
    }

    match read_config(path) {
        Ok(config) => {
            info!("Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    }
}

/// Read and parse a config file, propagating every failure.
pub fn read_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str::<Config>(&contents)
        .map_err(|e| LauncherError::Config(format!("{}: {}", path.display(), e)))
}
