//! JSON5 config file loading.

use crate::error::ConfigError;
use crate::model::DeskpilotConfig;
use directories::BaseDirs;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
const CONFIG_PATH_ENV: &str = "DESKPILOT_CONFIG";

/// Resolve the default config file path (`~/.deskpilot/config.json5`).
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    if let Some(dirs) = BaseDirs::new() {
        return dirs.home_dir().join(".deskpilot").join("config.json5");
    }
    PathBuf::from(".deskpilot").join("config.json5")
}

/// Load config from the default location, falling back to defaults when the
/// file does not exist.
pub fn load() -> Result<DeskpilotConfig, ConfigError> {
    let path = default_config_path();
    if !path.exists() {
        debug!("no config file found, using defaults (path={})", path.display());
        return Ok(DeskpilotConfig::default());
    }
    load_from_path(&path)
}

/// Load and validate config from an explicit path.
pub fn load_from_path(path: &Path) -> Result<DeskpilotConfig, ConfigError> {
    info!("loading config (path={})", path.display());
    let raw = std::fs::read_to_string(path)?;
    let config: DeskpilotConfig = json5::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}
