#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::GameConfig;

// Fallback config file path
const CONFIG_FILE_PATH: &str = "config/dropgrid.toml";

// Environment variable overriding the config location
pub const CONFIG_ENV_VAR: &str = "DROPGRID_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Loads the configuration from the default location, writing the defaults
/// out first if no file exists yet.
pub fn load_config_from_file() -> Result<GameConfig, ConfigError> {
    load_config_from(&get_config_file_path())
}

pub fn load_config_from(path: &Path) -> Result<GameConfig, ConfigError> {
    if !path.exists() {
        let default_config = GameConfig::default();
        save_config_to(path, &default_config)?;
        info!("Wrote default configuration to {}", path.display());
        return Ok(default_config);
    }

    let contents = fs::read_to_string(path)?;
    let config: GameConfig = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save_config_to(path: &Path, config: &GameConfig) -> Result<(), ConfigError> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)?;

    Ok(())
}

// Get the path to the config file
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("dropgrid").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}
