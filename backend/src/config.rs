//! Application configuration.
//!
//! Precedence, lowest first: built-in defaults, the YAML config file, then
//! environment variables.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "kidtask.yaml";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const CONFIG_PATH_ENV: &str = "KIDTASK_CONFIG";
pub const DATA_DIR_ENV: &str = "KIDTASK_DATA_DIR";
pub const STORAGE_FORMAT_ENV: &str = "KIDTASK_STORAGE_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid storage format '{0}', expected json or csv")]
    InvalidStorageFormat(String),
    #[error("Data directory cannot be empty")]
    EmptyDataDir,
}

/// On-disk format of the three collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Csv,
}

impl StorageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            StorageFormat::Csv => "csv",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(StorageFormat::Json),
            "csv" => Ok(StorageFormat::Csv),
            _ => Err(ConfigError::InvalidStorageFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the data files; created on first run
    pub data_dir: PathBuf,
    pub storage_format: StorageFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_format: StorageFormat::default(),
        }
    }
}

/// A partial configuration; unset fields leave the current value alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub storage_format: Option<StorageFormat>,
}

impl AppConfig {
    pub fn apply_update(self, update: ConfigUpdate) -> Self {
        Self {
            data_dir: update.data_dir.unwrap_or(self.data_dir),
            storage_format: update.storage_format.unwrap_or(self.storage_format),
        }
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }
        Ok(self)
    }
}

/// Read a YAML config file. A missing file is an empty update.
pub fn config_from_file(path: &Path) -> Result<ConfigUpdate, ConfigError> {
    if !path.exists() {
        info!("Config file not found at {:?}, using defaults", path);
        return Ok(ConfigUpdate::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(ConfigUpdate::default());
    }

    let update = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded configuration from {:?}", path);
    Ok(update)
}

/// Build an update from environment variables, looked up through `var`
pub fn config_from_env<F>(var: F) -> Result<ConfigUpdate, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let storage_format = var(STORAGE_FORMAT_ENV)
        .map(|value| StorageFormat::from_string(&value))
        .transpose()?;
    Ok(ConfigUpdate {
        data_dir: var(DATA_DIR_ENV).map(PathBuf::from),
        storage_format,
    })
}

/// Resolve the configuration with the given variable lookup
pub fn resolve_config<F>(var: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let config = AppConfig::default()
        .apply_update(config_from_file(&config_path)?)
        .apply_update(config_from_env(&var)?)
        .validate()?;

    info!(
        "Final configuration: data_dir={:?}, storage_format={}",
        config.data_dir,
        config.storage_format.as_str()
    );
    Ok(config)
}

/// Resolve the configuration from the process environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    resolve_config(|name| std::env::var(name).ok())
}
