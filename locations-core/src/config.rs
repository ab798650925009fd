use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::Locations;

/// Prefix marking process environment variables that hold a sensitive location.
pub const SENSITIVE_ENV_PREFIX: &str = "LOCATION_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to read environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Example TOML:
    /// [locations]
    /// home = "59.3293, 18.0686"
    #[serde(default)]
    pub locations: Locations,

    /// Keys owned by other tools (units, provider settings, ...), written back untouched.
    #[serde(flatten)]
    pub other: toml::Table,
}

/// Persistent home of the [`Config`] document.
///
/// The whole document is read on every load and written on every save.
pub trait ConfigStore {
    fn load(&self) -> Result<Config, ConfigError>;
    fn save(&self, config: &Config) -> Result<(), ConfigError>;
}

/// TOML file backed [`ConfigStore`].
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config directory.
    pub fn at_default_path() -> Result<Self, ConfigError> {
        Ok(Self::new(config_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    fn load(&self) -> Result<Config, ConfigError> {
        let path = &self.path;
        if !path.exists() {
            // First run: no config file, return empty.
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path: path.clone(), source })
    }

    /// Save config to disk, creating parent directories as needed.
    fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let path = &self.path;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Write { path: parent.to_path_buf(), source })?;
        }

        let toml = toml::to_string_pretty(config)?;

        fs::write(path, toml).map_err(|source| ConfigError::Write { path: path.clone(), source })?;
        tracing::debug!("Config saved to {}", path.display());

        Ok(())
    }
}

/// Path to the config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("dev", "cli-weather", "cli-weather")
        .ok_or(ConfigError::NoPlatformConfigDir)?;

    Ok(dirs.config_dir().join("config.toml"))
}

/// Collect sensitive location candidates from `env_file` (if it exists) and
/// from `LOCATION_*` process variables. Values are not validated here.
pub fn load_sensitive_locations(env_file: &Path) -> Result<Locations, ConfigError> {
    let mut found = Locations::new();

    if env_file.exists() {
        let iter = dotenvy::from_path_iter(env_file)
            .map_err(|source| ConfigError::EnvFile { path: env_file.to_path_buf(), source })?;
        for item in iter {
            let (key, value) = item
                .map_err(|source| ConfigError::EnvFile { path: env_file.to_path_buf(), source })?;
            found.insert(sensitive_name(&key), value);
        }
    }

    let vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    found.extend(sensitive_from_vars(vars));
    tracing::debug!("Found {} sensitive location candidates", found.len());

    Ok(found)
}

/// Pick `LOCATION_*` variables out of an environment listing.
pub fn sensitive_from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Locations {
    vars.into_iter()
        .filter_map(|(key, value)| {
            let name = key.strip_prefix(SENSITIVE_ENV_PREFIX)?;
            (!name.is_empty()).then(|| (sensitive_name(name), value))
        })
        .collect()
}

/// `WORK_OFFICE` becomes `work office`.
fn sensitive_name(key: &str) -> String {
    key.to_lowercase().replace('_', " ")
}
