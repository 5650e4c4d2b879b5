//! Core configuration.
//!
//! # Responsibility
//! - Resolve the task data file location.
//! - Carry deployment-specific category weights for the category strategy.
//!
//! # Invariants
//! - A missing settings file yields defaults; a malformed one is an error.
//! - Relative `data_file` values resolve against the settings file directory.
//! - No category weights exist unless configured.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DATA_DIR_NAME: &str = "data";
pub const DATA_FILE_NAME: &str = "tasks.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Returns `<root>/data/tasks.json`.
pub fn default_data_file(root: impl AsRef<Path>) -> PathBuf {
    root.as_ref().join(DATA_DIR_NAME).join(DATA_FILE_NAME)
}

/// Settings shared by core callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Task collection file.
    pub data_file: PathBuf,
    /// Category name -> priority weight.
    pub category_weights: BTreeMap<String, i64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(""),
            category_weights: BTreeMap::new(),
        }
    }
}

impl CoreConfig {
    /// Loads settings from a JSON file.
    ///
    /// # Errors
    /// - `ConfigError::Io` when the file exists but cannot be read.
    /// - `ConfigError::Parse` when the file is not a valid settings object.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=config_load module=config status=ok source=default path={}",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if config.data_file.is_relative() {
            if let Some(base) = path.parent() {
                config.data_file = base.join(&config.data_file);
            }
        }

        info!(
            "event=config_load module=config status=ok source=file categories={}",
            config.category_weights.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{default_data_file, CoreConfig, DATA_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn default_data_file_lives_under_data_dir() {
        assert_eq!(
            default_data_file("/srv/app"),
            PathBuf::from("/srv/app/data").join(DATA_FILE_NAME)
        );
    }

    #[test]
    fn default_config_has_no_weights() {
        let config = CoreConfig::default();
        assert!(config.category_weights.is_empty());
        assert_eq!(config.data_file, PathBuf::from("data/tasks.json"));
    }
}
