//! TOML configuration file adapter.
//!
//! Implements [`ConfigPort`] over a file on disk.  Fields missing from the
//! file keep their defaults; the result is validated before it is returned.

use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::CoordinatorConfig;

pub struct TomlConfigFile {
    path: PathBuf,
}

impl TomlConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for TomlConfigFile {
    fn load(&self) -> Result<CoordinatorConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            kind => ConfigError::IoError(kind),
        })?;
        let config: CoordinatorConfig =
            toml::from_str(&text).map_err(|e| ConfigError::Corrupted(e.message().to_owned()))?;
        config.validate()?;
        info!("TomlConfigFile: loaded {}", self.path.display());
        Ok(config)
    }
}
