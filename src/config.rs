//! Coordinator configuration parameters
//!
//! All tunable parameters for the irrigation coordinator.  Values come from
//! an optional TOML file (see [`TomlConfigFile`](crate::adapters::config_file::TomlConfigFile))
//! and the command line; anything left unset keeps its default.

use serde::{Deserialize, Serialize};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::error::{Error, Result};
use crate::resolver::DEFAULT_DRY_THRESHOLD_PERCENT;

/// Core coordinator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    // --- Control ---
    /// Auto mode runs the pump while moisture is below this percentage (0-100)
    pub dry_threshold_percent: u8,

    // --- Transport ---
    /// Socket address the HTTP adapter listens on
    pub bind_addr: String,
    /// Answer CORS preflights for any origin (browser dashboards)
    pub cors_permissive: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            dry_threshold_percent: DEFAULT_DRY_THRESHOLD_PERCENT,
            bind_addr: "0.0.0.0:5000".to_owned(),
            cors_permissive: true,
        }
    }
}

impl CoordinatorConfig {
    /// Range-check every field.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.dry_threshold_percent > 100 {
            return Err(ConfigError::ValidationFailed(
                "dry_threshold_percent must be within 0-100",
            ));
        }
        if self.bind_addr.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("bind_addr must not be empty"));
        }
        Ok(())
    }
}

/// Startup configuration: `source` (or the defaults when there is none),
/// then the command-line bind override, then validation.
pub fn resolve(source: Option<&dyn ConfigPort>, bind_override: Option<String>) -> Result<CoordinatorConfig> {
    let mut config = match source {
        Some(port) => port.load().map_err(Error::from)?,
        None => {
            info!("No config file given, using defaults");
            CoordinatorConfig::default()
        }
    };
    if let Some(bind) = bind_override {
        config.bind_addr = bind;
    }
    config.validate().map_err(Error::from)?;
    Ok(config)
}
