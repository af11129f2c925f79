//! Settings file management.
//!
//! Reads the optional `config.toml` from the xsops config home. Every field
//! has a default, so a missing file behaves like an empty one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::paths::HostEnv;
use crate::error::{ConfigError, Result};

/// User settings stored in `<config_home>/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// External tool locations
    pub engine: EngineSettings,
}

/// External binaries xsops shells out to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Encryption engine binary (name on PATH or absolute path)
    pub program: String,
    /// Key generation binary used by `init`
    pub keygen: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            program: constants::DEFAULT_ENGINE.to_string(),
            keygen: constants::DEFAULT_KEYGEN.to_string(),
        }
    }
}

impl Settings {
    /// Path to the settings file for a host.
    pub fn config_path(host: &HostEnv) -> Result<PathBuf> {
        Ok(host.config_home()?.join(constants::CONFIG_FILE))
    }

    /// Load settings for a host, falling back to defaults when the file is absent.
    pub fn load(host: &HostEnv) -> Result<Self> {
        Self::load_from(&Self::config_path(host)?)
    }

    /// Load settings from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file exists but cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading settings");

        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        Ok(settings)
    }
}
