//! Per-user directory discovery.
//!
//! [`HostEnv`] is an explicit snapshot of every process input that path
//! resolution depends on: a handful of environment variables, the host OS
//! family and the working directory. Capturing it once at startup keeps the
//! resolver a pure function of its inputs, and lets tests describe a host
//! without touching the real process environment.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::core::constants::{self, env};
use crate::error::ResolveError;

/// Host OS family, as far as directory layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }
}

/// Environment variables captured by [`HostEnv::capture`].
const CAPTURED_VARS: &[&str] = &[
    env::DATA_HOME,
    env::CONFIG_HOME,
    env::XDG_DATA_HOME,
    env::XDG_CONFIG_HOME,
    env::APPDATA,
    env::USERPROFILE,
    env::HOME,
];

/// Snapshot of the host inputs used to locate vaults and config files.
#[derive(Debug, Clone)]
pub struct HostEnv {
    vars: HashMap<String, String>,
    platform: Platform,
    cwd: Option<PathBuf>,
}

impl HostEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        let vars = CAPTURED_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| (name.to_string(), value))
            })
            .collect();

        Self {
            vars,
            platform: Platform::current(),
            cwd: std::env::current_dir().ok(),
        }
    }

    /// An empty host: no variables set and no working directory.
    pub fn new(platform: Platform) -> Self {
        Self {
            vars: HashMap::new(),
            platform,
            cwd: None,
        }
    }

    /// Set a variable.
    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    /// Set the working directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Value of a variable; empty values count as unset.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Captured working directory.
    pub fn cwd(&self) -> Result<&Path, ResolveError> {
        self.cwd.as_deref().ok_or(ResolveError::NoWorkingDirectory)
    }

    /// Make `path` absolute against the captured working directory.
    ///
    /// The result is lexically cleaned: `.` segments are dropped and `..`
    /// removes the preceding segment. Symlinks are not resolved.
    pub fn absolutize(&self, path: &Path) -> Result<PathBuf, ResolveError> {
        if path.is_absolute() {
            return Ok(clean(path));
        }
        Ok(clean(&self.cwd()?.join(path)))
    }

    /// Per-user data root holding the default vault.
    ///
    /// Precedence: `XSOPS_DATA_HOME` (verbatim), `$XDG_DATA_HOME/xsops`,
    /// then a platform fallback.
    pub fn data_home(&self) -> Result<PathBuf, ResolveError> {
        if let Some(dir) = self.var(env::DATA_HOME) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = self.var(env::XDG_DATA_HOME) {
            return Ok(Path::new(dir).join(constants::APP_DIR));
        }

        let dir = match self.platform {
            Platform::Windows => self
                .roaming_app_data()
                .map(|d| d.join(constants::APP_DIR).join("data")),
            Platform::MacOs => self.var(env::HOME).map(|home| {
                Path::new(home)
                    .join("Library")
                    .join("Application Support")
                    .join(constants::APP_DIR)
                    .join("data")
            }),
            Platform::Unix => self.var(env::HOME).map(|home| {
                Path::new(home)
                    .join(".local")
                    .join("share")
                    .join(constants::APP_DIR)
            }),
        };

        trace!(platform = ?self.platform, found = dir.is_some(), "data home fallback");
        dir.ok_or(ResolveError::NoDataHome)
    }

    /// Per-user config root shared with other tools (sops keeps its age key here).
    pub fn user_config_dir(&self) -> Result<PathBuf, ResolveError> {
        if let Some(dir) = self.var(env::XDG_CONFIG_HOME) {
            return Ok(PathBuf::from(dir));
        }

        let dir = match self.platform {
            Platform::Windows => self.roaming_app_data(),
            Platform::MacOs => self
                .var(env::HOME)
                .map(|home| Path::new(home).join("Library").join("Application Support")),
            Platform::Unix => self.var(env::HOME).map(|home| Path::new(home).join(".config")),
        };

        dir.ok_or(ResolveError::NoConfigHome)
    }

    /// xsops config root holding `registry.json`, `config.toml` and the
    /// seed `.sops.yaml`.
    pub fn config_home(&self) -> Result<PathBuf, ResolveError> {
        if let Some(dir) = self.var(env::CONFIG_HOME) {
            return Ok(PathBuf::from(dir));
        }
        Ok(self.user_config_dir()?.join(constants::APP_DIR))
    }

    /// Location of the age identity used by sops.
    pub fn age_key_file(&self) -> Result<PathBuf, ResolveError> {
        Ok(self
            .user_config_dir()?
            .join("sops")
            .join("age")
            .join("keys.txt"))
    }

    fn roaming_app_data(&self) -> Option<PathBuf> {
        if let Some(dir) = self.var(env::APPDATA) {
            return Some(PathBuf::from(dir));
        }
        self.var(env::USERPROFILE)
            .map(|home| Path::new(home).join("AppData").join("Roaming"))
    }
}

/// Lexical normalization of an absolute path.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
