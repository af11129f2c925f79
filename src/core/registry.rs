//! Alias registry.
//!
//! Read-only mapping from short vault names to absolute vault paths, kept in
//! `<config_home>/registry.json`:
//!
//! ```json
//! { "work": "/home/alice/work/xsops.secrets.json" }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::core::constants;
use crate::core::paths::HostEnv;
use crate::error::{RegistryError, Result};

/// Alias name to vault path lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasRegistry {
    entries: BTreeMap<String, PathBuf>,
}

impl AliasRegistry {
    /// Registry with no aliases.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from in-memory entries.
    pub fn from_entries<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        }
    }

    /// Path to the registry file for a host.
    pub fn registry_path(host: &HostEnv) -> Result<PathBuf> {
        Ok(host.config_home()?.join(constants::REGISTRY_FILE))
    }

    /// Load the registry for a host.
    pub fn load(host: &HostEnv) -> Result<Self> {
        Self::load_from(&Self::registry_path(host)?)
    }

    /// Load a registry file. A missing file is an empty registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Read` if the file exists but cannot be read,
    /// or `RegistryError::Parse` if it is not a JSON object.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no alias registry");
            return Ok(Self::empty());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Only non-empty string values name a vault.
        let entries: BTreeMap<String, PathBuf> = raw
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(p) if !p.is_empty() => Some((name, PathBuf::from(p))),
                _ => None,
            })
            .collect();

        debug!(aliases = entries.len(), "alias registry loaded");
        Ok(Self { entries })
    }

    /// Path registered for `name`, if any.
    ///
    /// Exact matches win; otherwise names are compared ASCII case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&Path> {
        if name.is_empty() {
            return None;
        }
        self.entries
            .get(name)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
                    .map(|(_, path)| path)
            })
            .map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
