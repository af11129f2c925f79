//! Secret value sources for `set`.
//!
//! A value may come inline, from standard input, from a file or from a named
//! environment variable. When several are given the first non-empty one in
//! that order wins.

use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Where a new secret value may come from.
#[derive(Debug, Default, Clone)]
pub struct ValueSources {
    /// Inline value
    pub value: Option<String>,
    /// Read the whole of standard input
    pub stdin: bool,
    /// Read a file, trimmed of surrounding whitespace
    pub file: Option<PathBuf>,
    /// Name of an environment variable holding the value
    pub env: Option<String>,
}

impl ValueSources {
    /// Whether any source was requested.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn count(&self) -> usize {
        [
            self.value.is_some(),
            self.stdin,
            self.file.is_some(),
            self.env.is_some(),
        ]
        .iter()
        .filter(|given| **given)
        .count()
    }

    /// Resolve the secret value for `key`.
    ///
    /// Returns `Ok(None)` when no source was requested, so an existing
    /// record keeps its secret.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValueMissing` if sources were requested but none
    /// produced a non-empty value, or an I/O error if stdin or the file
    /// cannot be read.
    pub fn resolve<R, F>(&self, key: &str, stdin: R, lookup_env: F) -> Result<Option<Zeroizing<String>>>
    where
        R: Read,
        F: Fn(&str) -> Option<String>,
    {
        if self.is_empty() {
            return Ok(None);
        }
        if self.count() > 1 {
            warn!("several value sources given; using the first non-empty of value, stdin, file, env");
        }

        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            debug!(key, "secret from inline value");
            return Ok(Some(Zeroizing::new(value.to_string())));
        }

        if self.stdin {
            let mut stdin = stdin;
            let mut buf = Zeroizing::new(String::new());
            stdin.read_to_string(&mut buf)?;
            if !buf.is_empty() {
                debug!(key, "secret from stdin");
                return Ok(Some(buf));
            }
        }

        if let Some(path) = &self.file {
            let contents = Zeroizing::new(std::fs::read_to_string(path)?);
            let trimmed = contents.trim();
            if !trimmed.is_empty() {
                debug!(key, path = %path.display(), "secret from file");
                return Ok(Some(Zeroizing::new(trimmed.to_string())));
            }
        }

        if let Some(name) = &self.env {
            match lookup_env(name).filter(|v| !v.is_empty()) {
                Some(value) => {
                    debug!(key, var = %name, "secret from environment");
                    return Ok(Some(Zeroizing::new(value)));
                }
                None => warn!(var = %name, "environment variable is not set"),
            }
        }

        Err(Error::ValueMissing(key.to_string()))
    }

    /// Resolve against the real process stdin and environment.
    pub fn resolve_from_process(&self, key: &str) -> Result<Option<Zeroizing<String>>> {
        self.resolve(key, std::io::stdin().lock(), |name| std::env::var(name).ok())
    }
}
