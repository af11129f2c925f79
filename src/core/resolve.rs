//! Vault identifier resolution.
//!
//! Turns whatever the user typed after `--vault` into an absolute vault path.
//! First match wins:
//!
//! 1. empty or `default` - `<data_home>/xsops.secrets.json`
//! 2. `.` - `<cwd>/xsops.secrets.json`
//! 3. a registered alias - the registry path, verbatim
//! 4. a `file:` or `xsops:` URI with a path - that path
//! 5. anything else - a filesystem path, absolutized against the cwd
//!
//! Aliases are checked before URI and path parsing, so a registered name wins
//! even if it also looks like a path.

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::core::constants;
use crate::core::paths::HostEnv;
use crate::core::registry::AliasRegistry;
use crate::error::ResolveError;

/// Resolves vault identifiers against a captured host and alias registry.
#[derive(Debug, Clone)]
pub struct Resolver {
    host: HostEnv,
    registry: AliasRegistry,
}

impl Resolver {
    pub fn new(host: HostEnv, registry: AliasRegistry) -> Self {
        Self { host, registry }
    }

    pub fn host(&self) -> &HostEnv {
        &self.host
    }

    /// Resolve an identifier to an absolute vault path.
    ///
    /// No existence checks are made.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NoDataHome` if `default` is requested and no
    /// data root can be derived, or `ResolveError::NoWorkingDirectory` if a
    /// relative identifier needs a working directory that is unavailable.
    pub fn resolve(&self, identifier: &str) -> Result<PathBuf, ResolveError> {
        let path = self.resolve_inner(identifier)?;
        debug!(identifier, path = %path.display(), "resolved vault");
        Ok(path)
    }

    fn resolve_inner(&self, identifier: &str) -> Result<PathBuf, ResolveError> {
        if identifier.is_empty() || identifier == constants::DEFAULT_IDENTIFIER {
            return Ok(self.host.data_home()?.join(constants::VAULT_FILE));
        }

        if identifier == constants::CWD_IDENTIFIER {
            return Ok(self.host.cwd()?.join(constants::VAULT_FILE));
        }

        if let Some(path) = self.registry.lookup(identifier) {
            return Ok(path.to_path_buf());
        }

        if let Some(path) = uri_path(identifier) {
            return Ok(path);
        }

        self.host.absolutize(identifier.as_ref())
    }
}

/// Path component of a `file:` or `xsops:` URI, if `identifier` is one.
fn uri_path(identifier: &str) -> Option<PathBuf> {
    let uri = Url::parse(identifier).ok()?;
    if uri.cannot_be_a_base() {
        return None;
    }
    let scheme = uri.scheme();
    if scheme != "file" && scheme != constants::URI_SCHEME {
        return None;
    }

    if scheme == "file" {
        if let Ok(path) = uri.to_file_path() {
            return Some(path);
        }
    }

    let raw = uri.path();
    if raw.is_empty() {
        return None;
    }
    let decoded = percent_decode(raw);
    Some(PathBuf::from(decoded))
}

/// Decode `%XX` escapes, leaving malformed sequences untouched.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(b) = decoded {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
