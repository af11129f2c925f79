//! Error types for xsops.
//!
//! Every fallible operation returns [`Result`]. Errors are grouped by the
//! component that raised them so the CLI can print a terse summary by
//! default and the full chain under `--debug`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("no secret value supplied for '{0}'")]
    ValueMissing(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid filter pattern '{pattern}': {reason}")]
    InvalidFilter { pattern: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Short, detail-free description used when `--debug` is off.
    ///
    /// Never includes paths, engine output or secret material.
    pub fn summary(&self) -> &'static str {
        match self {
            Error::Resolve(_) => "could not resolve vault path",
            Error::Engine(EngineError::KeyNotFound { .. }) => "secret not found",
            Error::Engine(EngineError::NotInstalled { .. }) => "encryption engine not installed",
            Error::Engine(_) => "encryption engine failed",
            Error::Record(_) => "stored secret record is malformed",
            Error::ValueMissing(_) => "no secret value supplied",
            Error::Generate(_) => "could not generate secret",
            Error::Registry(_) => "could not read alias registry",
            Error::Config(_) => "could not read configuration",
            Error::InvalidFilter { .. } => "invalid filter pattern",
            Error::Io(_) => "io error",
            Error::Json(_) => "invalid json",
        }
    }

    /// Suggested next step, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Resolve(ResolveError::NoDataHome) => Some("set XSOPS_DATA_HOME or HOME"),
            Error::Engine(EngineError::NotInstalled { .. }) => {
                Some("install sops and age, then run: xsops init")
            }
            Error::ValueMissing(_) => Some("use --value, --stdin, --file or --env"),
            Error::Engine(EngineError::KeyNotFound { .. }) => Some("run: xsops ls"),
            _ => None,
        }
    }
}

/// Vault identifier resolution errors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("unable to determine the user data directory (no home or profile variable set)")]
    NoDataHome,

    #[error("unable to determine the user config directory (no home or profile variable set)")]
    NoConfigHome,

    #[error("unable to determine the current working directory")]
    NoWorkingDirectory,
}

/// Encryption engine invocation errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("'{program}' not found in PATH")]
    NotInstalled { program: String },

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} failed (exit code {code}): {stderr}")]
    Failed {
        operation: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("secret '{key}' not found in {}", path.display())]
    KeyNotFound { key: String, path: PathBuf },
}

/// Secret record format errors.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("malformed secret record: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("malformed vault document: {0}")]
    Document(#[source] serde_json::Error),

    #[error("failed to serialize secret record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("secret record '{key}' has an empty secret")]
    EmptySecret { key: String },
}

/// Secret generation errors.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("character set is empty: enable at least one character class or pass --chars")]
    EmptyCharset,

    #[error("random source unavailable: {0}")]
    Rng(String),

    #[error("secret size {size} exceeds the maximum of {max}")]
    TooLarge { size: i64, max: i64 },
}

/// Alias registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read registry {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("age key file {} has no public key line", path.display())]
    NoPublicKey { path: PathBuf },
}

/// Result type alias using the xsops [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
