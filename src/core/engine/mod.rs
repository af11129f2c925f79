//! Encryption engine seam.
//!
//! xsops never touches ciphertext itself. Every read or write of a vault
//! goes through an [`Engine`], which in production is the `sops` CLI.
//!
//! ## Adding a New Engine
//!
//! 1. Implement the `Engine` trait
//! 2. Add the implementation in a new file (e.g., `age.rs`)
//! 3. Re-export from this module

use std::path::Path;

use crate::core::record::SecretRecord;
use crate::error::{EngineError, Result};

mod keygen;
mod sops;

pub use keygen::{age_keygen, read_public_key};
pub use sops::Sops;

/// Exit code the engine uses when a requested tree component is missing.
pub const EXIT_COMPONENT_NOT_FOUND: i32 = 1;

/// Exit code the engine uses when the input file cannot be read.
pub const EXIT_INPUT_UNREADABLE: i32 = 2;

/// Captured result of one engine invocation.
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Process exit code (`-1` if terminated by a signal)
    pub code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl EngineOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Standard error as lossy UTF-8, trimmed.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Turn a non-zero exit into `EngineError::Failed`.
    pub fn check(self, operation: &'static str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(EngineError::Failed {
            operation,
            code: self.code,
            stderr: self.stderr_text(),
        }
        .into())
    }
}

/// External encryption engine.
///
/// Implementations run synchronously and report failures through
/// [`EngineOutput::code`]; only a failure to run the engine at all is an
/// `Err`.
pub trait Engine {
    /// Decrypt the whole document at `path`.
    fn decrypt(&self, path: &Path) -> Result<EngineOutput>;

    /// Decrypt `path` and print only the value stored under top-level `key`.
    fn extract(&self, path: &Path, key: &str) -> Result<EngineOutput>;

    /// Set top-level `key` of `path` to the JSON `value`, in place.
    fn set(&self, path: &Path, key: &str, value: &str) -> Result<EngineOutput>;

    /// Encrypt a plaintext JSON `document` as if it were `path`, returning
    /// the ciphertext on stdout. The file itself is not touched.
    fn encrypt(&self, path: &Path, document: &str) -> Result<EngineOutput>;

    /// Encrypt the plaintext file at `path` in place.
    fn encrypt_in_place(&self, path: &Path) -> Result<EngineOutput>;

    /// Open `path` in an interactive editor; returns the exit code.
    fn edit(&self, path: &Path, editor: Option<&str>) -> Result<i32>;

    /// Engine name for display.
    fn name(&self) -> &'static str;
}

/// Tree path expression naming one top-level key, e.g. `["db-password"]`.
pub fn key_path(key: &str) -> String {
    // A JSON string literal is also a valid engine path component.
    let quoted = serde_json::Value::String(key.to_string()).to_string();
    format!("[{}]", quoted)
}

/// Outcome of the tolerant extract call made before set and ensure.
#[derive(Debug)]
pub enum Probe {
    /// A well-formed record is stored under the key
    Found(SecretRecord),
    /// Nothing is stored under the key (or the vault file is absent)
    NotFound,
    /// The engine failed for some other reason
    Failed(EngineError),
}

impl Probe {
    /// Classify an extract result.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if something is stored but is not a
    /// valid record.
    pub fn from_output(output: EngineOutput) -> Result<Self> {
        if output.success() {
            if output.stdout.iter().all(u8::is_ascii_whitespace) {
                return Ok(Probe::NotFound);
            }
            return Ok(Probe::Found(SecretRecord::parse(&output.stdout)?));
        }

        let absent = matches!(
            output.code,
            EXIT_COMPONENT_NOT_FOUND | EXIT_INPUT_UNREADABLE
        ) && output.stdout.is_empty();
        if absent {
            return Ok(Probe::NotFound);
        }

        Ok(Probe::Failed(EngineError::Failed {
            operation: "decrypt",
            code: output.code,
            stderr: output.stderr_text(),
        }))
    }
}
