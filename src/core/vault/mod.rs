//! The primary interface for xsops operations.
//!
//! A [`Vault`] binds a resolved vault path to an encryption engine and
//! provides the secret operations on top of it.

mod lifecycle;
mod secrets;

pub use lifecycle::InitReport;
pub use secrets::{Change, Ensured};

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::engine::{Engine, Probe};
use crate::error::{RecordError, Result};

/// Decrypted vault document: secret name to record, plus engine metadata.
pub type Document = Map<String, Value>;

/// A vault file and the engine that reads and writes it.
pub struct Vault<E> {
    path: PathBuf,
    engine: E,
}

impl<E: std::fmt::Debug> std::fmt::Debug for Vault<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("path", &self.path)
            .field("engine", &self.engine)
            .finish()
    }
}

impl<E: Engine> Vault<E> {
    /// Open the vault at `path`. Nothing is read until an operation runs.
    pub fn open(path: impl Into<PathBuf>, engine: E) -> Self {
        Self {
            path: path.into(),
            engine,
        }
    }

    /// Vault file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Look up `key` without treating absence as an error.
    pub(super) fn probe(&self, key: &str) -> Result<Probe> {
        let output = self.engine.extract(&self.path, key)?;
        let probe = Probe::from_output(output)?;
        debug!(
            key,
            found = matches!(probe, Probe::Found(_)),
            "probed secret"
        );
        Ok(probe)
    }

    /// Decrypt and parse the whole document.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Failed` if decryption fails, or
    /// `RecordError::Document` if the plaintext is not a JSON object.
    pub fn read_document(&self) -> Result<Document> {
        let output = self.engine.decrypt(&self.path)?.check("decrypt")?;
        let document: Document =
            serde_json::from_slice(&output.stdout).map_err(RecordError::Document)?;
        Ok(document)
    }

    /// Decrypt, mutate and re-encrypt the document.
    ///
    /// `mutate` returns whether it changed anything; if not, the file is left
    /// untouched. The vault file is only overwritten once the engine has
    /// produced the complete ciphertext.
    ///
    /// There is no locking: a concurrent writer between the decrypt and the
    /// write is silently overwritten (last writer wins).
    pub fn update_document<F>(&self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut Document) -> bool,
    {
        let mut document = self.read_document()?;
        if !mutate(&mut document) {
            return Ok(false);
        }

        let plaintext = zeroize::Zeroizing::new(serde_json::to_string(&document)?);
        let output = self
            .engine
            .encrypt(&self.path, &plaintext)?
            .check("encrypt")?;
        std::fs::write(&self.path, &output.stdout)?;

        debug!(path = %self.path.display(), bytes = output.stdout.len(), "vault rewritten");
        Ok(true)
    }
}
