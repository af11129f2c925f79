//! Secret operations.
//!
//! get, set, ensure, remove and list on top of the engine.

use chrono::Utc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::Vault;
use crate::core::constants::RESERVED_KEY;
use crate::core::engine::{Engine, Probe};
use crate::core::generate::{self, Charset};
use crate::core::record::{RecordUpdate, SecretRecord};
use crate::error::{EngineError, Error, RecordError, Result};

/// Whether a write created a record or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created,
    Updated,
}

/// Result of [`Vault::ensure`].
#[derive(Debug)]
pub struct Ensured {
    /// The stored secret, existing or freshly generated
    pub secret: Zeroizing<String>,
    /// Whether this call generated and stored it
    pub created: bool,
}

impl<E: Engine> Vault<E> {
    /// Get the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::KeyNotFound` if the key or the vault file is
    /// absent, `EngineError::Failed` for other engine failures, and
    /// `RecordError::Malformed` if the stored value is not a record.
    pub fn record(&self, key: &str) -> Result<SecretRecord> {
        match self.probe(key)? {
            Probe::Found(record) => Ok(record),
            Probe::NotFound => Err(EngineError::KeyNotFound {
                key: key.to_string(),
                path: self.path().to_path_buf(),
            }
            .into()),
            Probe::Failed(e) => Err(e.into()),
        }
    }

    /// Get the secret value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Zeroizing<String>> {
        let record = self.record(key)?;
        if record.is_expired(Utc::now()) {
            warn!(key, "secret has expired");
        }
        Ok(Zeroizing::new(record.secret.clone()))
    }

    /// Create or update the record under `key`.
    ///
    /// A missing key (or a missing vault file) means "create". Existing
    /// records keep every field the update does not mention.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValueMissing` when the resulting record would have an
    /// empty secret (creating without one, or updating a record whose stored
    /// secret is empty), `EngineError::Failed` if the probe fails for a reason other than
    /// absence or if the engine rejects the write.
    pub fn set(&self, key: &str, update: RecordUpdate) -> Result<Change> {
        let prior = match self.probe(key)? {
            Probe::Found(record) => Some(record),
            Probe::NotFound => None,
            Probe::Failed(e) => return Err(e.into()),
        };
        let change = if prior.is_some() {
            Change::Updated
        } else {
            Change::Created
        };

        let record = SecretRecord::merge(key, prior, update, Utc::now())?;
        if record.secret.is_empty() {
            return Err(Error::ValueMissing(key.to_string()));
        }
        self.write_record(key, &record)?;

        info!(key, ?change, "secret stored");
        Ok(change)
    }

    /// Return the secret under `key`, generating and storing one if absent.
    ///
    /// An existing secret is never regenerated or overwritten.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if the key holds something that is
    /// not a record, `RecordError::EmptySecret` if the stored record has an
    /// empty secret, `GenerateError` if no secret can be generated, and
    /// `EngineError::Failed` if the engine fails.
    pub fn ensure(&self, key: &str, size: i64, charset: &Charset) -> Result<Ensured> {
        match self.probe(key)? {
            Probe::Found(record) if record.secret.is_empty() => {
                return Err(RecordError::EmptySecret {
                    key: key.to_string(),
                }
                .into());
            }
            Probe::Found(record) => {
                debug!(key, "secret already exists, leaving it untouched");
                return Ok(Ensured {
                    secret: Zeroizing::new(record.secret.clone()),
                    created: false,
                });
            }
            Probe::Failed(e) => return Err(e.into()),
            Probe::NotFound => {}
        }

        let secret = generate::generate(size, charset)?;
        let update = RecordUpdate {
            secret: Some(secret.clone()),
            ..RecordUpdate::default()
        };
        let record = SecretRecord::create(key, update, Utc::now())?;
        self.write_record(key, &record)?;

        info!(key, "secret generated");
        Ok(Ensured {
            secret,
            created: true,
        })
    }

    /// Remove `key` from the vault.
    ///
    /// Returns `false` (and leaves the file untouched) if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Failed` if the vault cannot be decrypted or
    /// re-encrypted.
    pub fn remove(&self, key: &str) -> Result<bool> {
        if key == RESERVED_KEY {
            warn!(key, "refusing to remove engine metadata");
            return Ok(false);
        }

        let removed = self.update_document(|document| document.shift_remove(key).is_some())?;
        if removed {
            info!(key, "secret removed");
        } else {
            warn!(key, "secret does not exist");
        }
        Ok(removed)
    }

    /// List secret names, optionally filtered by a glob pattern.
    ///
    /// Names come back in document order; the engine metadata key is skipped.
    pub fn list(&self, filter: Option<&str>) -> Result<Vec<String>> {
        let pattern = filter
            .map(|f| {
                glob::Pattern::new(f).map_err(|e| Error::InvalidFilter {
                    pattern: f.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let document = self.read_document()?;
        let keys: Vec<String> = document
            .keys()
            .filter(|k| k.as_str() != RESERVED_KEY)
            .filter(|k| pattern.as_ref().map_or(true, |p| p.matches(k)))
            .cloned()
            .collect();

        debug!(count = keys.len(), filtered = filter.is_some(), "listed secrets");
        Ok(keys)
    }

    fn write_record(&self, key: &str, record: &SecretRecord) -> Result<()> {
        let json = Zeroizing::new(record.to_json()?);
        self.engine
            .set(self.path(), key, &json)?
            .check("set")?;
        Ok(())
    }
}
