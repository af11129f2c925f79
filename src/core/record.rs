//! Secret record model.
//!
//! Each key of a vault document maps to a [`SecretRecord`]:
//!
//! ```json
//! {
//!   "secret": "s3cr3t",
//!   "expires_at": "2030-01-01T00:00:00Z",
//!   "tags": { "env": "prod" },
//!   "enabled": true,
//!   "created_at": "2025-06-01T12:00:00Z",
//!   "updated_at": "2025-06-02T08:30:00Z"
//! }
//! ```
//!
//! `expires_at`, `tags` and `updated_at` are omitted when unset.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, RecordError, Result};

/// Structured value stored under a vault key.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// The sensitive payload
    pub secret: String,

    /// Optional expiry; `None` means the secret never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Optional free-form labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,

    /// Persisted as-is; xsops does not enforce it
    #[serde(default = "enabled_default")]
    pub enabled: bool,

    /// Set once, when the record is first written
    pub created_at: DateTime<Utc>,

    /// Refreshed on every update after creation
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_updated_at"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

fn enabled_default() -> bool {
    true
}

/// Older vaults store a never-updated timestamp as `0001-01-01T00:00:00Z`.
fn deserialize_updated_at<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|t| t.year() > 1))
}

/// Field changes requested by a write.
///
/// `None` means "leave as is" for an existing record and "unset" for a new one.
#[derive(Default)]
pub struct RecordUpdate {
    pub secret: Option<Zeroizing<String>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub tags: Option<BTreeMap<String, String>>,
}

impl RecordUpdate {
    /// Update carrying only a new secret value.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(Zeroizing::new(secret.into())),
            ..Self::default()
        }
    }

    fn take_secret(&mut self) -> Option<Zeroizing<String>> {
        self.secret.take().filter(|s| !s.is_empty())
    }
}

impl fmt::Debug for RecordUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordUpdate")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("tags", &self.tags)
            .finish()
    }
}

impl SecretRecord {
    /// Parse a record from the bytes stored under a key.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Malformed` if the bytes are not a valid record.
    pub fn parse(bytes: &[u8]) -> std::result::Result<Self, RecordError> {
        serde_json::from_slice(bytes).map_err(RecordError::Malformed)
    }

    /// Compact JSON form handed to the encryption engine.
    pub fn to_json(&self) -> std::result::Result<String, RecordError> {
        serde_json::to_string(self).map_err(RecordError::Serialize)
    }

    /// Build a fresh record for `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ValueMissing` if the update carries no non-empty secret.
    pub fn create(key: &str, mut update: RecordUpdate, now: DateTime<Utc>) -> Result<Self> {
        let secret = update
            .take_secret()
            .ok_or_else(|| Error::ValueMissing(key.to_string()))?;

        Ok(Self {
            secret: secret.to_string(),
            expires_at: update.expires_at,
            tags: update.tags,
            enabled: true,
            created_at: now,
            updated_at: None,
        })
    }

    /// Apply an update to an existing record.
    ///
    /// Only fields present in `update` are replaced; tags are replaced as a
    /// whole. `updated_at` is always refreshed, `created_at` and `enabled`
    /// are never touched.
    pub fn apply(&mut self, mut update: RecordUpdate, now: DateTime<Utc>) {
        if let Some(secret) = update.take_secret() {
            self.secret.zeroize();
            self.secret = secret.to_string();
        }
        if let Some(expires_at) = update.expires_at {
            self.expires_at = Some(expires_at);
        }
        if let Some(tags) = update.tags.take() {
            self.tags = Some(tags);
        }
        self.updated_at = Some(now);
    }

    /// Record to persist for a write, given what is already stored.
    pub fn merge(
        key: &str,
        prior: Option<SecretRecord>,
        update: RecordUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        match prior {
            Some(mut record) => {
                record.apply(update, now);
                Ok(record)
            }
            None => Self::create(key, update, now),
        }
    }

    /// Secret with surrounding whitespace removed; the stored value is unchanged.
    pub fn trimmed_secret(&self) -> &str {
        self.secret.trim()
    }

    /// Whether `expires_at` is set and not after `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|t| t <= now).unwrap_or(false)
    }
}

impl Drop for SecretRecord {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRecord")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("tags", &self.tags)
            .field("enabled", &self.enabled)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
