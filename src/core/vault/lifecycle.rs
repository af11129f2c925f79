//! Vault lifecycle.
//!
//! Bootstraps the age identity, the sops creation rules and an empty
//! encrypted vault document.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::Vault;
use crate::core::constants::{SOPS_CONFIG_FILE, VAULT_FILE};
use crate::core::engine::{self, Engine};
use crate::core::paths::HostEnv;
use crate::error::Result;

/// What `init` had to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Vault file path
    pub vault: PathBuf,
    /// age identity file path
    pub key_file: PathBuf,
    /// A new age identity was generated
    pub created_key: bool,
    /// `.sops.yaml` was written next to the vault
    pub created_rules: bool,
    /// The vault document was created
    pub created_vault: bool,
}

/// sops creation rules encrypting only the `secret` field of each record.
pub fn sops_rules(public_key: &str) -> String {
    format!(
        "# sops configuration file\n\
         creation_rules:\n  \
         - encrypted_regex: '^(secret)$'\n    \
         age: >-\n      \
         {}\n",
        public_key
    )
}

impl<E: Engine> Vault<E> {
    /// Initialize a vault in `dir` (default: the per-user data root).
    ///
    /// Every step is skipped if its output already exists, so running init
    /// twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` if the user directories cannot be determined,
    /// `EngineError` if key generation or encryption fails, and I/O errors
    /// from creating directories and files.
    pub fn init(engine: E, host: &HostEnv, keygen: &str, dir: Option<&Path>) -> Result<(Self, InitReport)> {
        let key_file = host.age_key_file()?;
        let created_key = ensure_identity(keygen, &key_file)?;

        let seed = host.config_home()?.join(SOPS_CONFIG_FILE);
        if !seed.exists() {
            let public_key = engine::read_public_key(&key_file)?;
            create_dir(seed.parent())?;
            fs::write(&seed, sops_rules(&public_key))?;
            debug!(path = %seed.display(), "wrote default sops rules");
        }

        let dir = match dir {
            Some(d) => host.absolutize(d)?,
            None => host.data_home()?,
        };
        fs::create_dir_all(&dir)?;

        let rules = dir.join(SOPS_CONFIG_FILE);
        let created_rules = !rules.exists();
        if created_rules {
            fs::copy(&seed, &rules)?;
        }

        let vault = Vault::open(dir.join(VAULT_FILE), engine);
        let created_vault = !vault.path().exists();
        if created_vault {
            fs::write(vault.path(), "{}")?;
            let encrypted = vault
                .engine()
                .encrypt_in_place(vault.path())
                .and_then(|o| o.check("encrypt"));
            if let Err(e) = encrypted {
                // Never leave a plaintext vault behind.
                if let Err(rm) = fs::remove_file(vault.path()) {
                    warn!(error = %rm, "failed to remove unencrypted vault");
                }
                return Err(e);
            }
            info!(path = %vault.path().display(), "vault created");
        }

        let report = InitReport {
            vault: vault.path().to_path_buf(),
            key_file,
            created_key,
            created_rules,
            created_vault,
        };
        Ok((vault, report))
    }
}

/// Generate the age identity unless it already exists.
fn ensure_identity(keygen: &str, key_file: &Path) -> Result<bool> {
    if key_file.exists() {
        return Ok(false);
    }

    if let Some(parent) = key_file.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(parent, fs::Permissions::from_mode(0o700))?;
        }
    }

    engine::age_keygen(keygen, key_file)?;
    info!(path = %key_file.display(), "age identity generated");
    Ok(true)
}

fn create_dir(dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
