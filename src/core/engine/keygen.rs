//! age key generation.
//!
//! `init` calls the age key generator once to create the identity sops
//! decrypts with, then reads the recipient back from the key file.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::core::constants::AGE_PUBLIC_KEY_PREFIX;
use crate::error::{ConfigError, EngineError, Result};

/// Write a new age identity to `output` using `program`.
///
/// # Errors
///
/// Returns `EngineError::NotInstalled` if `program` is not on PATH, or
/// `EngineError::Failed` if it exits non-zero.
pub fn age_keygen(program: &str, output: &Path) -> Result<()> {
    let binary = which::which(program).map_err(|_| EngineError::NotInstalled {
        program: program.to_string(),
    })?;
    debug!(output = %output.display(), "generating age identity");

    let result = Command::new(binary)
        .arg("-o")
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| EngineError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !result.status.success() {
        return Err(EngineError::Failed {
            operation: "age-keygen",
            code: result.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Public key (`age1...`) recorded in an age key file.
///
/// # Errors
///
/// Returns `ConfigError::NoPublicKey` if the file has no `# public key:` line.
pub fn read_public_key(key_file: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(key_file)?;
    parse_public_key(&contents).ok_or_else(|| {
        ConfigError::NoPublicKey {
            path: key_file.to_path_buf(),
        }
        .into()
    })
}

fn parse_public_key(contents: &str) -> Option<String> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix(AGE_PUBLIC_KEY_PREFIX))
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}
