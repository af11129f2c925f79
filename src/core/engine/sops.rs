//! sops engine backend.
//!
//! Runs the `sops` CLI as a subprocess for every operation.
//!
//! ## Requirements
//!
//! - `sops` CLI must be installed
//! - a `.sops.yaml` next to the vault (or above it) selects the recipients
//! - the age identity must be available for decryption

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};

use super::{key_path, Engine, EngineOutput};
use crate::core::constants;
use crate::error::{EngineError, Result};

/// sops engine using the sops CLI
#[derive(Debug, Clone)]
pub struct Sops {
    program: String,
}

impl Sops {
    /// Engine running `program` (a name on PATH or a path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the binary.
    fn binary(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| {
            EngineError::NotInstalled {
                program: self.program.clone(),
            }
            .into()
        })
    }

    /// Command for `path`, run from the vault's directory so sops picks up
    /// the `.sops.yaml` living next to it.
    fn command(&self, path: &Path) -> Result<Command> {
        let mut cmd = Command::new(self.binary()?);
        if let Some(dir) = path.parent().filter(|d| d.is_dir()) {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }

    fn run(&self, mut cmd: Command, stdin: Option<&[u8]>) -> Result<EngineOutput> {
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| EngineError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input).map_err(|source| EngineError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|source| EngineError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let result = EngineOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: output.stderr,
        };
        trace!(
            code = result.code,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "sops finished"
        );
        Ok(result)
    }
}

impl Default for Sops {
    fn default() -> Self {
        Self::new(constants::DEFAULT_ENGINE)
    }
}

impl Engine for Sops {
    fn decrypt(&self, path: &Path) -> Result<EngineOutput> {
        debug!(path = %path.display(), "sops decrypt");
        let mut cmd = self.command(path)?;
        cmd.arg("decrypt").arg(path);
        self.run(cmd, None)
    }

    fn extract(&self, path: &Path, key: &str) -> Result<EngineOutput> {
        debug!(path = %path.display(), key, "sops decrypt --extract");
        let mut cmd = self.command(path)?;
        cmd.args(["decrypt", "--extract", &key_path(key)]).arg(path);
        self.run(cmd, None)
    }

    fn set(&self, path: &Path, key: &str, value: &str) -> Result<EngineOutput> {
        // The value carries the secret, keep it out of the logs.
        debug!(path = %path.display(), key, value = "<redacted>", "sops set");
        let mut cmd = self.command(path)?;
        cmd.arg("set").arg(path).arg(key_path(key)).arg(value);
        self.run(cmd, None)
    }

    fn encrypt(&self, path: &Path, document: &str) -> Result<EngineOutput> {
        debug!(path = %path.display(), len = document.len(), "sops encrypt from stdin");
        let mut cmd = self.command(path)?;
        cmd.args(["encrypt", "--filename-override"]).arg(path);
        self.run(cmd, Some(document.as_bytes()))
    }

    fn encrypt_in_place(&self, path: &Path) -> Result<EngineOutput> {
        debug!(path = %path.display(), "sops encrypt -i");
        let mut cmd = self.command(path)?;
        cmd.args(["encrypt", "-i"]).arg(path);
        self.run(cmd, None)
    }

    fn edit(&self, path: &Path, editor: Option<&str>) -> Result<i32> {
        debug!(path = %path.display(), custom_editor = editor.is_some(), "sops edit");
        let mut cmd = self.command(path)?;
        cmd.arg(path);
        if let Some(editor) = editor {
            cmd.env(constants::env::SOPS_EDITOR, editor);
        }

        let status = cmd.status().map_err(|source| EngineError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        Ok(status.code().unwrap_or(-1))
    }

    fn name(&self) -> &'static str {
        "sops"
    }
}
