//! Test support utilities for xsops integration tests.
//!
//! Provides isolated test environments, CLI helpers and a plaintext
//! engine for exercising vault operations without sops.

#![allow(dead_code)]

pub mod commands;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use engine::PlainEngine;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own working dir and home dir. No process-global
/// state is mutated; child processes get explicit env vars and
/// `.current_dir()` so tests can safely run in parallel.
pub struct Test {
    /// Working directory for the command under test
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with a vault initialized in `dir`.
    ///
    /// Needs real `sops` and `age-keygen`; callers skip first.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize vault: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// `XSOPS_DATA_HOME` given to child processes.
    pub fn data_home(&self) -> PathBuf {
        self.home.path().join("data")
    }

    /// `XSOPS_CONFIG_HOME` given to child processes.
    pub fn config_home(&self) -> PathBuf {
        self.home.path().join("config")
    }

    /// `XDG_CONFIG_HOME` given to child processes (sops keeps its age key here).
    pub fn user_config_dir(&self) -> PathBuf {
        self.home.path().join(".config")
    }

    /// age identity file `init` creates.
    pub fn age_key_file(&self) -> PathBuf {
        self.user_config_dir().join("sops").join("age").join("keys.txt")
    }

    /// Vault file for the `.` identifier.
    pub fn cwd_vault(&self) -> PathBuf {
        self.dir.path().join("xsops.secrets.json")
    }

    /// Write `registry.json` with the given aliases.
    pub fn write_registry(&self, aliases: &[(&str, &str)]) {
        let map: serde_json::Map<String, serde_json::Value> = aliases
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        std::fs::create_dir_all(self.config_home()).unwrap();
        std::fs::write(
            self.config_home().join("registry.json"),
            serde_json::to_string_pretty(&map).unwrap(),
        )
        .unwrap();
    }

    /// Write `config.toml`.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(self.config_home()).unwrap();
        std::fs::write(self.config_home().join("config.toml"), contents).unwrap();
    }
}
