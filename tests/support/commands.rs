//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an xsops command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME (and USERPROFILE) set to the temporary home directory
    /// - XSOPS_DATA_HOME, XSOPS_CONFIG_HOME and XDG_CONFIG_HOME under it
    /// - XSOPS_VAULT and XSOPS_LOG removed, NO_COLOR set
    /// - Current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("xsops").expect("failed to find xsops binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XSOPS_DATA_HOME", self.data_home());
        cmd.env("XSOPS_CONFIG_HOME", self.config_home());
        cmd.env("XDG_CONFIG_HOME", self.user_config_dir());
        cmd.env("SOPS_AGE_KEY_FILE", self.age_key_file());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("XDG_DATA_HOME");
        cmd.env_remove("APPDATA");
        cmd.env_remove("XSOPS_VAULT");
        cmd.env_remove("XSOPS_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `xsops init .` command.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .args(["init", "."])
            .output()
            .expect("failed to run xsops init")
    }

    /// Shortcut for `xsops set KEY --value VAL` command.
    pub fn set(&self, key: &str, val: &str) -> Output {
        self.cmd()
            .args(["set", key, "--value", val])
            .output()
            .expect("failed to run xsops set")
    }

    /// Shortcut for `xsops get` command.
    pub fn get(&self, key: &str) -> Output {
        self.cmd()
            .args(["get", key])
            .output()
            .expect("failed to run xsops get")
    }

    /// Shortcut for `xsops ensure` command.
    pub fn ensure(&self, key: &str, args: &[&str]) -> Output {
        self.cmd()
            .arg("ensure")
            .arg(key)
            .args(args)
            .output()
            .expect("failed to run xsops ensure")
    }

    /// Shortcut for `xsops rm` command.
    pub fn rm(&self, key: &str) -> Output {
        self.cmd()
            .args(["rm", key])
            .output()
            .expect("failed to run xsops rm")
    }

    /// Shortcut for `xsops ls` command.
    pub fn ls(&self, filter: Option<&str>) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("ls");
        if let Some(f) = filter {
            cmd.args(["--filter", f]);
        }
        cmd.output().expect("failed to run xsops ls")
    }

    /// Shortcut for `xsops path` with an explicit `--vault`.
    pub fn path(&self, vault: &str) -> Output {
        self.cmd()
            .args(["--vault", vault, "path"])
            .output()
            .expect("failed to run xsops path")
    }
}
