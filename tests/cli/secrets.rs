//! End-to-end tests for the secret commands against real sops and age.
//!
//! Each test skips itself when `sops` or `age-keygen` is missing.

use crate::skip_without_sops;
use crate::support::*;
use std::fs;

#[test]
fn test_init_creates_identity_rules_and_vault() {
    skip_without_sops!();
    let t = Test::init();

    assert!(t.age_key_file().exists());
    assert!(t.config_home().join(".sops.yaml").exists());
    assert!(t.dir.path().join(".sops.yaml").exists());

    let vault = fs::read_to_string(t.cwd_vault()).unwrap();
    assert!(vault.contains("\"sops\""));

    // a second init leaves everything alone
    let before = fs::read(t.cwd_vault()).unwrap();
    let output = t.init_cmd();
    assert_success(&output);
    assert_stderr_contains(&output, "vault already exists");
    assert_eq!(fs::read(t.cwd_vault()).unwrap(), before);
}

#[test]
fn test_set_and_get_roundtrip() {
    skip_without_sops!();
    let t = Test::init();

    assert_roundtrip(&t, "db-password", "s3cr3t");

    let vault = fs::read_to_string(t.cwd_vault()).unwrap();
    assert!(!vault.contains("s3cr3t"), "secret stored in plaintext");
    assert!(vault.contains("created_at"));
}

#[test]
fn test_set_reports_created_then_updated() {
    skip_without_sops!();
    let t = Test::init();

    let output = t.set("api-key", "one");
    assert_success(&output);
    assert_stderr_contains(&output, "created");

    let output = t.set("api-key", "two");
    assert_success(&output);
    assert_stderr_contains(&output, "updated");

    assert_eq!(stdout(&t.get("api-key")), "two\n");
}

#[test]
fn test_set_from_stdin_and_get_trim() {
    skip_without_sops!();
    let t = Test::init();

    t.cmd()
        .args(["set", "token", "--stdin"])
        .write_stdin("  abc \n")
        .assert()
        .success();

    assert_eq!(stdout(&t.get("token")), "  abc \n\n");

    let output = t.cmd().args(["get", "token", "--trim"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "abc");
}

#[test]
fn test_set_tags_and_expiry() {
    skip_without_sops!();
    let t = Test::init();

    let output = t
        .cmd()
        .args([
            "set",
            "cert",
            "--value",
            "pem",
            "-t",
            "env=prod,team=core",
            "-E",
            "2030-01-01T00:00:00Z",
        ])
        .output()
        .unwrap();
    assert_success(&output);

    let vault = fs::read_to_string(t.cwd_vault()).unwrap();
    assert!(vault.contains("2030-01-01T00:00:00Z"));
    assert!(vault.contains("\"team\""));
}

#[test]
fn test_get_missing_key() {
    skip_without_sops!();
    let t = Test::init();

    let output = t.get("missing");
    assert_failure(&output);
    assert_stderr_contains(&output, "secret not found");
}

#[test]
fn test_ensure_is_idempotent() {
    skip_without_sops!();
    let t = Test::init();

    let first = t.ensure("session", &["--size", "24", "--trim"]);
    assert_success(&first);
    assert_stderr_contains(&first, "generated");
    assert_eq!(stdout(&first).chars().count(), 24);

    let second = t.ensure("session", &["--size", "64", "--trim"]);
    assert_success(&second);
    assert_eq!(stdout(&second), stdout(&first));
    assert!(!stderr(&second).contains("generated"));
}

#[test]
fn test_ensure_digits_only() {
    skip_without_sops!();
    let t = Test::init();

    let output = t.ensure("pin", &["-s", "16", "-U", "-L", "--no-symbols", "--trim"]);
    assert_success(&output);
    let pin = stdout(&output);
    assert_eq!(pin.len(), 16);
    assert!(pin.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_ls_and_filter() {
    skip_without_sops!();
    let t = Test::init();
    assert_success(&t.set("db-password", "a"));
    assert_success(&t.set("api-key", "b"));

    let output = t.ls(None);
    assert_success(&output);
    assert_eq!(stdout(&output), "db-password\napi-key\n");

    let output = t.ls(Some("db-*"));
    assert_success(&output);
    assert_eq!(stdout(&output), "db-password\n");
}

#[test]
fn test_rm() {
    skip_without_sops!();
    let t = Test::init();
    assert_success(&t.set("api-key", "b"));

    let output = t.rm("api-key");
    assert_success(&output);
    assert_stderr_contains(&output, "removed");
    assert_failure(&t.get("api-key"));
}

#[test]
fn test_rm_absent_leaves_vault_untouched() {
    skip_without_sops!();
    let t = Test::init();
    assert_success(&t.set("api-key", "b"));
    let before = fs::read(t.cwd_vault()).unwrap();

    let output = t.rm("api-key-2");
    assert_success(&output);
    assert_stderr_contains(&output, "does not exist");
    assert_eq!(fs::read(t.cwd_vault()).unwrap(), before);
}
