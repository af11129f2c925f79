//! Tests for error reporting and global CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("Usage"));
    assert!(out.contains("ensure"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xsops"));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "_xsops");
}

#[test]
fn test_completions_zsh_and_fish() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef xsops"));
    t.cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c xsops"));
}

#[test]
fn test_value_missing_is_terse_by_default() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["set", "api-key", "--env", "XSOPS_TEST_SURELY_UNSET"])
        .env_remove("XSOPS_TEST_SURELY_UNSET")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "no secret value supplied");
    assert!(!stderr(&output).contains("api-key"));
}

#[test]
fn test_debug_shows_details_and_hint() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--debug", "set", "api-key", "--env", "XSOPS_TEST_SURELY_UNSET"])
        .env_remove("XSOPS_TEST_SURELY_UNSET")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "no secret value supplied for 'api-key'");
    assert_stderr_contains(&output, "use --value, --stdin, --file or --env");
}

#[test]
fn test_missing_engine() {
    let t = Test::new();
    t.write_config("[engine]\nprogram = \"xsops-no-such-engine\"\n");

    let output = t.get("db-password");
    assert_failure(&output);
    assert_stderr_contains(&output, "encryption engine not installed");

    let output = t.cmd().args(["-d", "get", "db-password"]).output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "'xsops-no-such-engine' not found in PATH");
    assert_stderr_contains(&output, "install sops and age");
}

#[test]
fn test_malformed_config() {
    let t = Test::new();
    t.write_config("[engine\n");

    let output = t.get("db-password");
    assert_failure(&output);
    assert_stderr_contains(&output, "could not read configuration");
}

#[test]
fn test_malformed_registry() {
    let t = Test::new();
    std::fs::create_dir_all(t.config_home()).unwrap();
    std::fs::write(t.config_home().join("registry.json"), "not json").unwrap();

    let output = t.path(".");
    assert_failure(&output);
    assert_stderr_contains(&output, "could not read alias registry");
}

#[test]
fn test_invalid_expiry_rejected_by_parser() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["set", "k", "--value", "v", "--expires-at", "tomorrow"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "RFC 3339");
}

#[test]
fn test_ensure_size_out_of_range_rejected_by_parser() {
    let t = Test::new();

    let output = t.ensure("k", &["--size", "9223372036854775807"]);
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(2));
    assert_stderr_contains(&output, "--size");
}

#[test]
fn test_log_filter_from_env() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("XSOPS_LOG", "xsops=debug")
        .args(["--vault", "default", "path"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "resolved vault");
}
