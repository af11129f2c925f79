//! Tests for `xsops path` and vault identifier resolution.

use crate::support::*;
use std::path::PathBuf;

fn printed(output: &std::process::Output) -> PathBuf {
    assert_success(output);
    PathBuf::from(stdout(output).trim_end())
}

#[test]
fn test_default_is_independent_of_cwd() {
    let t = Test::new();
    let other = tempfile::TempDir::new().unwrap();

    let here = printed(&t.path("default"));
    let there = printed(
        &t.cmd()
            .current_dir(other.path())
            .args(["--vault", "default", "path"])
            .output()
            .unwrap(),
    );

    assert_eq!(here, t.data_home().join("xsops.secrets.json"));
    assert_eq!(here, there);
}

#[test]
fn test_dot_is_working_directory() {
    let t = Test::new();
    let cwd = t.dir.path().canonicalize().unwrap();

    let path = printed(&t.path("."));
    assert_eq!(path.file_name().unwrap(), "xsops.secrets.json");
    assert_eq!(path.parent().unwrap().canonicalize().unwrap(), cwd);
}

#[test]
fn test_vault_flag_defaults_to_dot() {
    let t = Test::new();

    let explicit = printed(&t.path("."));
    let implicit = printed(&t.cmd().arg("path").output().unwrap());
    assert_eq!(explicit, implicit);
}

#[test]
fn test_vault_from_env() {
    let t = Test::new();

    let path = printed(
        &t.cmd()
            .env("XSOPS_VAULT", "default")
            .arg("path")
            .output()
            .unwrap(),
    );
    assert_eq!(path, t.data_home().join("xsops.secrets.json"));
}

#[test]
fn test_alias_verbatim() {
    let t = Test::new();
    let team = t.home.path().join("shared").join("team.json");
    t.write_registry(&[("team", team.to_str().unwrap())]);

    assert_eq!(printed(&t.path("team")), team);
    // lookup falls back to a case-insensitive match
    assert_eq!(printed(&t.path("TEAM")), team);
}

#[test]
fn test_alias_shadows_path() {
    let t = Test::new();
    let target = t.home.path().join("elsewhere.json");
    t.write_registry(&[("local.json", target.to_str().unwrap())]);

    assert_eq!(printed(&t.path("local.json")), target);
}

#[test]
fn test_relative_path_absolutized() {
    let t = Test::new();
    let cwd = t.dir.path().canonicalize().unwrap();

    let path = printed(&t.path("secrets/app.json"));
    assert!(path.is_absolute());
    assert!(path.ends_with("secrets/app.json"));
    assert_eq!(
        path.parent().unwrap().parent().unwrap().canonicalize().unwrap(),
        cwd
    );
}

#[cfg(unix)]
#[test]
fn test_file_uri() {
    let t = Test::new();

    assert_eq!(
        printed(&t.path("file:///srv/team%20vault.json")),
        PathBuf::from("/srv/team vault.json")
    );
    assert_eq!(
        printed(&t.path("xsops:///srv/app.json")),
        PathBuf::from("/srv/app.json")
    );
}

#[test]
fn test_absolute_path_unchanged() {
    let t = Test::new();
    let target = t.home.path().join("abs.json");

    assert_eq!(printed(&t.path(target.to_str().unwrap())), target);
}
