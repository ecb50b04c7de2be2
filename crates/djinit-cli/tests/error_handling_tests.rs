//! Tests for error messages, suggestions and exit codes.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn djinit(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("djinit").unwrap();
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env("HOME", temp.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_all_features_conflict_is_user_error() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["new", "shop", "--all-features", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("api_docs"))
        .stderr(predicate::str::contains("spectacular"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!temp.path().join("shop").exists());
}

#[test]
fn test_conflicting_features_is_user_error() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["resolve", "--features", "spectacular,api_docs"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("conflict"));
}

#[test]
fn test_unknown_feature_is_not_found() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["new", "shop", "--features", "graphql", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("graphql"))
        .stderr(predicate::str::contains("djinit list"));
}

#[test]
fn test_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["new", "my-site", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("my-site"));
}

#[test]
fn test_reserved_project_name() {
    let temp = TempDir::new().unwrap();
    djinit(&temp).args(["new", "django", "-y"]).assert().code(2);
}

#[test]
fn test_app_equal_to_project_collides() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["new", "shop", "--app", "shop", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--app"));
}

#[test]
fn test_existing_project_needs_force() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("shop")).unwrap();
    fs::write(temp.path().join("shop/keep.txt"), "mine").unwrap();

    djinit(&temp)
        .args(["new", "shop", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    assert!(temp.path().join("shop/keep.txt").exists());

    djinit(&temp).args(["new", "shop", "-y", "--force"]).assert().success();
    assert!(!temp.path().join("shop/keep.txt").exists());
    assert!(temp.path().join("shop/manage.py").exists());
}

#[test]
fn test_minimal_conflicts_with_features() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["new", "shop", "--minimal", "--features", "drf"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_explicit_config_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["--config", "nope.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn test_broken_catalog_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .env("DJINIT__CATALOG__PATH", temp.path().join("missing"))
        .args(["list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("catalog.path"));
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["config", "get", "defaults.language"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_verbose_hint_shown_without_verbose() {
    let temp = TempDir::new().unwrap();
    djinit(&temp)
        .args(["new", "shop", "--features", "nope", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--verbose"));
}
