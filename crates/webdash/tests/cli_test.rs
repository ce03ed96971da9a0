//! Integration tests for the `webdash` CLI binary.
//!
//! Everything here runs without a reachable backend: argument parsing,
//! completions, the route guard and local configuration.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

const NOWHERE: &str = "/tmp/webdash-cli-test-nonexistent";

/// The `webdash` binary with config, data and env isolated from the user.
fn webdash_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("webdash");
    cmd.env("HOME", NOWHERE)
        .env("XDG_CONFIG_HOME", NOWHERE)
        .env("XDG_DATA_HOME", NOWHERE)
        .env_remove("WEBDASH_PROFILE")
        .env_remove("WEBDASH_API_URL")
        .env_remove("WEBDASH_OUTPUT")
        .env_remove("WEBDASH_INSECURE")
        .env_remove("WEBDASH_TIMEOUT")
        .env_remove("WEBDASH_PASSWORD");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = webdash_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    webdash_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("WebDynamo")
            .and(predicate::str::contains("users"))
            .and(predicate::str::contains("roles"))
            .and(predicate::str::contains("projects")),
    );
}

#[test]
fn test_version_flag() {
    webdash_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("webdash"));
}

#[test]
fn test_completions_zsh() {
    webdash_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    webdash_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = webdash_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_users_create_requires_role() {
    webdash_cmd()
        .args(["users", "create", "--name", "Ana", "--email", "ana@example.com"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--role"));
}

#[test]
fn test_can_requires_role_or_permission() {
    webdash_cmd().arg("can").assert().code(2);
}

#[test]
fn test_project_tech_must_be_name_icon() {
    webdash_cmd()
        .args(["projects", "create", "--title", "Portal", "--tech", "Rust"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NAME=ICON"));
}

// ── Route guard without a session ───────────────────────────────────

#[test]
fn test_users_list_requires_login() {
    webdash_cmd()
        .args(["users", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_whoami_requires_login() {
    webdash_cmd().arg("whoami").assert().code(3);
}

#[test]
fn test_navigate_dashboard_redirects_to_login() {
    webdash_cmd()
        .args(["navigate", "/dashboard/users/role"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "/auth/login?callbackUrl=%2Fdashboard%2Fusers%2Frole",
        ));
}

#[test]
fn test_navigate_login_page_is_allowed() {
    webdash_cmd()
        .args(["navigate", "/auth/login", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"allowed\": true"));
}

#[test]
fn test_can_without_session_is_denied() {
    webdash_cmd()
        .args(["can", "--role", "admin"])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("no"));
}

#[test]
fn test_logout_without_session() {
    webdash_cmd()
        .arg("logout")
        .assert()
        .success()
        .stderr(predicate::str::contains("Not logged in"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_config_profiles_empty() {
    webdash_cmd()
        .args(["config", "profiles"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_unknown_profile_is_reported() {
    webdash_cmd()
        .args(["--profile", "staging", "users", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_config_use_unknown_profile() {
    webdash_cmd()
        .args(["config", "use", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_set_and_show_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    let run = |args: &[&str]| {
        let mut cmd = webdash_cmd();
        cmd.env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path())
            .env("XDG_DATA_HOME", home.path())
            .args(args);
        cmd
    };

    run(&["config", "set", "email", "ops@example.com"])
        .assert()
        .success();
    run(&["config", "set", "timeout", "soon"]).assert().code(2);

    run(&["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ops@example.com"));
}
