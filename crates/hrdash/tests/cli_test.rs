//! Integration tests for the `hrdash` CLI binary.
//!
//! Argument parsing, config handling and error exits run without a
//! server. The session tests drive the binary against a wiremock API.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `hrdash` binary with env isolation.
///
/// Config and session files live under `home` so tests never touch the
/// user's real configuration.
fn hrdash_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hrdash");
    cmd.env("HRDASH_CONFIG_DIR", home.join("config"))
        .env("HRDASH_DATA_DIR", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("HRDASH_PROFILE")
        .env_remove("HRDASH_BASE_URL")
        .env_remove("HRDASH_OUTPUT")
        .env_remove("HRDASH_TIMEOUT")
        .env_remove("RUST_LOG");
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
    let home = TempDir::new().unwrap();
    let output = hrdash_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("departments")
            .and(predicate::str::contains("employees"))
            .and(predicate::str::contains("projects"))
            .and(predicate::str::contains("dependents")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hrdash"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    let output = hrdash_cmd(home.path()).arg("payroll").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("payroll"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .args(["--output", "xml", "departments", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_whoami_requires_login() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .arg("whoami")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_negative_page_is_rejected_locally() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:9", "departments", "list", "--page", "-1"])
        .assert()
        .code(2);
}

#[test]
fn test_delete_needs_yes_without_terminal() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:9", "projects", "delete", "4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_unknown_profile() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .args(["-p", "staging", "departments", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("staging"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_without_file() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path()).args(["config", "show"]).assert().success();
}

#[test]
fn test_config_init_set_and_use() {
    let home = TempDir::new().unwrap();

    hrdash_cmd(home.path())
        .args(["config", "init", "--name", "work", "--url", "https://hr.example.com/api"])
        .assert()
        .success();
    assert!(home.path().join("config/config.toml").exists());

    hrdash_cmd(home.path())
        .args(["config", "set", "defaults.output", "json"])
        .assert()
        .success();
    hrdash_cmd(home.path())
        .args(["config", "set", "defaults.output", "xml"])
        .assert()
        .code(2);
    hrdash_cmd(home.path())
        .args(["config", "set", "colour", "never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("colour"));

    hrdash_cmd(home.path())
        .args(["-o", "plain", "config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("work"));

    hrdash_cmd(home.path())
        .args(["config", "use", "staging"])
        .assert()
        .code(2);
    hrdash_cmd(home.path())
        .args(["config", "use", "default"])
        .assert()
        .success();

    // defaults.output = json now applies without a flag.
    let output = hrdash_cmd(home.path()).args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["default_profile"], "default");
    assert_eq!(shown["profiles"]["work"]["base_url"], "https://hr.example.com/api");
}

#[test]
fn test_config_set_rejects_bad_url() {
    let home = TempDir::new().unwrap();
    hrdash_cmd(home.path())
        .args(["config", "set", "base_url", "ftp://hr.example.com"])
        .assert()
        .code(2);
}

// ── Session against a mock API ──────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_list_departments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": { "fullName": "Ada Lovelace", "email": "ada@example.com", "role": "ADMIN" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/departments"))
        .and(query_param("pageNumber", "0"))
        .and(header("Authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "departments": [{ "dnum": 5, "dname": "Research" }],
            "page_number": 0,
            "page_size": 10,
            "totalPages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let base_url = server.uri();

    let output = tokio::task::spawn_blocking(move || {
        hrdash_cmd(home.path())
            .args(["--base-url", &base_url, "login", "--email", "ada@example.com", "--password-stdin"])
            .write_stdin("hunter22!\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("Logged in as Ada Lovelace"));

        hrdash_cmd(home.path())
            .args(["--base-url", &base_url, "whoami"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ada@example.com"));

        let output = hrdash_cmd(home.path())
            .args(["--base-url", &base_url, "-o", "json", "departments", "list"])
            .output()
            .unwrap();
        drop(home);
        output
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let page: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(page["departments"][0]["dname"], "Research");
    assert_eq!(page["totalPages"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        hrdash_cmd(home.path())
            .args(["--base-url", &base_url, "login", "--email", "ada@example.com", "--password-stdin"])
            .write_stdin("wrong-pass\n")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid credentials"));
    })
    .await
    .unwrap();
}
