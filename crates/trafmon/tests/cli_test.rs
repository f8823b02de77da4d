//! Integration tests for the `trafmon` CLI binary.
//!
//! Argument parsing, help, completions and exit codes run without a
//! backend; the list and action tests point `--url` at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `trafmon` binary with env isolation.
///
/// Clears all `TRAFMON_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn trafmon_cmd() -> assert_cmd::Command {
    trafmon_cmd_in(Path::new("/tmp/trafmon-cli-test-nonexistent"))
}

/// Like [`trafmon_cmd`], with `home` as both home and config directory.
fn trafmon_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("trafmon");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("TRAFMON_PROFILE")
        .env_remove("TRAFMON_URL")
        .env_remove("TRAFMON_OUTPUT")
        .env_remove("TRAFMON_INSECURE")
        .env_remove("TRAFMON_TIMEOUT");
    cmd
}

/// Run `trafmon --url <server> <args>` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut argv = vec!["--url".to_owned(), server.uri()];
    argv.extend(args.iter().map(|a| (*a).to_owned()));
    tokio::task::spawn_blocking(move || trafmon_cmd().args(argv).output().unwrap())
        .await
        .unwrap()
}

async fn mount_get(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = trafmon_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!("{}{}", stdout(&output), stderr(&output));
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    trafmon_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("traffic")
            .and(predicate::str::contains("interfaces"))
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("packets"))
            .and(predicate::str::contains("users"))
            .and(predicate::str::contains("snapshot")),
    );
}

#[test]
fn test_version_flag() {
    trafmon_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trafmon"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    trafmon_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    trafmon_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    trafmon_cmd().arg("foobar").assert().code(2);
}

#[test]
fn test_invalid_output_format() {
    trafmon_cmd()
        .args(["--output", "invalid", "traffic", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("possible values"));
}

#[test]
fn test_toggle_needs_a_numeric_id() {
    trafmon_cmd()
        .args(["interfaces", "toggle", "eth0"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    trafmon_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("refresh_interval = 5"));
}

#[test]
fn test_config_path() {
    trafmon_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_unknown_profile() {
    trafmon_cmd()
        .args(["--profile", "nope", "traffic", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_from_config_file_selects_backend() {
    let server = MockServer::start().await;
    mount_get(&server, "/api/users", json!([{ "id": 8, "name": "eve" }])).await;

    let home = tempfile::tempdir().unwrap();
    let path_out = trafmon_cmd_in(home.path())
        .args(["config", "path"])
        .output()
        .unwrap();
    let config_file = std::path::PathBuf::from(stdout(&path_out).trim());
    assert!(config_file.starts_with(home.path()), "{}", config_file.display());

    std::fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    std::fs::write(
        &config_file,
        format!(
            "default_profile = \"lab\"\n\n[defaults]\noutput = \"plain\"\n\n[profiles.lab]\nurl = \"{}\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let home_path = home.path().to_owned();
    let output = tokio::task::spawn_blocking(move || {
        trafmon_cmd_in(&home_path)
            .args(["users", "list"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "8");

    let shown = trafmon_cmd_in(home.path())
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(stdout(&shown).contains("[profiles.lab]"), "{}", stdout(&shown));
}

// ── Backend errors ──────────────────────────────────────────────────

#[test]
fn test_connection_refused_exits_7() {
    trafmon_cmd()
        .args(["--url", "http://127.0.0.1:1", "interfaces", "list"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not connect"));
}

#[test]
fn test_delete_without_terminal_needs_yes() {
    // Refused before any request is sent, so no backend is needed.
    trafmon_cmd()
        .args(["--url", "http://127.0.0.1:1", "users", "delete", "3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_resolve_missing_alert_exits_4() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/alerts/99/resolve"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "no such alert" })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["alerts", "resolve", "99"]).await;
    assert_eq!(output.status.code(), Some(4), "stderr:\n{}", stderr(&output));
    assert!(stderr(&output).contains("alerts list"));
}

// ── Backend-backed commands ─────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_interfaces_list_json() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/api/interfaces",
        json!([
            { "id": 1, "name": "eth0", "ip_address": "10.0.0.1", "mac_address": "aa:bb", "status": "up", "is_monitored": true },
            { "id": 2, "name": "wlan0", "is_monitored": false }
        ]),
    )
    .await;

    let output = run_against(&server, &["-o", "json", "interfaces", "list"]).await;
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed[0]["name"], "eth0");
    assert_eq!(parsed[1]["is_monitored"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_users_list_plain_prints_ids() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/api/users",
        json!([
            { "id": 3, "name": "ada", "role": "admin" },
            { "id": 5, "name": "bob" }
        ]),
    )
    .await;

    let output = run_against(&server, &["-o", "plain", "users", "list"]).await;
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "3\n5");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_protocols_table() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/api/traffic",
        json!([
            { "timestamp": "2024-06-15T10:30:00", "incoming_bytes": 10, "outgoing_bytes": 20, "protocol": "TCP" },
            { "timestamp": "2024-06-15T10:30:05", "incoming_bytes": 30, "outgoing_bytes": 5, "protocol": "UDP" },
            { "timestamp": "2024-06-15T10:30:10", "incoming_bytes": 1, "outgoing_bytes": 1, "protocol": "tcp" }
        ]),
    )
    .await;

    let output = run_against(&server, &["-o", "plain", "traffic", "protocols"]).await;
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "TCP 1\nUDP 1\nICMP 0\nOther 1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_sends_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_get(&server, "/api/users", json!([])).await;

    let output = run_against(&server, &["--yes", "users", "delete", "3"]).await;
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert!(stderr(&output).contains("User 3 deleted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_snapshot_html_has_every_table_body() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/api/interfaces",
        json!([{ "id": 1, "name": "eth0", "is_monitored": false }]),
    )
    .await;
    mount_get(
        &server,
        "/api/alerts",
        json!([{ "id": 4, "timestamp": "2024-06-15T10:30:00", "alert_type": "<scan>", "is_resolved": false }]),
    )
    .await;
    mount_get(&server, "/api/packets", json!([])).await;
    mount_get(&server, "/api/users", json!([])).await;

    let output = run_against(&server, &["snapshot", "--html"]).await;
    assert!(output.status.success(), "stderr:\n{}", stderr(&output));

    let html = stdout(&output);
    for id in ["interfacesTable", "alertsTable", "packetsTable", "usersTable"] {
        assert!(html.contains(&format!("<tbody id=\"{id}\">")), "missing {id}:\n{html}");
    }
    assert!(html.contains("Start Monitoring"));
    assert!(html.contains("&lt;scan&gt;"));
    assert!(html.contains(r#"data-action="resolve-alert" data-id="4""#));
}
