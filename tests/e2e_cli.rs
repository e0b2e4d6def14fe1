//! CLI end-to-end tests
//!
//! Tests for the sendarr command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEAT_URL: &str = "https://www.imdb.com/title/tt0113277/";

/// Get a command for the sendarr binary
#[allow(deprecated)]
fn sendarr_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sendarr").unwrap();
    cmd.env_remove("SENDARR_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn page(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/pages")
        .join(name)
}

fn save_settings(config: &Path, url: &str) {
    sendarr_cmd()
        .arg("--config")
        .arg(config)
        .args([
            "settings",
            "save",
            "--url",
            url,
            "--api-key",
            "abc123",
            "--root-folder",
            "/movies",
            "--profiles",
            "Any:1\nHD-1080p:4",
            "--default-profile",
            "4",
        ])
        .assert()
        .success();
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = sendarr_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = sendarr_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sendarr"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = sendarr_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sendarr"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = sendarr_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_send_help() {
    let mut cmd = sendarr_cmd();
    cmd.args(["send", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Send the movie"));
}

#[test]
fn test_cli_extract_saved_page() {
    let mut cmd = sendarr_cmd();
    cmd.args(["extract", HEAT_URL, "--html"])
        .arg(page("heat.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Heat"))
        .stdout(predicate::str::contains("Year: 1995"))
        .stdout(predicate::str::contains("IMDb: tt0113277"));
}

#[test]
fn test_cli_extract_json() {
    let mut cmd = sendarr_cmd();
    cmd.args(["extract", HEAT_URL, "--json", "--html"])
        .arg(page("heat.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"imdbId\": \"tt0113277\""));
}

#[test]
fn test_cli_extract_tv_page() {
    let mut cmd = sendarr_cmd();
    cmd.args(["extract", "https://www.imdb.com/title/tt0306414/", "--html"])
        .arg(page("the_wire.html"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Detected TV content"));
}

#[test]
fn test_cli_init_creates_settings() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.toml");

    sendarr_cmd()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized settings"));
    assert!(fs::read_to_string(&config)
        .unwrap()
        .contains("qualityProfiles = []"));

    sendarr_cmd()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_cli_settings_save_requires_api_key() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.toml");

    sendarr_cmd()
        .arg("--config")
        .arg(&config)
        .args([
            "settings",
            "save",
            "--url",
            "http://radarr:7878",
            "--root-folder",
            "/movies",
            "--profiles",
            "Any:1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Radarr URL, API key, and root folder are all required.",
        ));
    assert!(!config.exists());
}

#[test]
fn test_cli_settings_save_then_show() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.toml");
    save_settings(&config, "http://radarr:7878/");

    sendarr_cmd()
        .arg("--config")
        .arg(&config)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Radarr URL: http://radarr:7878"))
        .stdout(predicate::str::contains("HD-1080p:4"))
        .stdout(predicate::str::contains("Default profile: HD-1080p (4)"))
        .stdout(predicate::str::contains("abc123").not());
}

#[test]
fn test_cli_send_without_settings() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.toml");

    sendarr_cmd()
        .arg("--config")
        .arg(&config)
        .args(["send", HEAT_URL, "--no-notify", "--html"])
        .arg(page("heat.html"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Set your Radarr URL, API key, and root folder in the settings.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_send_adds_movie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/movie/lookup/imdb"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"title": "Heat", "tmdbId": 949, "year": 1995}])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v3/movie"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1, "title": "Heat"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let config = dir.path().join("settings.toml");
    save_settings(&config, &server.uri());

    sendarr_cmd()
        .arg("--config")
        .arg(&config)
        .args(["send", HEAT_URL, "--no-notify", "--html"])
        .arg(page("heat.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie: Heat"))
        .stdout(predicate::str::contains("✓ Movie successfully added to Radarr."));
}
