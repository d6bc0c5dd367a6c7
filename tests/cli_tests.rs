//! CLI integration tests for campaign-server
//!
//! Runs the built binary for help output, `init` scaffolding and
//! `config --validate`.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SECRET: &str = "cli-test-secret-that-is-long-enough-0123456789";

fn campaign_server(args: &[&str], dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_campaign-server"));
    cmd.args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env_remove("JWT_SECRET")
        .env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str], dir: &Path) -> Output {
    campaign_server(args, dir)
        .output()
        .expect("Failed to execute campaign-server")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--help"], dir.path());

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Campaign Desk"));
    assert!(text.contains("Usage"));
    assert!(text.contains("init"));
    assert!(text.contains("config"));
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--version"], dir.path());

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_scaffolds_project() {
    let dir = TempDir::new().unwrap();
    let output = run(&["init", "--port", "4100"], dir.path());

    assert!(output.status.success(), "{}", stdout(&output));
    let toml = fs::read_to_string(dir.path().join("campaign.toml")).unwrap();
    assert!(toml.contains("port = 4100"));
    assert!(dir.path().join(".env.example").exists());
    assert!(dir.path().join(".gitignore").exists());
    assert!(dir.path().join("data").is_dir());
}

#[test]
fn test_init_twice_without_force_fails() {
    let dir = TempDir::new().unwrap();
    assert!(run(&["init"], dir.path()).status.success());

    let second = run(&["init"], dir.path());
    assert!(!second.status.success());

    let forced = run(&["init", "--force"], dir.path());
    assert!(forced.status.success());
}

#[test]
fn test_config_validate_requires_jwt_secret() {
    let dir = TempDir::new().unwrap();
    assert!(run(&["init"], dir.path()).status.success());

    let missing = run(&["config", "--validate"], dir.path());
    assert!(!missing.status.success());

    let short = campaign_server(&["config", "--validate"], dir.path())
        .env("JWT_SECRET", "too-short")
        .output()
        .unwrap();
    assert!(!short.status.success());

    let valid = campaign_server(&["config", "--validate", "--full"], dir.path())
        .env("JWT_SECRET", SECRET)
        .output()
        .unwrap();
    assert!(valid.status.success());
    let text = stdout(&valid);
    assert!(text.contains("Configuration is valid"));
    assert!(text.contains("campaign-desk-web"));
    // the secret itself is never printed
    assert!(!text.contains(SECRET));
}

#[test]
fn test_serve_without_config_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--config", "missing.toml"], dir.path());

    assert!(!output.status.success());
}
