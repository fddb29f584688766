//! CLI smoke tests for the flights-server binary
//!
//! Help/version output, configuration validation and a short `--mock` run.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Helper to run the flights-server binary with given arguments
fn run_flights_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_flights-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute flights-server")
}

/// Helper to run the flights-server binary with timeout
async fn run_flights_server_with_timeout(
    args: &[&str],
    cwd: &std::path::Path,
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_flights-server"));
    cmd.args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_flights_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("flights-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_flights_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("flights-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_flights_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Should report an error: {}", stderr);
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_flights_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file not found"),
        "Should mention config file issue: {}",
        stderr
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_flights_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let home = temp_dir.path().to_string_lossy().to_string();
    let config_path = write_config(
        &temp_dir,
        "valid.yaml",
        &format!(
            r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 8087

database:
  url: "sqlite://database/flights.db"

logging:
  default:
    console_level: info
    file: ""
    file_level: info

modules:
  flights:
    supplier_base_url: "http://localhost:9999"
    supplier_timeout_ms: 1000
"#
        ),
    );

    let output = run_flights_server(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Should succeed with valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration check passed"), "{}", stdout);
}

#[test]
fn test_cli_check_rejects_bad_module_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let home = temp_dir.path().to_string_lossy().to_string();
    let config_path = write_config(
        &temp_dir,
        "bad_module.yaml",
        &format!(
            r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 8087

modules:
  flights:
    supplier_timeout_ms: "soon"
"#
        ),
    );

    let output = run_flights_server(&["--config", &config_path, "check"]);
    assert!(!output.status.success(), "Should reject a malformed module section");
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let output = run_flights_server(&["--print-config", "--port", "9123", "--mock"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("9123"), "{}", stdout);
    assert!(stdout.contains("sqlite::memory:"), "{}", stdout);
}

#[tokio::test]
async fn test_cli_run_command_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let home = temp_dir.path().to_string_lossy().to_string();
    let config_path = write_config(
        &temp_dir,
        "run.yaml",
        &format!(
            r#"
server:
  home_dir: "{home}"
  host: "127.0.0.1"
  port: 0

logging:
  default:
    console_level: info
    file: "logs/flights.log"
    file_level: info
"#
        ),
    );

    // Run server with short timeout to test startup
    let result = run_flights_server_with_timeout(
        &["--config", &config_path, "--mock", "run"],
        temp_dir.path(),
        Duration::from_secs(5),
    )
    .await;

    match result {
        // Timeout is expected - server was running
        Err(err) => assert!(
            err.to_string().contains("elapsed"),
            "Server failed to start: {}",
            err
        ),
        Ok(output) => {
            panic!(
                "Server exited early:\nSTDOUT: {}\nSTDERR: {}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
    }
}
