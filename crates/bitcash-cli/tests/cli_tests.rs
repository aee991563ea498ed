//! CLI integration tests for bitcash
//!
//! Tests command parsing, offline failures, and config handling. Every run
//! gets its own home directory and an unreachable RPC endpoint.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const VARS: &[&str] = &[
    "PRIVATE_KEY",
    "PERMISSION",
    "CHAIN_ID",
    "ORACLE_CONTRACT",
    "TOKEN_CONTRACT",
    "DEBUG",
    "RUST_LOG",
];

/// Helper to run the CLI with arguments in `home`
fn run_in(home: &Path, args: &[&str], vars: &[(&str, &str)]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bitcash"));
    for var in VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home)
        .env("RPC_ENDPOINT", "http://127.0.0.1:9")
        .current_dir(home)
        .envs(vars.iter().copied())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn run_bitcash(args: &[&str]) -> std::process::Output {
    let home = TempDir::new().unwrap();
    run_in(home.path(), args, &[])
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ==================== Help Tests ====================

#[test]
fn test_cli_help() {
    let output = run_bitcash(&["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("bitcash"));
    assert!(out.contains("oracle"));
    assert!(out.contains("token"));
    assert!(out.contains("config"));
}

#[test]
fn test_cli_oracle_help() {
    let output = run_bitcash(&["oracle", "--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["register", "write", "claim", "new-pair", "stats", "pairs", "vote-bounty", "write-hash"] {
        assert!(out.contains(command), "missing {command}");
    }
    assert!(out.contains("delete-pair"));
    assert!(out.contains("get-scopes"));
}

#[test]
fn test_cli_token_help() {
    let output = run_bitcash(&["token", "--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("create"));
    assert!(out.contains("list"));
}

#[test]
fn test_table_help_lists_tables() {
    let output = run_bitcash(&["oracle", "table", "--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Available tables: "));
}

// ==================== Argument Validation Tests ====================

#[test]
fn test_invalid_owner_name() {
    let output = run_bitcash(&["oracle", "register", "--owner", "Not_A_Name"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_value() {
    let output = run_bitcash(&["oracle", "write", "--owner", "alice", "--pair", "btcusd", "--value", "lots"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_required_flag() {
    let output = run_bitcash(&["token", "create", "--issuer", "alice", "--symbol", "BTC"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--max-supply"));
}

// ==================== Oracle Tests ====================

#[test]
fn test_table_without_name() {
    let output = run_bitcash(&["oracle", "table"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Error: Table name is required. Please specify a table name."));
    let out = stdout(&output);
    assert!(out.starts_with("Available tables: "));
    assert!(out.contains("datapoints"));
    assert!(out.contains("stats"));
}

#[test]
fn test_get_scopes_without_name() {
    let output = run_bitcash(&["oracle", "get-scopes"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Available tables: "));
}

#[test]
fn test_table_unknown_name() {
    let output = run_bitcash(&["oracle", "table", "nosuch"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Error reading table data: Table 'nosuch' does not exist in contract"));
}

#[test]
fn test_register_without_key() {
    let output = run_bitcash(&["oracle", "register", "--owner", "alice"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Error registering as oracle: Private key is required"));
}

#[test]
fn test_register_without_key_json() {
    let output = run_bitcash(&["--json", "oracle", "register", "--owner", "alice"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "Private key is required");
}

#[test]
fn test_stats_unreachable_node() {
    let output = run_bitcash(&["oracle", "stats", "--owner", "alice"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Error getting oracle stats:"));
}

#[test]
fn test_invalid_chain_id_env() {
    let home = TempDir::new().unwrap();
    let output = run_in(home.path(), &["oracle", "pairs"], &[("CHAIN_ID", "zz")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("CHAIN_ID"));
}

// ==================== Token Tests ====================

#[test]
fn test_token_create_without_key() {
    let output = run_bitcash(&["token", "create", "--issuer", "alice", "--symbol", "BTC", "--max-supply", "21000000"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Error creating token: Private key is required"));
}

// ==================== Config Tests ====================

#[test]
fn test_config_show_defaults() {
    let output = run_bitcash(&["config", "--show"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("RPC URL: "));
    assert!(out.contains("Permission: active"));
}

#[test]
fn test_config_set_and_show() {
    let home = TempDir::new().unwrap();
    let output = run_in(
        home.path(),
        &["config", "--set-rpc", "http://localhost:8888", "--set-permission", "oracle"],
        &[],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration saved"));
    assert!(home.path().join(".bitcash/config.toml").exists());

    let output = run_in(home.path(), &["--json", "config", "--show"], &[]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["rpc_url"], "http://localhost:8888");
    assert_eq!(value["permission"], "oracle");
}

#[test]
fn test_config_rejects_bad_chain_id() {
    let output = run_bitcash(&["config", "--set-chain-id", "1234"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_garbage_config_file() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".bitcash")).unwrap();
    std::fs::write(home.path().join(".bitcash/config.toml"), "rpc_url = [unterminated").unwrap();

    let output = run_in(home.path(), &["config", "--show"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Config error"));
}
