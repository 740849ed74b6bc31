use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const QUOTES: &str = r#"{"Exchange":"Binance","Symbol":"BTCUSDT","Timestamp":0,"BestBid":100.0,"BestAsk":100.5}
{"Exchange":"OKX","Symbol":"BTCUSDT","Timestamp":0,"BestBid":99.0,"BestAsk":99.5}
{"Exchange":"Binance","Symbol":"BTCUSDT","Timestamp":1000,"BestBid":100.0,"BestAsk":100.5}
{"Exchange":"OKX","Symbol":"BTCUSDT","Timestamp":1000,"BestBid":102.0,"BestAsk":102.5}
"#;

fn arbscope() -> Command {
    let mut cmd = Command::cargo_bin("arbscope").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_quotes(dir: &Path) -> String {
    let path = dir.join("quotes.jsonl");
    fs::write(&path, QUOTES).expect("write quotes");
    path.to_str().expect("utf-8 path").to_string()
}

/// JSON lines on stdout with the given `type`.
fn payloads(stdout: &[u8], kind: &str) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter(|value| value["type"] == kind)
        .map(|value| value["payload"].clone())
        .collect()
}

#[test]
fn check_config_accepts_defaults() {
    arbscope()
        .args(["--color", "never", "check", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration check complete"));
}

#[test]
fn check_config_rejects_invalid_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[backtest]\ncommission_pct = -1.0\n").expect("write config");

    arbscope()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("commission_pct"));
}

#[test]
fn run_reports_json() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = write_quotes(dir.path());

    let output = arbscope()
        .args([
            "--json",
            "run",
            "--data",
            &data,
            "--commission",
            "0.2",
            "--thresholds",
            "0.5,1.0",
            "--workers",
            "2",
            "--log-level",
            "error",
        ])
        .output()
        .expect("run arbscope");
    assert!(output.status.success(), "{output:?}");

    let results = payloads(&output.stdout, "backtest");
    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result["quotes"], 4);
    let counts = result["quote_counts"].as_array().expect("quote counts");
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0]["exchange"], "Binance");
    assert_eq!(counts[0]["quotes"], 2);
    assert_eq!(counts[1]["exchange"], "OKX");
    assert_eq!(counts[1]["quotes"], 2);
    assert_eq!(result["opportunities"], 2);
    assert_eq!(result["instances"].as_array().map(Vec::len), Some(2));
    assert!(result["report"]["total_trades"].as_u64().expect("trade count") >= 1);
    assert!(result["report"]["by_symbol"]["BTCUSDT"].is_object());
}

#[test]
fn run_exports_trades() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = write_quotes(dir.path());
    let csv = dir.path().join("out/trades.csv");

    arbscope()
        .args(["-q", "run", "--data", &data, "--thresholds", "0.1", "--log-level", "error"])
        .arg("--export-csv")
        .arg(&csv)
        .assert()
        .success();

    let contents = fs::read_to_string(&csv).expect("csv written");
    assert!(contents.starts_with("profit_threshold,"));
    assert!(contents.lines().count() >= 2);
}

#[test]
fn run_fails_on_missing_data() {
    let dir = tempfile::tempdir().expect("temp dir");
    arbscope()
        .args(["run", "--log-level", "error", "--data"])
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("data path does not exist"));
}

#[test]
fn run_fails_fast_on_foreign_quote_currency() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("eur.jsonl");
    fs::write(
        &path,
        r#"{"Exchange":"Kraken","Symbol":"BTCEUR","Timestamp":0,"BestBid":1.0,"BestAsk":1.0}"#,
    )
    .expect("write quotes");

    arbscope()
        .args(["run", "--log-level", "error", "--data"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("BTCEUR"));
}

#[test]
fn opportunities_lists_both_directions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let data = write_quotes(dir.path());

    let output = arbscope()
        .args([
            "--json",
            "opportunities",
            "--symbol",
            "btc-usdt",
            "--data",
            &data,
            "--commission",
            "0.2",
            "--log-level",
            "error",
        ])
        .output()
        .expect("run arbscope");
    assert!(output.status.success(), "{output:?}");

    let results = payloads(&output.stdout, "opportunities");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["total"], 2);
    let rows = results[0]["opportunities"].as_array().expect("rows");
    assert_eq!(rows[0]["buy_exchange"], "OKX");
    assert_eq!(rows[1]["buy_exchange"], "Binance");
}

#[test]
fn unknown_subcommand_is_rejected() {
    arbscope().arg("trade").assert().failure();
}
