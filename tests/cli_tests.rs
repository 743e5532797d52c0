mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use common::{temp_home, write_snapshot, ACCOUNT_ID, TODAY};

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cashcast_cli").expect("binary builds");
    cmd.env("CASHCAST_HOME", home)
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn expand_prints_one_date_per_line() {
    let home = temp_home();
    cli(&home)
        .args([
            "expand",
            "--anchor",
            "2024-01-31",
            "--rule",
            "eom",
            "--end",
            "2024-04-30",
        ])
        .assert()
        .success()
        .stdout("2024-01-31\n2024-02-29\n2024-03-31\n2024-04-30\n");
}

#[test]
fn expand_rejects_unknown_rule() {
    let home = temp_home();
    cli(&home)
        .args(["expand", "--anchor", "2024-01-01", "--rule", "hourly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hourly"));
}

#[test]
fn forecast_json_reports_balances_alerts_and_events() {
    let home = temp_home();
    let snapshot = write_snapshot(&home);

    let output = cli(&home)
        .args(["--json", "forecast", "--account", ACCOUNT_ID])
        .args(["--snapshot", snapshot.to_str().expect("utf-8 path")])
        .args(["--days", "3", "--buffer", "100", "--today", TODAY])
        .output()
        .expect("run forecast");
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(body["account_id"], ACCOUNT_ID);
    assert_eq!(body["balances"]["2024-06-10"], 90.0);
    assert_eq!(body["balances"]["2024-06-11"], 120.0);
    assert_eq!(body["balances"]["2024-06-12"], 110.0);
    assert_eq!(body["alerts"], serde_json::json!(["2024-06-10"]));

    let events = body["events"].as_array().expect("events array");
    assert_eq!(events.len(), 5);
    let rent = events
        .iter()
        .find(|event| event["name"] == "Rent")
        .expect("rent occurrence");
    assert_eq!(rent["skipped"], true);
    assert_eq!(rent["amount"], 0.0);
}

#[test]
fn alerts_table_lists_low_days() {
    let home = temp_home();
    let snapshot = write_snapshot(&home);

    cli(&home)
        .args(["alerts", "--account", ACCOUNT_ID])
        .args(["--snapshot", snapshot.to_str().expect("utf-8 path")])
        .args(["--days", "5", "--buffer", "100", "--today", TODAY])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 day(s) below buffer 100.00"))
        .stdout(predicate::str::contains("2024-06-14"));
}

#[test]
fn forecast_uses_configured_snapshot_and_buffer() {
    let home = temp_home();
    let snapshot = write_snapshot(&home);

    cli(&home)
        .args(["config", "set-snapshot", snapshot.to_str().expect("utf-8 path")])
        .assert()
        .success();
    cli(&home)
        .args(["config", "set-buffer", "95"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buffer_amount:   95.00"));

    let output = cli(&home)
        .args(["--json", "alerts", "--account", ACCOUNT_ID])
        .args(["--days", "3", "--today", TODAY])
        .output()
        .expect("run alerts");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(body["buffer_amount"], 95.0);
    assert_eq!(body["alerts"], serde_json::json!(["2024-06-10"]));
}

#[test]
fn forecast_without_snapshot_is_a_usage_error() {
    let home = temp_home();
    cli(&home)
        .args(["forecast", "--account", ACCOUNT_ID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no snapshot given"));
}

#[test]
fn unknown_account_fails() {
    let home = temp_home();
    let snapshot = write_snapshot(&home);
    cli(&home)
        .args(["forecast", "--account", "00000000-0000-4000-8000-000000000000"])
        .args(["--snapshot", snapshot.to_str().expect("utf-8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("00000000-0000-4000-8000-000000000000"));
}

#[test]
fn months_and_days_conflict() {
    let home = temp_home();
    cli(&home)
        .args(["forecast", "--account", ACCOUNT_ID, "--days", "3", "--months", "1"])
        .assert()
        .failure();
}

#[test]
fn set_months_rejects_out_of_range() {
    let home = temp_home();
    cli(&home)
        .args(["config", "set-months", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("forecast_horizon_months"));
}

#[test]
fn oversized_horizon_reports_error_instead_of_crashing() {
    let home = temp_home();
    let snapshot = write_snapshot(&home);
    cli(&home)
        .args(["forecast", "--account", ACCOUNT_ID])
        .args(["--snapshot", snapshot.to_str().expect("utf-8 path")])
        .args(["--days", "4000000000", "--today", TODAY])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Validation failed"))
        .stderr(predicate::str::contains("panicked").not());
}
