use assert_cmd::Command;
use predicates::prelude::*;

const CONFIG: &str = r#"{
    "isOpen": true,
    "schedule": {
        "week": {
            "sunday":    { "isOpen": false },
            "monday":    { "isOpen": true, "openTime": "08:00", "closeTime": "22:00" },
            "tuesday":   { "isOpen": true, "openTime": "08:00", "closeTime": "22:00" },
            "wednesday": { "isOpen": true, "openTime": "08:00", "closeTime": "22:00" },
            "thursday":  { "isOpen": true, "openTime": "08:00", "closeTime": "22:00" },
            "friday":    { "isOpen": true, "openTime": "08:00", "closeTime": "23:00" },
            "saturday":  { "isOpen": false }
        }
    },
    "pauses": [
        { "name": "Natal", "startDate": "2025-12-24", "endDate": "2025-12-26" }
    ]
}"#;

fn store_hours() -> Command {
    let mut cmd = Command::cargo_bin("store-hours").unwrap();
    cmd.env_remove("STORE_HOURS_TZ");
    cmd
}

#[test]
fn test_status_open_friday_evening() {
    store_hours()
        .args(["status", "--at", "2026-02-20T20:00"])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout("Open until 23:00\n");
}

#[test]
fn test_status_saturday_closed() {
    store_hours()
        .args(["status", "--at", "2026-02-21T10:00"])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout("Closed today\n");
}

#[test]
fn test_status_pause_json() {
    let output = store_hours()
        .args(["status", "--at", "2025-12-25T12:00", "--json"])
        .write_stdin(CONFIG)
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["status"], "closed");
    assert_eq!(status["reason"], "pause");
    assert_eq!(status["message"], "Pause: Natal");
}

#[test]
fn test_status_rfc3339_converted_to_timezone() {
    // 01:30 UTC Saturday is 22:30 Friday in São Paulo.
    store_hours()
        .args([
            "status",
            "--at",
            "2026-02-21T01:30:00Z",
            "--timezone",
            "America/Sao_Paulo",
        ])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout("Open until 23:00\n");
}

#[test]
fn test_status_timezone_from_env() {
    store_hours()
        .env("STORE_HOURS_TZ", "America/Sao_Paulo")
        .args(["status", "--at", "2026-02-21T01:30:00Z"])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout("Open until 23:00\n");
}

#[test]
fn test_status_manual_off() {
    store_hours()
        .args(["status", "--at", "2026-02-20T20:00"])
        .write_stdin(r#"{"isOpen": false}"#)
        .assert()
        .success()
        .stdout("Store closed manually\n");
}

#[test]
fn test_status_invalid_timezone() {
    store_hours()
        .args(["status", "--at", "2026-02-20T20:00:00Z", "--timezone", "Nowhere/City"])
        .write_stdin(CONFIG)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nowhere/City"));
}

#[test]
fn test_status_invalid_at() {
    store_hours()
        .args(["status", "--at", "friday evening"])
        .write_stdin(CONFIG)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid datetime"));
}

#[test]
fn test_status_invalid_config() {
    store_hours()
        .args(["status"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse store config"));
}

#[test]
fn test_status_missing_config_file() {
    store_hours()
        .args(["status", "--config", "/nonexistent/store.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_validate_clean_config() {
    store_hours()
        .args(["validate", "--config", "-"])
        .write_stdin(CONFIG)
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn test_validate_reports_issues() {
    let config = r#"{
        "isOpen": true,
        "schedule": { "week": {
            "friday": { "isOpen": true, "openTime": "20:00", "closeTime": "02:00" }
        } },
        "pauses": [ { "name": "Typo", "startDate": "2025/12/24", "endDate": "2025-12-26" } ]
    }"#;
    store_hours()
        .arg("validate")
        .write_stdin(config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("monday: no schedule entry"))
        .stdout(predicate::str::contains("friday: closes at 02:00 but opens at 20:00"))
        .stdout(predicate::str::contains("pause 'Typo'"));
}

#[test]
fn test_status_null_fields_still_give_verdict() {
    let config = CONFIG
        .replace(
            r#""saturday":  { "isOpen": false }"#,
            r#""saturday":  { "isOpen": false, "openTime": null, "closeTime": null }"#,
        )
        .replace(r#""startDate": "2025-12-24""#, r#""startDate": null"#);
    store_hours()
        .args(["status", "--at", "2026-02-20T20:00"])
        .write_stdin(config.clone())
        .assert()
        .success()
        .stdout("Open until 23:00\n");

    store_hours()
        .args(["status", "--at", "2025-12-25T12:00"])
        .write_stdin(config)
        .assert()
        .success()
        .stdout("Open until 22:00\n");
}
