//! End-to-end tests of the `mandate` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with an isolated config directory and no colours.
fn mandate(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mandate").unwrap();
    cmd.env("MANDATE_CONFIG_DIR", config_dir.path())
        .env("NO_COLOR", "1")
        .env_remove("MANDATE_API_URL")
        .env_remove("MANDATE_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

// ── dashboard ────────────────────────────────────────────────────────

#[test]
fn dashboard_shows_sample_tiles() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("GSAM Compliance Officer"))
        .stdout(predicate::str::contains("85%"))
        .stdout(predicate::str::contains("2 hard, 3 soft"))
        .stdout(predicate::str::contains("BREACHES DETECTED"))
        .stdout(predicate::str::contains("$700,000"))
        .stderr(predicate::str::contains("Ambiguous Rules Detected"));
}

#[test]
fn dashboard_minimal_prints_score() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["--format", "minimal", "dashboard"])
        .assert()
        .success()
        .stdout("85\n");
}

#[test]
fn dashboard_empty_state() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["dashboard", "--no-sample"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No compliance data available"))
        .stdout(predicate::str::contains(
            "Upload a guideline document to run a compliance check",
        ));
}

#[test]
fn dashboard_rejects_unrelated_json() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("rules.json");
    std::fs::write(&file, r#"{"rules": []}"#).unwrap();

    mandate(&dir)
        .args(["dashboard", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid dashboard"));
}

// ── portfolio ────────────────────────────────────────────────────────

#[test]
fn portfolio_csv_has_header_and_sixteen_rows() {
    let dir = TempDir::new().unwrap();
    let output = mandate(&dir)
        .args(["--format", "csv", "portfolio"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 17);
    assert!(lines[0].starts_with("\"Portfolio\",\"Security Name\",\"Ticker\""));
}

#[test]
fn portfolio_export_writes_file() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("cash.csv");

    mandate(&dir)
        .args(["portfolio", "--asset-class", "cash", "--export"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.lines().count() >= 2);
    assert!(content.lines().skip(1).all(|l| l.contains("\"Cash\"")));
}

#[test]
fn portfolio_rejects_unknown_sort_column() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["portfolio", "--sort", "duration"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid sort column"));
}

#[test]
fn portfolio_rejects_unknown_portfolio() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["portfolio", "--portfolio", "ZZZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown portfolio"));
}

#[test]
fn portfolio_list_ids() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["portfolio", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC"))
        .stdout(predicate::str::contains("DEF"))
        .stdout(predicate::str::contains("XYZ"));
}

// ── rules ────────────────────────────────────────────────────────────

#[test]
fn rules_csv_export_of_search() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["--format", "csv", "rules", "--search", "esg"])
        .assert()
        .success()
        .stdout(
            "\"Rule ID\",\"Category\",\"Description\",\"Threshold\",\"Severity\"\n\
             \"R003\",\"ESG\",\"No positions allowed in securities on the ESG exclusion list\",0,\"hard_breach\"\n",
        );
}

#[test]
fn rules_table_shows_count() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["rules", "--search", "must not"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 3 of 5 rules"));
}

// ── compare ──────────────────────────────────────────────────────────

#[test]
fn compare_returns_simulated_changes() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["compare", "v1.0", "v2.1", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Rules (2)"))
        .stdout(predicate::str::contains("Removed Rules (1)"))
        .stdout(predicate::str::contains("Modified Rules (2)"));
}

#[test]
fn compare_rejects_identical_versions() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["compare", "v2.0", "v2.0", "--delay-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("with itself"));
}

#[test]
fn compare_requires_both_versions() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["compare", "v2.0", "--delay-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Version B is not selected"));
}

// ── config ───────────────────────────────────────────────────────────

#[test]
fn config_default_format_applies() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["config", "set", "default_format", "minimal"])
        .assert()
        .success();

    mandate(&dir)
        .args(["config", "get", "format"])
        .assert()
        .success()
        .stdout("minimal\n");

    mandate(&dir).arg("dashboard").assert().success().stdout("85\n");
}

#[test]
fn config_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["config", "set", "request_timeout_secs", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));

    mandate(&dir)
        .args(["config", "set", "currency", "USD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn config_recovers_from_corrupt_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{not json").unwrap();

    mandate(&dir)
        .args(["--format", "minimal", "dashboard"])
        .assert()
        .success()
        .stdout("85\n")
        .stderr(predicate::str::contains("Ignoring stored settings"));

    mandate(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings file"))
        .stderr(predicate::str::contains("config.json"));

    mandate(&dir).args(["config", "path"]).assert().success();
    mandate(&dir).args(["config", "reset", "--all"]).assert().success();

    mandate(&dir)
        .args(["config", "get", "default_portfolio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC"));
}

// ── check ────────────────────────────────────────────────────────────

#[test]
fn check_missing_document_fails_before_network() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .args(["check", "does-not-exist.pdf", "--api-url", "http://127.0.0.1:9/api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.pdf"));
}

#[test]
fn check_reads_service_url_from_env() {
    let dir = TempDir::new().unwrap();
    mandate(&dir)
        .env("MANDATE_API_URL", "ftp://agents.example.com")
        .args(["check", "guideline.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ftp://agents.example.com"));
}
