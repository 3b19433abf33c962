use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn costbook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("costbook").unwrap();
    cmd.env("COSTBOOK_DATA_DIR", data_dir.path())
        .env("COSTBOOK_API_URL", "http://127.0.0.1:9")
        .env_remove("COSTBOOK_PASSWORD");
    cmd
}

#[test]
fn range_resolves_leap_february() {
    let dir = TempDir::new().unwrap();
    costbook(&dir)
        .args(["range", "2024-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First day: 2024-02-01"))
        .stdout(predicate::str::contains("Last day: 2024-02-29"))
        .stdout(predicate::str::contains("Query: from=2024-02-01&to=2024-02-29"));
}

#[test]
fn range_rejects_invalid_month() {
    let dir = TempDir::new().unwrap();
    costbook(&dir).args(["range", "2024-13"]).assert().failure();
    costbook(&dir).args(["range", "March"]).assert().failure();
}

#[test]
fn config_prints_paths_and_api_url() {
    let dir = TempDir::new().unwrap();
    costbook(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("session.json"))
        .stdout(predicate::str::contains("http://127.0.0.1:9"))
        .stdout(predicate::str::contains("Signed in:       no"));
    assert!(dir.path().join("config.json").exists());
}

#[test]
fn api_url_flag_overrides_environment() {
    let dir = TempDir::new().unwrap();
    costbook(&dir)
        .args(["config", "--api-url", "https://expenses.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://expenses.example.com"));
}

#[test]
fn summary_without_token_asks_to_sign_in() {
    let dir = TempDir::new().unwrap();
    costbook(&dir)
        .args(["summary", "--month", "2024-03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("costbook login"));
}

#[test]
fn logout_removes_session_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("session.json"), r#"{"token":"abc"}"#).unwrap();
    costbook(&dir).arg("logout").assert().success();
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    costbook(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("txn"))
        .stdout(predicate::str::contains("tui"));
}
