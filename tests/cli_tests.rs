use assert_cmd::Command;
use chrono::{Datelike, Local};
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_CLI_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

/// A day in the current month, so it lies inside the history window
fn this_month(day: u32) -> (String, i32, u32) {
    let today = Local::now().date_naive();
    (
        format!("{}-{:02}-{:02}", today.year(), today.month(), day),
        today.year(),
        today.month(),
    )
}

fn blob(data_dir: &TempDir) -> serde_json::Value {
    let text = std::fs::read_to_string(data_dir.path().join("data").join("expenses.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn add_then_history_shows_total() {
    let dir = TempDir::new().unwrap();
    let (first, year, month) = this_month(1);
    let (second, _, _) = this_month(2);

    expenses(&dir)
        .args(["add", "Coffee", "4.50", "--date", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added successfully"));

    expenses(&dir)
        .args(["add", "Lunch", "12", "--date", &second])
        .assert()
        .success();

    expenses(&dir)
        .args(["history", "--year", &year.to_string(), "--month", &month.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: $16.50"))
        .stdout(predicate::str::contains("Coffee"))
        .stdout(predicate::str::contains("Lunch"));
}

#[test]
fn history_defaults_to_current_month() {
    let dir = TempDir::new().unwrap();

    expenses(&dir).args(["add", "Bus ticket", "2.80"]).assert().success();

    expenses(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bus ticket"))
        .stdout(predicate::str::contains("Total: $2.80"));
}

#[test]
fn add_persists_blob() {
    let dir = TempDir::new().unwrap();
    let (date, _, _) = this_month(3);

    expenses(&dir)
        .args(["add", "  Coffee  ", "4.5", "--date", &date])
        .assert()
        .success();

    let json = blob(&dir);
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["item"], "Coffee");
    assert_eq!(records[0]["amount"], 4.5);
    assert!(records[0]["id"].is_string());
    assert!(records[0]["date"].as_str().unwrap().starts_with(&date));
}

#[test]
fn invalid_input_is_rejected() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["add", "Coffee", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid amount"));

    expenses(&dir)
        .args(["add", "   ", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter an item name"));

    expenses(&dir)
        .args(["add", "Yacht", "92233720368547758"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount too large"));

    expenses(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded."));
}

#[test]
fn delete_by_id() {
    let dir = TempDir::new().unwrap();
    let (date, year, month) = this_month(4);

    expenses(&dir)
        .args(["add", "Coffee", "4.50", "--date", &date])
        .assert()
        .success();

    let id = blob(&dir)[0]["id"].as_str().unwrap().to_string();

    expenses(&dir)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense"));

    expenses(&dir)
        .args(["history", "-y", &year.to_string(), "-m", &month.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses for this month."));

    assert_eq!(blob(&dir), serde_json::json!([]));
}

#[test]
fn delete_unknown_id_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["delete", "12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expense with id 12345"));
}

#[test]
fn corrupt_blob_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("expenses.json"), "{{ definitely not json").unwrap();

    expenses(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded."));
}

#[test]
fn month_out_of_range_is_a_usage_error() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["history", "--month", "13"])
        .assert()
        .failure();
}

#[test]
fn init_and_config() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    assert!(dir.path().join("config.json").exists());
    assert_eq!(blob(&dir), serde_json::json!([]));

    expenses(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol: $"))
        .stdout(predicate::str::contains("Initialized:      yes"));
}

#[test]
fn config_before_init_reports_uninitialized() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:      no"));
}
