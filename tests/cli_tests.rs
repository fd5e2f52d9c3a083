//! CLI integration tests
//!
//! Every test runs the binary against its own temporary data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn calcdeck(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("calcdeck").unwrap();
    cmd.env("CALCDECK_DATA_DIR", dir.path())
        .env_remove("CALCDECK_PASSWORD")
        .env_remove("CALCDECK_LOG");
    cmd
}

fn register_and_login(dir: &TempDir, user: &str) {
    calcdeck(dir)
        .args(["user", "register", user, "--password", "s3cret"])
        .assert()
        .success();
    calcdeck(dir)
        .args(["user", "login", user, "--password", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Logged in as {}", user)));
}

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("calc"))
        .stdout(predicate::str::contains("finance"))
        .stdout(predicate::str::contains("exchange"));
}

#[test]
fn test_subcommands_have_help() {
    let dir = TempDir::new().unwrap();
    for command in [
        "calc", "base", "finance", "date", "convert", "units", "exchange", "coin", "user",
        "activity", "history", "portfolio", "alert", "favorite", "config",
    ] {
        calcdeck(&dir)
            .args([command, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }
}

#[test]
fn test_calc_simple_sum() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["calc", "7", "+", "3", "="])
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn test_calc_chained_operators_and_functions() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["calc", "2", "+", "3", "*", "4", "="])
        .assert()
        .success()
        .stdout("20\n");

    calcdeck(&dir)
        .args(["calc", "16", "sqrt"])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn test_calc_divide_by_zero_fails() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["calc", "8", "/", "0", "="])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot divide by zero"));
}

#[test]
fn test_calc_in_hex() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["calc", "--base", "16", "ff", "+", "1", "="])
        .assert()
        .success()
        .stdout("100\n");
}

#[test]
fn test_calc_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["calc", "7", "plonk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn test_base_convert_and_show() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["base", "convert", "255", "--from", "10", "--to", "16"])
        .assert()
        .success()
        .stdout("FF\n");

    calcdeck(&dir)
        .args(["base", "show", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0b1010"))
        .stdout(predicate::str::contains("0xA"));

    calcdeck(&dir)
        .args(["base", "convert", "102", "--from", "2", "--to", "10"])
        .assert()
        .failure();
}

#[test]
fn test_base_bitwise_not_is_32_bit() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["base", "bitwise", "not", "0"])
        .assert()
        .success()
        .stdout("-1\n");
}

#[test]
fn test_finance_loan() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["finance", "loan", "1200", "12", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly payment: $106.62"));
}

#[test]
fn test_finance_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["finance", "loan", "abc", "12", "1"])
        .assert()
        .failure();
}

#[test]
fn test_finance_rejects_overflowing_term() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["finance", "investment", "1000", "5", "100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large to compute"));
}

#[test]
fn test_date_diff_and_add() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["date", "diff", "2024-01-01", "2024-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("60 days"));

    calcdeck(&dir)
        .args(["date", "add", "2024-01-31", "1", "months"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2024-02-29"));
}

#[test]
fn test_convert_units() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["convert", "temperature", "0", "C", "F"])
        .assert()
        .success()
        .stdout("32.0000\n");

    calcdeck(&dir)
        .args(["convert", "length", "1", "kg", "m"])
        .assert()
        .failure();
}

#[test]
fn test_units_listing() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .arg("units")
        .assert()
        .success()
        .stdout(predicate::str::contains("temperature"));
}

#[test]
fn test_exchange_from_snapshot() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("rates.json"),
        r#"{"result":"success","base_code":"USD","conversion_rates":{"USD":1,"EUR":0.5,"JPY":150}}"#,
    )
    .unwrap();

    calcdeck(&dir)
        .args(["exchange", "convert", "100", "EUR"])
        .assert()
        .success()
        .stdout("50.00 EUR\n");

    calcdeck(&dir)
        .args(["exchange", "convert", "10", "JPY", "--from", "EUR"])
        .assert()
        .success()
        .stdout("3,000.00 JPY\n");

    calcdeck(&dir)
        .args(["exchange", "convert", "1", "XXX"])
        .assert()
        .failure();
}

#[test]
fn test_exchange_without_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["exchange", "rates"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No exchange-rate snapshot"));
}

#[test]
fn test_coin_flips() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["coin", "-n", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 20"));

    calcdeck(&dir)
        .args(["coin", "-n", "0"])
        .assert()
        .failure();
}

#[test]
fn test_register_login_logout() {
    let dir = TempDir::new().unwrap();
    register_and_login(&dir, "ada");

    calcdeck(&dir)
        .args(["user", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ada"));

    calcdeck(&dir)
        .args(["user", "register", "ada", "--password", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    calcdeck(&dir)
        .args(["user", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out ada"));

    calcdeck(&dir)
        .args(["user", "whoami"])
        .assert()
        .success()
        .stdout("Not logged in.\n");
}

#[test]
fn test_login_with_wrong_password() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["user", "register", "ada", "--password", "s3cret"])
        .assert()
        .success();

    calcdeck(&dir)
        .args(["user", "login", "ada", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn test_password_from_environment() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .env("CALCDECK_PASSWORD", "fromenv")
        .args(["user", "register", "bob"])
        .assert()
        .success();

    calcdeck(&dir)
        .env("CALCDECK_PASSWORD", "fromenv")
        .args(["user", "login", "bob"])
        .assert()
        .success();
}

#[test]
fn test_history_and_activity_need_login() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["history", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    calcdeck(&dir)
        .args(["activity", "list"])
        .assert()
        .failure();
}

#[test]
fn test_calculations_are_saved_for_user() {
    let dir = TempDir::new().unwrap();
    register_and_login(&dir, "ada");

    calcdeck(&dir).args(["calc", "7", "+", "3", "="]).assert().success();
    calcdeck(&dir).args(["coin"]).assert().success();

    calcdeck(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 + 3 = 10"));

    calcdeck(&dir)
        .args(["activity", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("calculation"))
        .stdout(predicate::str::contains("7 + 3 = 10"));

    calcdeck(&dir)
        .args(["activity", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last 24 hours: 2"));

    calcdeck(&dir)
        .args(["history", "clear"])
        .assert()
        .success();
    calcdeck(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations yet."));
}

#[test]
fn test_portfolio_flow() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("quotes.json"),
        r#"[{"symbol":"AAPL","kind":"stock","price":200.0,"change":2.0,"change_percent":1.0,"prev_close":198.0}]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"quotes":{"request_delay_ms":0}}"#,
    )
    .unwrap();
    register_and_login(&dir, "ada");

    calcdeck(&dir)
        .args(["portfolio", "add", "aapl", "10", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 10 AAPL"));

    calcdeck(&dir)
        .args(["portfolio", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AAPL"))
        .stdout(predicate::str::contains("$2,000.00"));

    calcdeck(&dir)
        .args(["alert", "add", "AAPL", "above", "190"])
        .assert()
        .success();
    calcdeck(&dir)
        .args(["alert", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AAPL is now above $190"));

    calcdeck(&dir)
        .args(["portfolio", "remove", "nonexistent"])
        .assert()
        .failure();
}

#[test]
fn test_favorites_toggle() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .args(["favorite", "toggle", "TSLA"])
        .assert()
        .success()
        .stdout("Added TSLA to favorites\n");
    calcdeck(&dir)
        .args(["favorite", "list"])
        .assert()
        .success()
        .stdout("TSLA\n");
    calcdeck(&dir)
        .args(["favorite", "toggle", "TSLA"])
        .assert()
        .success()
        .stdout("Removed TSLA from favorites\n");
}

#[test]
fn test_config_shows_paths() {
    let dir = TempDir::new().unwrap();
    calcdeck(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("rates.json"))
        .stdout(predicate::str::contains("Precision:         8"));
}
