//! Integration tests for the `slotkit` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the slots, open-dates
//! and select subcommands through the actual binary, including stdin input,
//! timezone handling and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the availability.json fixture.
fn availability_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/availability.json")
}

/// Helper: path to the malformed.json fixture.
fn malformed_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/malformed.json")
}

/// Helper: the binary with a clean, deterministic environment.
fn slotkit() -> Command {
    let mut cmd = Command::cargo_bin("slotkit").unwrap();
    cmd.env_remove("SLOTKIT_TIMEZONE").env("RUST_LOG", "warn");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// slots subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_lists_labels_excluding_bookings() {
    slotkit()
        .args([
            "slots",
            "-i",
            availability_path(),
            "--date",
            "2024-06-10",
            "--now",
            "2024-06-01T08:00",
        ])
        .assert()
        .success()
        .stdout("9:00 AM\n11:00 AM\n6:00 PM\n7:00 PM\n8:00 PM\n9:00 PM\n10:00 PM\n11:00 PM\n");
}

#[test]
fn slots_converts_offset_bookings_into_timezone() {
    // 13:30Z is 19:00 in Asia/Kolkata, so the 7 PM slot disappears.
    slotkit()
        .args([
            "--timezone",
            "Asia/Kolkata",
            "slots",
            "-i",
            availability_path(),
            "--date",
            "2024-06-10",
            "--now",
            "2024-06-01T08:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("6:00 PM\n8:00 PM"));
}

#[test]
fn timezone_can_come_from_environment() {
    slotkit()
        .env("SLOTKIT_TIMEZONE", "Asia/Kolkata")
        .args([
            "slots",
            "-i",
            availability_path(),
            "--date",
            "2024-06-10",
            "--now",
            "2024-06-01T08:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("7:00 PM").not());
}

#[test]
fn slots_reads_stdin_and_prints_json() {
    let payload = std::fs::read_to_string(availability_path()).unwrap();

    let output = slotkit()
        .args(["slots", "--date", "2024-06-12", "--now", "2024-06-01T08:00", "--json"])
        .write_stdin(payload)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let slots = value.as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["date"], "2024-06-12");
    assert_eq!(slots[0]["hour"], 10);
    assert_eq!(slots[0]["label"], "10:00 AM");
}

#[test]
fn slots_today_drops_past_hours() {
    slotkit()
        .args([
            "slots",
            "-i",
            availability_path(),
            "--date",
            "2024-06-10",
            "--now",
            "2024-06-10T20:30",
        ])
        .assert()
        .success()
        .stdout("9:00 PM\n10:00 PM\n11:00 PM\n");
}

#[test]
fn slots_for_paused_or_closed_date_are_empty() {
    for date in ["2024-06-17", "2024-06-16", "2024-06-11"] {
        slotkit()
            .args([
                "slots",
                "-i",
                availability_path(),
                "--date",
                date,
                "--now",
                "2024-06-01T08:00",
            ])
            .assert()
            .success()
            .stdout("");
    }
}

#[test]
fn malformed_range_fails_with_config_error() {
    slotkit()
        .args([
            "slots",
            "-i",
            malformed_path(),
            "--date",
            "2024-06-10",
            "--now",
            "2024-06-01T08:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("9 AM"));
}

#[test]
fn invalid_timezone_fails() {
    slotkit()
        .args([
            "--timezone",
            "Nowhere/Special",
            "slots",
            "-i",
            availability_path(),
            "--date",
            "2024-06-10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn log_filter_accepts_target_directives() {
    slotkit()
        .env("RUST_LOG", "slot_engine=debug,slotkit=debug")
        .args([
            "slots",
            "-i",
            availability_path(),
            "--date",
            "2024-06-12",
            "--now",
            "2024-06-01T08:00",
        ])
        .assert()
        .success()
        .stdout("10:00 AM\n11:00 AM\n12:00 PM\n");
}

#[test]
fn missing_input_file_fails() {
    slotkit()
        .args(["slots", "-i", "/nonexistent/availability.json", "--date", "2024-06-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// open-dates subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn open_dates_skips_paused_and_closed_days() {
    slotkit()
        .args([
            "open-dates",
            "-i",
            availability_path(),
            "--from",
            "2024-06-10",
            "--days",
            "14",
            "--today",
            "2024-06-01",
        ])
        .assert()
        .success()
        .stdout("2024-06-10\n2024-06-12\n2024-06-19\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// select subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn select_range_swaps_reversed_clicks() {
    slotkit()
        .args([
            "select",
            "--mode",
            "range",
            "--today",
            "2024-06-01",
            "--click",
            "2024-06-20",
            "--click",
            "2024-06-12",
        ])
        .assert()
        .success()
        .stdout("{\"startDate\":\"2024-06-12\",\"endDate\":\"2024-06-20\"}\n");
}

#[test]
fn select_range_with_fixed_start_moves_end() {
    slotkit()
        .args([
            "select",
            "--mode",
            "range",
            "--today",
            "2024-06-01",
            "--start",
            "2024-06-05",
            "--end",
            "2024-06-10",
            "--fixed-start",
            "--click",
            "2024-06-03",
            "--click",
            "2024-06-30",
        ])
        .assert()
        .success()
        .stdout("{\"startDate\":\"2024-06-05\",\"endDate\":\"2024-06-30\"}\n");
}

#[test]
fn select_incomplete_range_fails() {
    slotkit()
        .args([
            "select",
            "--mode",
            "range",
            "--today",
            "2024-06-01",
            "--click",
            "2024-06-12",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Apply is disabled"));
}

#[test]
fn select_pause_fills_range_and_keeps_existing() {
    slotkit()
        .args([
            "select",
            "--mode",
            "pause",
            "--today",
            "2024-06-01",
            "--paused",
            "2024-06-20, 2024-06-13",
            "--window-start",
            "2024-06-01",
            "--window-end",
            "2024-06-30",
            "--click",
            "2024-06-12",
            "--click",
            "2024-06-14",
        ])
        .assert()
        .success()
        .stdout(
            "{\"pausedDates\":[\"2024-06-12\",\"2024-06-13\",\"2024-06-14\",\"2024-06-20\"]}\n",
        );
}

#[test]
fn select_pause_ignores_past_clicks() {
    slotkit()
        .args([
            "select",
            "--mode",
            "pause",
            "--today",
            "2024-06-10",
            "--click",
            "2024-06-05",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Apply is disabled"));
}
