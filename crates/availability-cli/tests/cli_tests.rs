//! Integration tests for the `avail` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the subcommands
//! through the actual binary, including stdin piping, file I/O, and error exits.
//! Every invocation passes `--config` so a developer's own config file cannot
//! leak into the results.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: `avail` with the empty config fixture.
fn avail() -> Command {
    let mut cmd = Command::cargo_bin("avail").unwrap();
    cmd.args(["--config", &fixture("empty.toml")]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Grids
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn month_text_grid() {
    avail()
        .args(["month", "--month", "2026-02", "--today", "2026-02-10", "-i"])
        .arg(fixture("slots.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("February 2026"))
        .stdout(predicate::str::contains(" Mo   Tu "))
        // Jan 26 is a Monday shown before February: dimmed availability.
        .stdout(predicate::str::contains(" 26+"))
        .stdout(predicate::str::contains("  2*"))
        .stdout(predicate::str::contains("[10 ]"));
}

#[test]
fn month_json_grid_has_42_days() {
    let output = avail()
        .args(["month", "--month", "2024-02", "--today", "2024-02-29", "--json", "-i"])
        .arg(fixture("slots.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let grid: Value = serde_json::from_slice(&output.stdout).unwrap();
    let days = grid.as_array().unwrap();
    assert_eq!(days.len(), 42);
    assert_eq!(days.iter().filter(|d| d["isCurrentPeriod"] == true).count(), 29);
    assert_eq!(days.iter().filter(|d| d["isToday"] == true).count(), 1);
}

#[test]
fn month_rejects_bad_month() {
    avail()
        .args(["month", "--month", "2026-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn week_text_from_stdin() {
    let slots = std::fs::read_to_string(fixture("slots.json")).unwrap();
    avail()
        .args(["week", "--date", "2026-02-15", "--today", "2026-02-10"])
        .write_stdin(slots)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Mo 2026-02-09  09:00-10:00 (1 hr), 13:00-14:30 (1 hr 30 mins)",
        ))
        .stdout(predicate::str::contains("Tu 2026-02-10 (today)  -"))
        .stdout(predicate::str::contains("Su 2026-02-15  -"));
}

#[test]
fn week_without_input_is_empty() {
    avail()
        .args(["week", "--date", "2026-02-11", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hasAvailability\": true").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// Editing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn add_prepends_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");

    avail()
        .args(["add", "--day", "Monday", "--start", "10:00", "--end", "11:00", "-i"])
        .arg(fixture("slots.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let slots: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0]["dayOfWeek"], "monday");
    assert_eq!(slots[0]["startTime"], "10:00");
}

#[test]
fn add_in_place_keeps_unreadable_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slots.json");
    std::fs::copy(fixture("malformed.json"), &path).unwrap();

    avail()
        .args(["add", "--day", "monday", "--start", "09:00", "--end", "10:00", "-i"])
        .arg(&path)
        .arg("-o")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("keeping unreadable availability record unchanged"));

    let slots: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["dayOfWeek"], "monday");
    assert_eq!(slots[1]["dayOfWeek"], "Blursday");
    assert_eq!(slots[2]["dayOfWeek"], "tuesday");
}

#[test]
fn remove_keeps_unreadable_records() {
    let output = avail()
        .args(["remove", "--day", "tuesday", "--start", "11:00", "--end", "12:00", "-i"])
        .arg(fixture("malformed.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let slots: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(slots.as_array().unwrap().len(), 1);
    assert_eq!(slots[0]["dayOfWeek"], "Blursday");
}

#[test]
fn add_overlapping_slot_fails() {
    avail()
        .args(["add", "--day", "monday", "--start", "09:30", "--end", "10:30", "-i"])
        .arg(fixture("slots.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlaps an existing one"));
}

#[test]
fn add_short_slot_fails() {
    avail()
        .args(["add", "--day", "friday", "--start", "09:00", "--end", "09:10"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 15 minutes"));
}

#[test]
fn add_respects_configured_minimum() {
    Command::cargo_bin("avail")
        .unwrap()
        .args(["--config", &fixture("strict.toml")])
        .args(["add", "--day", "friday", "--start", "09:00", "--end", "09:45"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 60 minutes"));
}

#[test]
fn add_rejects_malformed_time() {
    avail()
        .args(["add", "--day", "friday", "--start", "9:00", "--end", "10:00"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid slot"));
}

#[test]
fn remove_existing_slot() {
    let output = avail()
        .args(["remove", "--day", "monday", "--start", "09:00", "--end", "10:00", "-i"])
        .arg(fixture("slots.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let slots: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(slots.as_array().unwrap().len(), 2);
}

#[test]
fn remove_missing_slot_fails() {
    avail()
        .args(["remove", "--day", "sunday", "--start", "09:00", "--end", "10:00", "-i"])
        .arg(fixture("slots.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No slot sunday 09:00-10:00"));
}

#[test]
fn list_groups_by_day_and_totals() {
    avail()
        .args(["list", "-i"])
        .arg(fixture("slots.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("monday    09:00-10:00 (1 hr)"))
        .stdout(predicate::str::contains("wednesday 14:00-16:00 (2 hrs)"))
        .stdout(predicate::str::contains("3 slots, 4 hrs 30 mins per week"));
}

#[test]
fn malformed_records_are_skipped_with_warning() {
    avail()
        .args(["list", "-i"])
        .arg(fixture("malformed.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("1 slots"))
        .stderr(predicate::str::contains("skipping malformed availability record"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Durations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn duration_text() {
    avail()
        .args(["duration", "09:00", "17:00"])
        .assert()
        .success()
        .stdout("8 hrs\n");
}

#[test]
fn duration_minutes() {
    avail()
        .args(["duration", "09:00", "09:30", "--minutes"])
        .assert()
        .success()
        .stdout("30\n");
}

#[test]
fn negative_duration_is_invalid() {
    avail()
        .args(["duration", "09:00", "08:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Audit, gaps, sessions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_clean_collection() {
    avail()
        .args(["check", "-i"])
        .arg(fixture("slots.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No overlapping slots (3 checked)"));
}

#[test]
fn check_reports_overlaps() {
    avail()
        .args(["check", "-i"])
        .arg(fixture("overlapping.json"))
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "friday 09:00-11:00 overlaps friday 10:30-12:00 by 30 min",
        ))
        .stderr(predicate::str::contains("1 overlapping slot pair(s) found"));
}

#[test]
fn gaps_between_slots() {
    avail()
        .args(["gaps", "--day", "Monday", "--from", "08:00", "--to", "18:00", "-i"])
        .arg(fixture("slots.json"))
        .assert()
        .success()
        .stdout("08:00-09:00 (1 hr)\n10:00-13:00 (3 hrs)\n14:30-18:00 (3 hrs 30 mins)\n");
}

#[test]
fn sessions_split_into_lessons() {
    let output = avail()
        .args([
            "--tz", "UTC", "sessions", "--from", "2026-02-09", "--to", "2026-02-09", "--lesson", "30", "-i",
        ])
        .arg(fixture("slots.json"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let sessions: Value = serde_json::from_slice(&output.stdout).unwrap();
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 5);
    assert_eq!(sessions[0]["start"], "2026-02-09T09:00:00Z");
    assert_eq!(sessions[4]["end"], "2026-02-09T14:30:00Z");
}

#[test]
fn sessions_require_timezone() {
    avail()
        .args(["sessions", "--from", "2026-02-09", "--to", "2026-02-09"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("need a timezone"));
}

#[test]
fn invalid_timezone_rejected() {
    avail()
        .args(["--tz", "Atlantis/Capital", "duration", "09:00", "10:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}
