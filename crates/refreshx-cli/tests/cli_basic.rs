//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_refreshx"))
        .env("REFRESHX_DATA_DIR", data_dir)
        .env_remove("REFRESHX_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let stdout = run_ok(data_dir, args);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn office_hours(dir: &Path) {
    run_ok(dir, &["config", "set", "profile.job_start", "09:00"]);
    run_ok(dir, &["config", "set", "profile.job_end", "17:00"]);
    run_ok(dir, &["config", "set", "profile.num_breaks", "5"]);
}

#[test]
fn test_config_defaults_written_on_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["config", "get", "reminders.lead_minutes"]);
    assert_eq!(out.trim(), "5");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["config", "set", "profile.num_breaks", "3"]);
    let out = run_ok(dir.path(), &["config", "get", "profile.num_breaks"]);
    assert_eq!(out.trim(), "3");

    let list = run_ok(dir.path(), &["config", "list"]);
    assert!(list.contains("profile.num_breaks = 3"));

    run_ok(dir.path(), &["config", "reset"]);
    let out = run_ok(dir.path(), &["config", "get", "profile.num_breaks"]);
    assert_eq!(out.trim(), "5");
}

#[test]
fn test_config_weight_can_be_cleared() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["config", "set", "profile.weight", "72.5"]);
    let out = run_ok(dir.path(), &["config", "get", "profile.weight"]);
    assert_eq!(out.trim(), "72.5");

    run_ok(dir.path(), &["config", "set", "profile.weight", "none"]);
    let out = run_ok(dir.path(), &["config", "get", "profile.weight"]);
    assert_eq!(out.trim(), "null");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "profile.shoe_size", "42"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error"));

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_schedule_for_date() {
    let dir = tempfile::tempdir().unwrap();
    office_hours(dir.path());

    // 2024-03-11 is a Monday
    let plan = run_json(dir.path(), &["schedule", "today", "--date", "2024-03-11"]);
    assert_eq!(plan["working_day"], true);
    assert_eq!(plan["interval_minutes"], 80);
    let breaks: Vec<&str> = plan["breaks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        breaks,
        vec![
            "2024-03-11T10:20:00",
            "2024-03-11T11:40:00",
            "2024-03-11T13:00:00",
            "2024-03-11T14:20:00",
            "2024-03-11T15:40:00",
        ]
    );

    // Sunday is not in the default working days
    let plan = run_json(dir.path(), &["schedule", "today", "--date", "2024-03-10"]);
    assert_eq!(plan["working_day"], false);
    assert!(plan["breaks"].as_array().unwrap().is_empty());
}

#[test]
fn test_schedule_bad_date_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["schedule", "today", "--date", "11/03/2024"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("YYYY-MM-DD"));
}

#[test]
fn test_schedule_next_and_reminders() {
    let dir = tempfile::tempdir().unwrap();
    office_hours(dir.path());

    let next = run_json(dir.path(), &["schedule", "next"]);
    assert!(next["status"].is_string());

    let plan = run_json(dir.path(), &["reminders", "plan"]);
    let reminders = plan.as_array().unwrap();
    assert!(reminders.len() <= 5);
    for r in reminders {
        assert_eq!(r["title"], "Break Reminder");
    }
}

#[test]
fn test_exercise_and_routine() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(
        dir.path(),
        &["exercise", "add", "neck", "Neck roll", "--focus-area", "back", "--duration", "20", "--repetitions", "3"],
    );
    run_ok(dir.path(), &["exercise", "add", "palming", "Palming", "--focus-area", "eye"]);

    let list = run_json(dir.path(), &["exercise", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 2);

    run_ok(dir.path(), &["routine", "add", "palming"]);
    run_ok(dir.path(), &["routine", "add", "neck"]);
    let routine = run_json(dir.path(), &["routine", "list"]);
    assert_eq!(routine[0]["id"], "palming");
    assert_eq!(routine[1]["id"], "neck");

    run_ok(dir.path(), &["routine", "remove", "palming"]);
    let routine = run_json(dir.path(), &["routine", "list"]);
    assert_eq!(routine.as_array().unwrap().len(), 1);

    let (_, _, code) = run_cli(dir.path(), &["routine", "add", "missing"]);
    assert_ne!(code, 0);
}

#[test]
fn test_break_start_and_finish() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["exercise", "add", "neck", "Neck roll", "--focus-area", "back"]);
    run_ok(dir.path(), &["routine", "add", "neck"]);

    let session = run_json(dir.path(), &["break", "start"]);
    assert_eq!(session["state"], "running");
    assert_eq!(session["routine"][0], "neck");
    assert_eq!(session["remaining_secs"], 20 * 60);
    let id = session["event"]["id"].as_str().unwrap().to_string();

    let finished = run_json(dir.path(), &["break", "finish", &id, "--exercise", "neck"]);
    assert_eq!(finished["completed"], true);

    let history = run_json(dir.path(), &["break", "list"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["exercise_id"], "neck");
}

#[test]
fn test_break_log_and_day_stats() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(
        dir.path(),
        &["exercise", "add", "neck", "Neck roll", "--focus-area", "back", "--duration", "20", "--repetitions", "3"],
    );
    run_ok(dir.path(), &["config", "set", "profile.weight", "70"]);
    run_ok(
        dir.path(),
        &["break", "log", "--at", "2024-03-11T12:00:00Z", "--completed", "--exercise", "neck"],
    );

    let detail = run_json(dir.path(), &["stats", "day", "2024-03-11"]);
    assert_eq!(detail["breaks"].as_array().unwrap().len(), 1);
    let kcal = detail["calories_burned"].as_f64().unwrap();
    assert!((kcal - 1.8375).abs() < 1e-9);

    let streak = run_json(dir.path(), &["stats", "streak"]);
    assert!(streak["streak"].is_u64());

    let today = run_json(dir.path(), &["stats", "today"]);
    assert!(today["goal_progress"].is_number());
}

#[test]
fn test_break_log_rejects_unknown_exercise() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["break", "log", "--exercise", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_users_are_separate() {
    let dir = tempfile::tempdir().unwrap();
    let other = "0b6f5c1e-1111-4c1b-8f6f-2d0c7d1f9a10";
    run_ok(dir.path(), &["break", "log", "--completed"]);
    let mine = run_json(dir.path(), &["break", "list"]);
    let theirs = run_json(dir.path(), &["--user", other, "break", "list"]);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert!(theirs.as_array().unwrap().is_empty());
}

#[test]
fn test_profile_show() {
    let dir = tempfile::tempdir().unwrap();
    let shown = run_json(dir.path(), &["profile", "show"]);
    assert!(shown["bmi"].is_null());
    assert_eq!(shown["profile"]["num_breaks"], 5);

    run_ok(dir.path(), &["config", "set", "profile.height", "180"]);
    run_ok(dir.path(), &["config", "set", "profile.weight", "90"]);
    let shown = run_json(dir.path(), &["profile", "show"]);
    assert_eq!(shown["bmi_category"], "Overweight");
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["completions", "bash"]);
    assert!(out.contains("refreshx"));
}

#[test]
fn test_stats_calendar_groups_recent_days() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["break", "log", "--completed"]);
    run_ok(dir.path(), &["break", "log", "--at", "2001-01-01T12:00:00Z"]);

    let calendar = run_json(dir.path(), &["stats", "calendar", "--days", "7"]);
    let days = calendar.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["completed"], 1);
    assert_eq!(days[0]["total"], 1);
}

#[test]
fn test_stats_calendar_with_huge_span_covers_all_history() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["break", "log", "--completed"]);
    run_ok(dir.path(), &["break", "log", "--at", "2001-01-01T12:00:00Z"]);

    let (stdout, stderr, code) = run_cli(dir.path(), &["stats", "calendar", "--days", "4000000000"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let calendar: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days = calendar.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2001-01-01");
    assert_eq!(days[0]["total"], 1);
}

#[test]
fn test_second_break_start_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["break", "start"]);
    let (_, stderr, code) = run_cli(dir.path(), &["break", "start"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already in progress"));
}
