//! Integration tests for the plan -> export -> calendar payload workflow.
//!
//! Drives the library the way the CLI does: read tasks from disk, validate,
//! allocate, filter by date, save the rows and turn them into calendar events.

use chrono::{NaiveDate, NaiveTime};
use dayslot_core::export::{self, rows_from_slots, CategoryPalette, ExportFormat};
use dayslot_core::storage::{schedule_file, task_file, Config};
use dayslot_core::sync::rows_to_events;
use dayslot_core::{validate, Allocator, Overflow, ValidationError};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

const TASKS_TOML: &str = r#"
[[task]]
name = "Write proposal"
duration = 2.0
priority = 2
category = "Work"

[[task]]
name = "Review notes"
duration = 1.0
priority = 1
category = "Study"

[[task]]
name = "Gym"
duration = 1.5
priority = 3
category = "Exercise"

[[task]]
name = "Call supplier"
duration = 0.5
priority = 2
category = "Work"
date = "2026-10-17"
"#;

#[test]
fn test_full_plan_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let tasks_path = dir.path().join("tasks.toml");
    std::fs::write(&tasks_path, TASKS_TOML).unwrap();

    let tasks = task_file::load_tasks(&tasks_path).unwrap();
    let config = Config::default();
    let mut scheduler_config = config.scheduler_config().unwrap();
    scheduler_config.break_frequency = 2;
    validate(&tasks, &scheduler_config).unwrap();

    let allocation = Allocator::with_config(scheduler_config).allocate(&tasks, day());
    assert!(allocation.is_complete());

    let labels: Vec<&str> = allocation.slots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Review notes", "Write proposal", "Break", "Call supplier", "Gym"]
    );

    // the caller only presents today's slots
    let today = allocation.for_date(day());
    let today_labels: Vec<&str> = today.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(today_labels, vec!["Review notes", "Write proposal", "Break", "Gym"]);

    let rows = rows_from_slots(&today);
    let schedule_path = dir.path().join("schedule.json");
    schedule_file::save_rows(&schedule_path, &rows).unwrap();
    let reloaded = schedule_file::load_rows(&schedule_path).unwrap();
    assert_eq!(reloaded, rows);

    let palette = CategoryPalette::from_config(&config.categories);
    let html = export::render(&reloaded, ExportFormat::Html, &palette).unwrap();
    assert!(html.contains("#ADD8E6"));
    let csv = export::render(&reloaded, ExportFormat::Csv, &palette).unwrap();
    assert_eq!(csv.lines().count(), 1 + reloaded.len());

    let (events, failures) = rows_to_events(&reloaded, day(), &config.calendar.timezone);
    assert!(failures.is_empty());
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].payload.summary, "Review notes (Priority: 1, Category: Study)");
    assert_eq!(events[2].payload.start.date_time, "2026-10-16T12:00:00");
    assert_eq!(events[2].payload.end.date_time, "2026-10-16T12:10:00");
}

#[test]
fn test_overflow_keeps_partial_schedule() {
    let tasks = dayslot_core::storage::task_file::parse_toml(TASKS_TOML).unwrap();
    let mut config = Config::default();
    config.scheduler.work_end = "12:00".into();
    let scheduler_config = config.scheduler_config().unwrap();

    let allocation = Allocator::with_config(scheduler_config).allocate(&tasks, day());

    let placed: Vec<&str> = allocation.task_slots().map(|s| s.label.as_str()).collect();
    assert_eq!(placed, vec!["Review notes", "Write proposal"]);
    assert_eq!(
        allocation.slots.last().unwrap().end,
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    );
    assert!(matches!(
        allocation.overflow,
        Some(Overflow::Task { ref name, .. }) if name == "Call supplier"
    ));
    assert_eq!(allocation.unscheduled, vec!["Call supplier", "Gym"]);
}

#[test]
fn test_configuration_errors_are_caught_before_allocation() {
    let mut config = Config::default();
    config.scheduler.work_start = "18:00".into();
    config.scheduler.work_end = "09:00".into();
    let scheduler_config = config.scheduler_config().unwrap();

    let tasks = task_file::parse_toml(TASKS_TOML).unwrap();
    assert!(matches!(
        validate(&tasks, &scheduler_config),
        Err(ValidationError::InvalidWorkWindow { .. })
    ));
    assert_eq!(
        validate(&[], &Config::default().scheduler_config().unwrap()),
        Err(ValidationError::EmptyTaskList)
    );
}
