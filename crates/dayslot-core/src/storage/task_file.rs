//! Task lists read from disk.
//!
//! JSON files hold either a bare array of tasks or `{ "tasks": [...] }`;
//! TOML files use `[[task]]` tables.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::task::Task;

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTasks {
    List(Vec<Task>),
    Wrapped { tasks: Vec<Task> },
}

#[derive(Deserialize)]
struct TomlTasks {
    #[serde(default, rename = "task", alias = "tasks")]
    tasks: Vec<Task>,
}

/// Load tasks from a `.json` or `.toml` file, keeping file order.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    if is_toml {
        parse_toml(&content)
    } else {
        parse_json(&content)
    }
}

pub fn parse_json(content: &str) -> Result<Vec<Task>> {
    Ok(match serde_json::from_str(content)? {
        JsonTasks::List(tasks) | JsonTasks::Wrapped { tasks } => tasks,
    })
}

pub fn parse_toml(content: &str) -> Result<Vec<Task>> {
    let file: TomlTasks = toml::from_str(content)?;
    Ok(file.tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn json_array_and_wrapped_forms() {
        let list =
            parse_json(r#"[{"name":"A","duration":1,"priority":2,"category":"Work"}]"#).unwrap();
        assert_eq!(list, vec![Task::new("A", 1.0, 2, "Work")]);

        let wrapped = parse_json(
            r#"{"tasks":[{"name":"B","duration_hours":0.5,"priority":1,"date":"2026-10-17"}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped[0].name, "B");
        assert_eq!(wrapped[0].date, NaiveDate::from_ymd_opt(2026, 10, 17));
    }

    #[test]
    fn toml_task_tables() {
        let tasks = parse_toml(
            r#"
            [[task]]
            name = "Email"
            duration = 0.5
            priority = 3
            category = "Work"

            [[task]]
            name = "Run"
            duration = 1.0
            priority = 1
            category = "Exercise"
            "#,
        )
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "Email");
        assert_eq!(tasks[1].category, "Exercise");
    }

    #[test]
    fn toml_dates_may_be_bare_or_quoted() {
        let tasks = parse_toml(
            r#"
            [[task]]
            name = "Bare"
            duration = 1.0
            priority = 1
            date = 2026-10-16

            [[task]]
            name = "Quoted"
            duration = 1.0
            priority = 2
            date = "2026-10-17"

            [[task]]
            name = "Stamped"
            duration = 1.0
            priority = 3
            date = 2026-10-18T08:00:00
            "#,
        )
        .unwrap();
        assert_eq!(tasks[0].date, NaiveDate::from_ymd_opt(2026, 10, 16));
        assert_eq!(tasks[1].date, NaiveDate::from_ymd_opt(2026, 10, 17));
        assert_eq!(tasks[2].date, NaiveDate::from_ymd_opt(2026, 10, 18));
    }

    #[test]
    fn dates_without_a_day_are_rejected() {
        let time_only = "[[task]]\nname = \"A\"\nduration = 1\npriority = 1\ndate = 09:00:00\n";
        assert!(parse_toml(time_only).is_err());

        let bad = r#"[{"name":"A","duration":1,"priority":1,"date":"16/10/2026"}]"#;
        assert!(parse_json(bad).is_err());

        let null = r#"[{"name":"A","duration":1,"priority":1,"date":null}]"#;
        assert_eq!(parse_json(null).unwrap()[0].date, None);
    }

    #[test]
    fn load_tasks_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("tasks.toml");
        std::fs::write(&toml_path, "[[task]]\nname = \"A\"\nduration = 2\npriority = 1\n").unwrap();
        let tasks = load_tasks(&toml_path).unwrap();
        assert_eq!(tasks[0].duration_hours, 2.0);
        assert_eq!(tasks[0].category, "Other");

        let json_path = dir.path().join("tasks.json");
        std::fs::write(&json_path, "not json").unwrap();
        assert!(load_tasks(&json_path).is_err());
    }
}
