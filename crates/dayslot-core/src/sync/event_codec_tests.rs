//! Tests for event_codec module.

#[cfg(test)]
mod tests {
    use super::super::event_codec::*;
    use crate::export::ExportRow;
    use chrono::NaiveDate;

    fn row(task: &str, start: &str, end: &str, priority: Option<i32>) -> ExportRow {
        ExportRow {
            task: task.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            duration: 1.0,
            priority,
            category: if priority.is_some() { "Work" } else { "Break" }.to_string(),
            date: Some("2026-10-16".to_string()),
        }
    }

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_summary_and_description() {
        let r = row("Report", "09:00", "10:00", Some(2));
        assert_eq!(event_summary(&r), "Report (Priority: 2, Category: Work)");
        assert_eq!(
            event_description(&r),
            "Duration: 1.00 hours\nCategory: Work\nPriority: 2"
        );
    }

    #[test]
    fn test_break_row_has_no_priority() {
        let r = row("Break", "10:00", "10:10", None);
        assert_eq!(event_summary(&r), "Break (Priority: N/A, Category: Break)");
    }

    #[test]
    fn test_row_date_combines_with_times() {
        let r = row("Report", "09:00", "10:30", Some(1));
        let event = row_to_event(&r, target(), "Europe/Paris").unwrap();
        assert_eq!(event.start.date_time, "2026-10-16T09:00:00");
        assert_eq!(event.end.date_time, "2026-10-16T10:30:00");
        assert_eq!(event.start.time_zone, "Europe/Paris");
    }

    #[test]
    fn test_missing_date_uses_target() {
        let mut r = row("Report", "09:00", "10:00", Some(1));
        r.date = None;
        let event = row_to_event(&r, target(), "UTC").unwrap();
        assert_eq!(event.start.date_time, "2026-01-01T09:00:00");
    }

    #[test]
    fn test_bad_values_are_reported_per_row() {
        let rows = vec![
            row("good", "09:00", "10:00", Some(1)),
            row("bad-start", "nine", "10:00", Some(2)),
            {
                let mut r = row("bad-date", "10:00", "11:00", Some(3));
                r.date = Some("16/10/2026".into());
                r
            },
            row("backwards", "12:00", "11:00", Some(4)),
            row("also-good", "11:00", "12:00", Some(5)),
        ];

        let (events, failures) = rows_to_events(&rows, target(), "UTC");

        let converted: Vec<&str> = events.iter().map(|e| e.task.as_str()).collect();
        assert_eq!(converted, vec!["good", "also-good"]);

        let failed: Vec<&str> = failures.iter().map(|f| f.task.as_str()).collect();
        assert_eq!(failed, vec!["bad-start", "bad-date", "backwards"]);
        assert!(failures[0].reason.contains("start"));
        assert!(failures[1].reason.contains("date"));
    }
}
