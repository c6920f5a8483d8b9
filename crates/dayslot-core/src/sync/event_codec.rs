//! Conversion from schedule rows to calendar event payloads.

use chrono::{NaiveDate, NaiveTime};

use crate::export::ExportRow;
use crate::sync::types::{ConversionFailure, EventPayload, EventTime, PreparedEvent};

/// Event title shown in the calendar.
pub fn event_summary(row: &ExportRow) -> String {
    format!(
        "{} (Priority: {}, Category: {})",
        row.task,
        row.priority_label(),
        row.category
    )
}

/// Event body text.
pub fn event_description(row: &ExportRow) -> String {
    format!(
        "Duration: {:.2} hours\nCategory: {}\nPriority: {}",
        row.duration,
        row.category,
        row.priority_label()
    )
}

/// Build the payload for one row.
///
/// The row's own date wins; `target_date` is used when it has none.
pub fn row_to_event(
    row: &ExportRow,
    target_date: NaiveDate,
    timezone: &str,
) -> Result<EventPayload, ConversionFailure> {
    let failure = |reason: String| ConversionFailure {
        task: row.task.clone(),
        reason,
    };

    let start = NaiveTime::parse_from_str(&row.start, "%H:%M")
        .map_err(|_| failure(format!("invalid start time '{}'", row.start)))?;
    let end = NaiveTime::parse_from_str(&row.end, "%H:%M")
        .map_err(|_| failure(format!("invalid end time '{}'", row.end)))?;
    let date = match row.date.as_deref() {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| failure(format!("invalid date '{d}'")))?,
        None => target_date,
    };
    if end < start {
        return Err(failure(format!("end {} is before start {}", row.end, row.start)));
    }

    let stamp = |time: NaiveTime| EventTime {
        date_time: date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string(),
        time_zone: timezone.to_string(),
    };

    Ok(EventPayload {
        summary: event_summary(row),
        description: event_description(row),
        start: stamp(start),
        end: stamp(end),
    })
}

/// Convert a batch; bad rows are collected rather than stopping the batch.
pub fn rows_to_events(
    rows: &[ExportRow],
    target_date: NaiveDate,
    timezone: &str,
) -> (Vec<PreparedEvent>, Vec<ConversionFailure>) {
    let mut events = Vec::with_capacity(rows.len());
    let mut failures = Vec::new();

    for row in rows {
        match row_to_event(row, target_date, timezone) {
            Ok(payload) => events.push(PreparedEvent {
                task: row.task.clone(),
                payload,
            }),
            Err(failure) => failures.push(failure),
        }
    }

    (events, failures)
}
