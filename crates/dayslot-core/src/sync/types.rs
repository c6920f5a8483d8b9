//! Core types for calendar synchronization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Start or end of a calendar event: a local wall-clock time plus the
/// timezone it should be read in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// `YYYY-MM-DDTHH:MM:SS`, no offset
    pub date_time: String,
    pub time_zone: String,
}

/// Body of a calendar event insert request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// A schedule row ready to be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedEvent {
    pub task: String,
    pub payload: EventPayload,
}

/// A row whose time or date could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionFailure {
    pub task: String,
    pub reason: String,
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time or Date format error in task: {} ({})", self.task, self.reason)
    }
}

/// An event the calendar accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub task: String,
    pub event_id: String,
}

/// Outcome of one upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub created: Vec<CreatedEvent>,
    pub failures: Vec<ConversionFailure>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sync error types.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Calendar API error: {0}")]
    CalendarApi(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid timezone identifier: '{0}'")]
    InvalidTimezone(String),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Rate limited")]
    RateLimited,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_calendar_field_names() {
        let payload = EventPayload {
            summary: "Focus".into(),
            description: "Duration: 1.00 hours".into(),
            start: EventTime {
                date_time: "2026-10-16T09:00:00".into(),
                time_zone: "UTC".into(),
            },
            end: EventTime {
                date_time: "2026-10-16T10:00:00".into(),
                time_zone: "UTC".into(),
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["start"]["dateTime"], "2026-10-16T09:00:00");
        assert_eq!(json["end"]["timeZone"], "UTC");
    }

    #[test]
    fn report_is_clean_without_failures() {
        let mut report = SyncReport::default();
        assert!(report.is_clean());
        report.failures.push(ConversionFailure {
            task: "x".into(),
            reason: "bad".into(),
        });
        assert!(!report.is_clean());
    }
}
