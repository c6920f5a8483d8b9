//! Google Calendar client and the batch upload built on top of it.

use std::future::Future;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};

use crate::export::ExportRow;
use crate::sync::event_codec::rows_to_events;
use crate::sync::types::{CreatedEvent, EventPayload, SyncError, SyncReport};

/// Default Calendar API root.
pub const GOOGLE_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// Anything that can store calendar events.
pub trait CalendarSink {
    /// Insert `event` into `calendar_id`, returning the new event's ID.
    fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventPayload,
    ) -> impl Future<Output = Result<String, SyncError>> + Send;
}

/// Google Calendar API client.
pub struct GoogleCalendarClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl GoogleCalendarClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: GOOGLE_CALENDAR_API.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Point the client at another API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(calendar_id)
        )
    }
}

impl CalendarSink for GoogleCalendarClient {
    fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventPayload,
    ) -> impl Future<Output = Result<String, SyncError>> + Send {
        let url = self.events_url(calendar_id);
        async move {
            let resp = self
                .http
                .post(&url)
                .bearer_auth(&self.access_token)
                .json(event)
                .send()
                .await?;

            match resp.status() {
                StatusCode::UNAUTHORIZED => return Err(SyncError::AuthenticationRequired),
                StatusCode::TOO_MANY_REQUESTS => return Err(SyncError::RateLimited),
                _ => {}
            }

            let body: serde_json::Value = resp.json().await?;
            if let Some(err) = body.get("error") {
                return Err(SyncError::CalendarApi(err.to_string()));
            }

            body["id"]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| SyncError::CalendarApi("missing event id in response".into()))
        }
    }
}

/// Trim `timezone` and reject identifiers the calendar can never accept.
///
/// The name itself is passed through unchanged; the API resolves it.
pub fn check_timezone(timezone: &str) -> Result<&str, SyncError> {
    let timezone = timezone.trim();
    if timezone.is_empty() || timezone.contains(char::is_whitespace) {
        return Err(SyncError::InvalidTimezone(timezone.to_string()));
    }
    Ok(timezone)
}

/// Push every row of a schedule to the calendar.
///
/// Rows whose times or date cannot be read are reported in
/// [`SyncReport::failures`] and skipped; the rest are still submitted. An API
/// error stops the upload.
pub async fn upload_schedule<S: CalendarSink>(
    sink: &S,
    calendar_id: &str,
    rows: &[ExportRow],
    target_date: NaiveDate,
    timezone: &str,
) -> Result<SyncReport, SyncError> {
    let timezone = check_timezone(timezone)?;

    let (events, failures) = rows_to_events(rows, target_date, timezone);
    for failure in &failures {
        tracing::error!("{failure}");
    }

    let mut report = SyncReport {
        created: Vec::with_capacity(events.len()),
        failures,
    };

    for event in events {
        let event_id = sink.insert_event(calendar_id, &event.payload).await?;
        tracing::debug!("created event {} for '{}'", event_id, event.task);
        report.created.push(CreatedEvent {
            task: event.task,
            event_id,
        });
    }

    tracing::info!(
        "Uploaded {} events to calendar '{}'",
        report.created.len(),
        calendar_id
    );
    Ok(report)
}
