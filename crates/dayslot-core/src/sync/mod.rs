//! Google Calendar upload of a finished schedule.
//!
//! Each schedule row becomes one event on the target day, titled with the
//! task, priority and category.

pub mod calendar_client;
pub mod event_codec;
pub mod types;

#[cfg(test)]
mod event_codec_tests;

pub use calendar_client::{
    check_timezone, upload_schedule, CalendarSink, GoogleCalendarClient, GOOGLE_CALENDAR_API,
};
pub use event_codec::{row_to_event, rows_to_events};
pub use types::{
    ConversionFailure, CreatedEvent, EventPayload, EventTime, PreparedEvent, SyncError, SyncReport,
};
