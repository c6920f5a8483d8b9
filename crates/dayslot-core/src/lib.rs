//! # dayslot Core Library
//!
//! This library lays a day's tasks out inside a working-hours window. Tasks are
//! ordered by priority and packed back to back, with short breaks inserted
//! after every few tasks. The `dayslot` CLI is a thin layer over the same
//! library.
//!
//! ## Architecture
//!
//! - **Scheduler**: the pure allocator that turns a task list into a timeline
//! - **Storage**: TOML configuration plus task and schedule files
//! - **Export**: CSV, colour-coded HTML, text and JSON renderings of a schedule
//! - **Sync**: Google Calendar upload of a finished schedule
//!
//! ## Key Components
//!
//! - [`Allocator`]: priority allocator
//! - [`Config`]: Application configuration management
//! - [`CalendarSink`]: Destination for calendar events

pub mod error;
pub mod export;
pub mod integrations;
pub mod scheduler;
pub mod storage;
pub mod sync;
pub mod task;

pub use error::{ConfigError, CoreError, OAuthError, ValidationError};
pub use export::{CategoryPalette, ExportFormat, ExportRow};
pub use scheduler::{
    allocate, validate, Allocation, Allocator, Overflow, ScheduledSlot, SchedulerConfig, SlotKind,
};
pub use storage::Config;
pub use sync::{upload_schedule, CalendarSink, GoogleCalendarClient, SyncError, SyncReport};
pub use task::Task;
