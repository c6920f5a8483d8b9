//! Priority allocator for a single working day.
//!
//! Tasks are stably sorted by priority (1 first, ties keep input order) and
//! packed back to back from the start of the working window. A break is
//! inserted after every `break_frequency` placed tasks, never after the last
//! task in sorted order. The first task or break that would run past the end
//! of the window stops the run; nothing after it is tried.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::task::Task;

/// Label and category carried by inserted breaks.
pub const BREAK_LABEL: &str = "Break";

/// Longer than any single-day window; keeps time arithmetic in range.
const MAX_SPAN_SECS: i64 = 2 * 86_400;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
    /// Break length (minutes); zero or negative disables breaks
    pub break_minutes: i64,
    /// Insert a break after every N tasks; zero disables breaks
    pub break_frequency: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            work_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            break_minutes: 10,
            break_frequency: 3,
        }
    }
}

impl SchedulerConfig {
    pub fn new(work_start: NaiveTime, work_end: NaiveTime) -> Self {
        Self {
            work_start,
            work_end,
            ..Self::default()
        }
    }

    pub fn with_breaks(mut self, minutes: i64, every: u32) -> Self {
        self.break_minutes = minutes;
        self.break_frequency = every;
        self
    }

    pub fn breaks_enabled(&self) -> bool {
        self.break_minutes > 0 && self.break_frequency > 0
    }
}

/// What a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Task,
    Break,
}

/// A contiguous block of the day assigned to one task or break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub label: String,
    pub kind: SlotKind,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub duration_hours: f64,
    pub priority: Option<i32>,
    pub category: String,
    pub date: NaiveDate,
}

impl ScheduledSlot {
    fn new(
        label: String,
        kind: SlotKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
        priority: Option<i32>,
        category: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            label,
            kind,
            start: start.time(),
            end: end.time(),
            duration_hours: (end - start).num_seconds() as f64 / 3600.0,
            priority,
            category,
            date,
        }
    }

    pub fn is_break(&self) -> bool {
        self.kind == SlotKind::Break
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// The item that first failed to fit before the end of the working window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overflow {
    Task { name: String, would_end: NaiveDateTime },
    Break { after: String, would_end: NaiveDateTime },
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overflow::Task { name, .. } => {
                write!(f, "Task '{name}' cannot fit in the working time.")
            }
            Overflow::Break { after, .. } => {
                write!(f, "Break after '{after}' cannot fit in the working time.")
            }
        }
    }
}

/// Result of one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub slots: Vec<ScheduledSlot>,
    pub overflow: Option<Overflow>,
    /// Names of tasks that were not placed, in priority order.
    pub unscheduled: Vec<String>,
}

impl Allocation {
    /// Whether every task was placed.
    pub fn is_complete(&self) -> bool {
        self.overflow.is_none()
    }

    /// Slots belonging to `date`, in timeline order.
    pub fn for_date(&self, date: NaiveDate) -> Vec<ScheduledSlot> {
        self.slots.iter().filter(|s| s.date == date).cloned().collect()
    }

    pub fn task_slots(&self) -> impl Iterator<Item = &ScheduledSlot> {
        self.slots.iter().filter(|s| s.kind == SlotKind::Task)
    }
}

/// Greedy priority allocator
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: SchedulerConfig,
}

impl Allocator {
    /// Create an allocator with the default 09:00-18:00 window
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Lay `tasks` out on `reference_date`.
    ///
    /// `reference_date` anchors the working window and is the date given to
    /// tasks that carry none. Callers are expected to run [`validate`] first;
    /// an inverted window simply yields an empty schedule.
    pub fn allocate(&self, tasks: &[Task], reference_date: NaiveDate) -> Allocation {
        let config = &self.config;

        let mut order: Vec<&Task> = tasks.iter().collect();
        order.sort_by_key(|t| t.priority);

        let day_end = reference_date.and_time(config.work_end);
        let mut cursor = reference_date.and_time(config.work_start);
        let last = order.len().saturating_sub(1);
        let break_span = break_span(config);

        let mut allocation = Allocation::default();

        for (i, task) in order.iter().enumerate() {
            let end = cursor + task_span(task);
            if end > day_end {
                tracing::info!("Task '{}' cannot fit in the working time.", task.name);
                allocation.overflow = Some(Overflow::Task {
                    name: task.name.clone(),
                    would_end: end,
                });
                allocation.unscheduled = names(&order[i..]);
                break;
            }

            let date = task.date_or(reference_date);
            tracing::debug!("placing '{}' {} - {}", task.name, cursor.time(), end.time());
            allocation.slots.push(ScheduledSlot::new(
                task.name.clone(),
                SlotKind::Task,
                cursor,
                end,
                Some(task.priority),
                task.category.clone(),
                date,
            ));
            cursor = end;

            let Some(span) = break_span else { continue };
            if (i + 1) % config.break_frequency as usize != 0 || i >= last {
                continue;
            }

            let break_end = cursor + span;
            if break_end > day_end {
                tracing::info!("Break after '{}' cannot fit in the working time.", task.name);
                allocation.overflow = Some(Overflow::Break {
                    after: task.name.clone(),
                    would_end: break_end,
                });
                allocation.unscheduled = names(&order[i + 1..]);
                break;
            }

            tracing::debug!("placing break {} - {}", cursor.time(), break_end.time());
            allocation.slots.push(ScheduledSlot::new(
                BREAK_LABEL.to_string(),
                SlotKind::Break,
                cursor,
                break_end,
                None,
                BREAK_LABEL.to_string(),
                date,
            ));
            cursor = break_end;
        }

        allocation
    }
}

/// Allocate with an explicit configuration. See [`Allocator::allocate`].
pub fn allocate(tasks: &[Task], config: &SchedulerConfig, reference_date: NaiveDate) -> Allocation {
    Allocator::with_config(config.clone()).allocate(tasks, reference_date)
}

/// Caller-side pre-check run before [`allocate`].
pub fn validate(tasks: &[Task], config: &SchedulerConfig) -> Result<(), ValidationError> {
    if tasks.is_empty() {
        return Err(ValidationError::EmptyTaskList);
    }
    if config.work_start >= config.work_end {
        return Err(ValidationError::InvalidWorkWindow {
            start: config.work_start,
            end: config.work_end,
        });
    }
    for task in tasks {
        if task.name.trim().is_empty() {
            return Err(ValidationError::invalid("name", "task name must not be empty"));
        }
        if !task.duration_hours.is_finite() || task.duration_hours <= 0.0 {
            return Err(ValidationError::invalid(
                "duration",
                format!("'{}' must have a positive duration in hours", task.name),
            ));
        }
    }
    Ok(())
}

/// Parse a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Task length rounded to whole seconds; negative or NaN counts as zero.
fn task_span(task: &Task) -> Duration {
    let secs = (task.duration_hours * 3600.0).round();
    let secs = if secs.is_nan() { 0 } else { secs as i64 };
    Duration::seconds(secs.clamp(0, MAX_SPAN_SECS))
}

fn break_span(config: &SchedulerConfig) -> Option<Duration> {
    config
        .breaks_enabled()
        .then(|| Duration::minutes(config.break_minutes.min(MAX_SPAN_SECS / 60)))
}

fn names(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.name.clone()).collect()
}
