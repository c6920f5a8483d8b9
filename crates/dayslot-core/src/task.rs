//! Task input model.
//!
//! A task is what the user asks to get done today: a name, how long it takes
//! in hours, a priority rank (1 = earliest) and a category label used for
//! colour coding on export.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A task to be placed on the day's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(alias = "duration")]
    pub duration_hours: f64,
    pub priority: i32,
    #[serde(default = "default_category")]
    pub category: String,
    /// Calendar day the task belongs to; `None` means the reference date.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_date"
    )]
    pub date: Option<NaiveDate>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Accepts `"YYYY-MM-DD"` from any format and bare TOML date literals.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<toml::Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(toml::Value::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid date '{s}': {e}"))),
        Some(toml::Value::Datetime(dt)) => {
            let date = dt
                .date
                .ok_or_else(|| D::Error::custom(format!("'{dt}' has no calendar date")))?;
            NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date '{dt}'")))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected a YYYY-MM-DD date, got {}",
            other.type_str()
        ))),
    }
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        duration_hours: f64,
        priority: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            duration_hours,
            priority,
            category: category.into(),
            date: None,
        }
    }

    /// Pin the task to a specific day.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Date of this task, falling back to `reference` when unset.
    pub fn date_or(&self, reference: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(reference)
    }

    /// Parse the compact `name:hours:priority[:category]` form.
    ///
    /// The name may not contain `:`; surrounding whitespace is trimmed from
    /// every field.
    pub fn parse_spec(spec: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
        if parts.len() < 3 || parts.len() > 4 {
            return Err(ValidationError::invalid(
                "task",
                format!("expected name:hours:priority[:category], got '{spec}'"),
            ));
        }

        let name = parts[0];
        if name.is_empty() {
            return Err(ValidationError::invalid("task", "name must not be empty"));
        }

        let duration_hours: f64 = parts[1].parse().map_err(|_| {
            ValidationError::invalid("duration", format!("cannot parse '{}' as hours", parts[1]))
        })?;
        let priority: i32 = parts[2].parse().map_err(|_| {
            ValidationError::invalid("priority", format!("cannot parse '{}' as integer", parts[2]))
        })?;
        let category = match parts.get(3) {
            Some(c) if !c.is_empty() => *c,
            _ => DEFAULT_CATEGORY,
        };

        Ok(Task::new(name, duration_hours, priority, category))
    }
}
