//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The working window and break cadence used by `plan`
//! - Category names and their export colours
//! - The target calendar and timezone used by `sync`
//!
//! Configuration is stored at `~/.config/dayslot/config.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::scheduler::{parse_clock, SchedulerConfig};

/// Working window and break cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSettings {
    #[serde(default = "default_work_start")]
    pub work_start: String,
    #[serde(default = "default_work_end")]
    pub work_end: String,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
    #[serde(default = "default_break_frequency")]
    pub break_frequency: u32,
}

/// Category names offered to the user and their display colours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    #[serde(default = "default_category_names")]
    pub names: Vec<String>,
    #[serde(default = "default_category_colors")]
    pub colors: BTreeMap<String, String>,
}

/// Calendar sync target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayslot/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub categories: CategoriesConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

// Default functions
fn default_work_start() -> String {
    "09:00".into()
}
fn default_work_end() -> String {
    "18:00".into()
}
fn default_break_minutes() -> i64 {
    10
}
fn default_break_frequency() -> u32 {
    3
}
fn default_category_names() -> Vec<String> {
    ["Work", "Study", "Exercise", "Break", "Other"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_category_colors() -> BTreeMap<String, String> {
    [
        ("Work", "#FFD700"),
        ("Study", "#90EE90"),
        ("Exercise", "#ADD8E6"),
        ("Break", "#D3D3D3"),
        ("Other", "#FFB6C1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
fn default_calendar_id() -> String {
    "primary".into()
}
fn default_timezone() -> String {
    "UTC".into()
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            work_start: default_work_start(),
            work_end: default_work_end(),
            break_minutes: default_break_minutes(),
            break_frequency: default_break_frequency(),
        }
    }
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            names: default_category_names(),
            colors: default_category_colors(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            calendar_id: default_calendar_id(),
            timezone: default_timezone(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/dayslot"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key; call [`Config::save`]
    /// to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be coerced
    /// to the existing value's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Build the allocator configuration from the stored settings.
    pub fn scheduler_config(&self) -> Result<SchedulerConfig, ConfigError> {
        let settings = &self.scheduler;
        let clock = |key: &str, value: &str| {
            parse_clock(value).ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected HH:MM, got '{value}'"),
            })
        };

        Ok(SchedulerConfig {
            work_start: clock("scheduler.work_start", &settings.work_start)?,
            work_end: clock("scheduler.work_end", &settings.work_end)?,
            break_minutes: settings.break_minutes,
            break_frequency: settings.break_frequency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scheduler.work_start, "09:00");
        assert_eq!(parsed.scheduler.break_frequency, 3);
        assert_eq!(parsed.categories.colors["Work"], "#FFD700");
        assert_eq!(parsed.calendar.timezone, "UTC");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[scheduler]\nwork_end = \"17:30\"\n").unwrap();
        assert_eq!(parsed.scheduler.work_start, "09:00");
        assert_eq!(parsed.scheduler.work_end, "17:30");
        assert_eq!(parsed.calendar.calendar_id, "primary");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("scheduler.work_end").as_deref(), Some("18:00"));
        assert_eq!(cfg.get("scheduler.break_minutes").as_deref(), Some("10"));
        assert_eq!(cfg.get("categories.colors.Break").as_deref(), Some("#D3D3D3"));
        assert!(cfg.get("scheduler.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number_and_string() {
        let mut cfg = Config::default();
        cfg.set("scheduler.break_minutes", "15").unwrap();
        cfg.set("calendar.timezone", "Europe/Berlin").unwrap();
        assert_eq!(cfg.scheduler.break_minutes, 15);
        assert_eq!(cfg.calendar.timezone, "Europe/Berlin");
    }

    #[test]
    fn set_accepts_json_for_collections() {
        let mut cfg = Config::default();
        cfg.set("categories.names", r#"["Deep work","Admin"]"#).unwrap();
        assert_eq!(cfg.categories.names, vec!["Deep work", "Admin"]);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("scheduler.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("scheduler.break_frequency", "often"),
            Err(ConfigError::InvalidValue { .. })
        ));
        // negative value does not fit the unsigned field
        assert!(cfg.set("scheduler.break_frequency", "-1").is_err());
        assert_eq!(cfg.scheduler.break_frequency, 3);
    }

    #[test]
    fn scheduler_config_parses_times() {
        let mut cfg = Config::default();
        cfg.scheduler.work_start = "08:30".into();
        let sc = cfg.scheduler_config().unwrap();
        assert_eq!(sc.work_start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(sc.work_end, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(sc.break_minutes, 10);
        assert_eq!(sc.break_frequency, 3);

        cfg.scheduler.work_end = "late".into();
        assert!(matches!(
            cfg.scheduler_config(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "scheduler.work_end"
        ));
    }

    #[test]
    fn load_from_creates_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.scheduler.work_start, "09:00");

        let mut cfg = cfg;
        cfg.set("scheduler.work_start", "07:45").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.scheduler.work_start, "07:45");
    }

    #[test]
    fn load_from_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "scheduler = 12").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
