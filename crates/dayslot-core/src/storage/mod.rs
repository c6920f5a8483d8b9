mod config;
pub mod schedule_file;
pub mod task_file;

pub use config::{CalendarConfig, CategoriesConfig, Config, SchedulerSettings};

use std::path::PathBuf;

/// Returns `~/.config/dayslot[-dev]/` based on DAYSLOT_ENV.
///
/// Set DAYSLOT_ENV=dev to use the development data directory, or
/// DAYSLOT_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("DAYSLOT_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYSLOT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dayslot-dev")
            } else {
                base_dir.join("dayslot")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
