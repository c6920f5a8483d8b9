//! Schedule export.
//!
//! Flattens scheduled slots into [`ExportRow`]s (times as `HH:MM`, dates as
//! `YYYY-MM-DD`) and renders them as CSV, a colour-coded HTML table, plain
//! text lines or JSON.

mod palette;

pub use palette::{CategoryPalette, FALLBACK_COLOR};

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::scheduler::ScheduledSlot;

/// One exported line of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub task: String,
    pub start: String,
    pub end: String,
    pub duration: f64,
    pub priority: Option<i32>,
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl ExportRow {
    pub fn from_slot(slot: &ScheduledSlot) -> Self {
        Self {
            task: slot.label.clone(),
            start: slot.start.format("%H:%M").to_string(),
            end: slot.end.format("%H:%M").to_string(),
            duration: slot.duration_hours,
            priority: slot.priority,
            category: slot.category.clone(),
            date: Some(slot.date.format("%Y-%m-%d").to_string()),
        }
    }

    /// Priority as printed in documents and calendar text.
    pub fn priority_label(&self) -> String {
        self.priority
            .map(|p| p.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

pub fn rows_from_slots(slots: &[ScheduledSlot]) -> Vec<ExportRow> {
    slots.iter().map(ExportRow::from_slot).collect()
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Html,
    Text,
    Json,
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ValidationError::invalid(
                "format",
                format!("unsupported export format '{other}' (csv, html, text, json)"),
            )),
        }
    }
}

/// Render `rows` in `format`.
pub fn render(
    rows: &[ExportRow],
    format: ExportFormat,
    palette: &CategoryPalette,
) -> Result<String, serde_json::Error> {
    Ok(match format {
        ExportFormat::Csv => to_csv(rows),
        ExportFormat::Html => to_html(rows, palette),
        ExportFormat::Text => to_text(rows),
        ExportFormat::Json => serde_json::to_string_pretty(rows)?,
    })
}

const CSV_HEADER: &str = "task,start,end,duration,priority,category,date";

pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push_str("\r\n");
    for row in rows {
        let fields = [
            csv_field(&row.task),
            row.start.clone(),
            row.end.clone(),
            format!("{:.2}", row.duration),
            row.priority.map(|p| p.to_string()).unwrap_or_default(),
            csv_field(&row.category),
            row.date.clone().unwrap_or_default(),
        ];
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// HTML table, each row shaded with its category colour.
pub fn to_html(rows: &[ExportRow], palette: &CategoryPalette) -> String {
    let mut out = String::from("<table class=\"schedule\">\n");
    out.push_str(
        "  <tr><th>Task</th><th>Start</th><th>End</th><th>Duration</th>\
         <th>Priority</th><th>Category</th><th>Date</th></tr>\n",
    );
    for row in rows {
        let _ = writeln!(
            out,
            "  <tr style=\"background-color: {}\"><td>{}</td><td>{}</td><td>{}</td>\
             <td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            palette.color_for(&row.category),
            html_escape(&row.task),
            row.start,
            row.end,
            row.duration,
            row.priority_label(),
            html_escape(&row.category),
            row.date.as_deref().unwrap_or(""),
        );
    }
    out.push_str("</table>\n");
    out
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// One printable line per slot.
pub fn to_text(rows: &[ExportRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{} ({}) - {} to {} on {} ({:.2} hrs, Priority: {})",
            row.task,
            row.category,
            row.start,
            row.end,
            row.date.as_deref().unwrap_or("N/A"),
            row.duration,
            row.priority_label(),
        );
    }
    out
}
