//! Saved schedules.
//!
//! `plan --output` writes the export rows as JSON so that `export` and `sync`
//! can work from the same schedule later, or from one the user edited by hand.

use std::path::Path;

use crate::error::Result;
use crate::export::ExportRow;

pub fn save_rows(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let content = serde_json::to_string_pretty(rows)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_rows(path: &Path) -> Result<Vec<ExportRow>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_rows_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        let rows = vec![ExportRow {
            task: "Plan".into(),
            start: "09:00".into(),
            end: "09:30".into(),
            duration: 0.5,
            priority: Some(1),
            category: "Work".into(),
            date: None,
        }];

        save_rows(&path, &rows).unwrap();
        assert_eq!(load_rows(&path).unwrap(), rows);
    }

    #[test]
    fn hand_written_rows_may_omit_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        std::fs::write(
            &path,
            r#"[{"task":"Break","start":"10:00","end":"10:10","duration":0.17,"priority":null,"category":"Break"}]"#,
        )
        .unwrap();
        let rows = load_rows(&path).unwrap();
        assert_eq!(rows[0].priority, None);
        assert_eq!(rows[0].date, None);
    }
}
