// File: ./src/export.rs
// CSV export of a generated month report.
use crate::model::{DailyGoals, DayKind, WEEKEND_SENTINEL};
use crate::storage::LocalStorage;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Render a month report as CSV text: a `Goals` header line, then one
/// line per day in report order.
///
/// Days with no recorded goals repeat the most recent recorded goals, so
/// a task spanning several days keeps appearing until it changes. Weekend
/// rows are the bare sentinel and do not disturb the carried value.
pub fn report_to_csv(report: &[DailyGoals]) -> String {
    let mut csv = String::from("Goals\n");
    let mut last_known: Vec<String> = Vec::new();

    for day in report {
        let row = match day.kind() {
            DayKind::Weekend => WEEKEND_SENTINEL.to_string(),
            DayKind::Goals(goals) => {
                last_known = goals.to_vec();
                join_escaped(goals)
            }
            DayKind::Empty => {
                if last_known.is_empty() {
                    "No goals".to_string()
                } else {
                    join_escaped(&last_known)
                }
            }
        };
        csv.push_str(&row);
        csv.push('\n');
    }

    csv
}

// Double quotes are doubled; no other characters are treated specially.
fn join_escaped(goals: &[String]) -> String {
    goals
        .iter()
        .map(|goal| goal.replace('"', "\"\""))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// File name used for a person's exported report.
pub fn csv_filename(name: &str) -> String {
    format!("{}_goals_daily_report.csv", name)
}

/// Where the CSV for `name` lands: the configured export directory, or
/// the current working directory when none is set.
pub fn resolve_export_path(export_dir: Option<&str>, name: &str) -> PathBuf {
    let dir = export_dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    dir.join(csv_filename(name))
}

/// Write the report to `path` as CSV.
pub fn write_csv(path: &Path, report: &[DailyGoals]) -> Result<()> {
    let csv = report_to_csv(report);
    LocalStorage::atomic_write(path, csv)
        .with_context(|| format!("Failed to write CSV to '{}'", path.display()))?;
    Ok(())
}
