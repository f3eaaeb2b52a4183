// File: ./src/model/display.rs
use crate::model::item::{DailyGoals, DayKind, WEEKEND_SENTINEL, slash_date};
use crate::model::parser::Markers;

/// Placeholder shown for weekdays without any extracted goals.
pub const NO_GOALS_PLACEHOLDER: &str = "No goals recorded";

pub trait GoalsDisplay {
    fn date_label(&self) -> String;
    fn summary_line(&self) -> String;
}

impl GoalsDisplay for DailyGoals {
    fn date_label(&self) -> String {
        self.date.format(slash_date::FORMAT).to_string()
    }

    /// One-line form for list views: the sentinel or placeholder verbatim,
    /// otherwise the goals slash-joined.
    fn summary_line(&self) -> String {
        match self.kind() {
            DayKind::Weekend => WEEKEND_SENTINEL.to_string(),
            DayKind::Empty => NO_GOALS_PLACEHOLDER.to_string(),
            DayKind::Goals(goals) => goals.join(" / "),
        }
    }
}

/// Plain-text rendering of a whole report, one dated section per day.
/// Used by the `show` subcommand.
pub fn render_text_report(report: &[DailyGoals], name: &str) -> String {
    let mut out = format!("Goals for {}\n", name);
    for entry in report {
        out.push('\n');
        out.push_str(&entry.date_label());
        out.push('\n');
        match entry.kind() {
            DayKind::Weekend => {
                out.push_str("  ");
                out.push_str(WEEKEND_SENTINEL);
                out.push('\n');
            }
            DayKind::Empty => {
                out.push_str("  ");
                out.push_str(NO_GOALS_PLACEHOLDER);
                out.push('\n');
            }
            DayKind::Goals(goals) => {
                for goal in goals {
                    out.push_str("  - ");
                    out.push_str(goal);
                    out.push('\n');
                }
            }
        }
    }
    out
}

/// Renders a report back into the standup-document shape it is extracted
/// from. Weekend and empty days produce a bare day header; days with
/// goals get a person section with the prompt and its bullets.
pub fn report_to_markdown(report: &[DailyGoals], name: &str, markers: &Markers) -> String {
    let mut out = String::new();
    for entry in report {
        out.push_str("### ");
        out.push_str(&entry.date_label());
        out.push('\n');
        if let DayKind::Goals(goals) = entry.kind() {
            out.push_str(&format!("#### {}:\n", name));
            out.push_str(&markers.accomplishment_prompt);
            out.push('\n');
            for goal in goals {
                out.push_str("- ");
                out.push_str(goal);
                out.push('\n');
            }
            out.push_str(&format!("{} to being done?\n", markers.wrap_up_phrase));
        }
        out.push('\n');
    }
    out
}
