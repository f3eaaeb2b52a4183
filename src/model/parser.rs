// File: src/model/parser.rs
use crate::model::item::{DailyGoals, days_in_month, is_weekend};
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- BOUNDARY MARKERS ---

pub const DEFAULT_ACCOMPLISHMENT_PROMPT: &str =
    "What could you say you have accomplished today?";
pub const DEFAULT_WRAP_UP_PHRASE: &str = "How close are we";
pub const DEFAULT_SUMMARY_MARKER: &str = "💡";

fn default_accomplishment_prompt() -> String {
    DEFAULT_ACCOMPLISHMENT_PROMPT.to_string()
}
fn default_wrap_up_phrase() -> String {
    DEFAULT_WRAP_UP_PHRASE.to_string()
}
fn default_summary_marker() -> String {
    DEFAULT_SUMMARY_MARKER.to_string()
}

/// The literal phrases the report format hinges on. The pipeline never
/// hardcodes them; swapping a phrase here retargets the whole extraction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Markers {
    /// Question line introducing the goal list inside a person block.
    #[serde(default = "default_accomplishment_prompt")]
    pub accomplishment_prompt: String,
    /// Phrase that closes the goal list (start of the follow-up question).
    #[serde(default = "default_wrap_up_phrase")]
    pub wrap_up_phrase: String,
    /// First text of the daily-summary heading that ends a person block.
    #[serde(default = "default_summary_marker")]
    pub summary_marker: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            accomplishment_prompt: default_accomplishment_prompt(),
            wrap_up_phrase: default_wrap_up_phrase(),
            summary_marker: default_summary_marker(),
        }
    }
}

// --- TEXT SCANNING HELPERS ---

/// Byte offset of the first occurrence of `needle` in `haystack`,
/// ignoring ASCII case. Non-ASCII bytes must match exactly.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| {
        haystack
            .get(i..i + needle.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(needle))
    })
}

/// Strips a heading prefix of three or more '#' characters.
fn strip_heading_hashes(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches('#');
    if line.len() - rest.len() >= 3 {
        Some(rest)
    } else {
        None
    }
}

/// Recognizes a day header of the target month: 3+ '#', whitespace, then
/// "YYYY/MM/" (the precomputed `month_prefix`) and a two-digit day.
/// Returns the day key and the remainder of the line after it.
fn parse_day_header<'a>(line: &'a str, month_prefix: &str) -> Option<(&'a str, &'a str)> {
    let rest = strip_heading_hashes(line.trim_start())?;
    let unpadded = rest.trim_start();
    if unpadded.len() == rest.len() {
        // At least one whitespace character is required after the hashes.
        return None;
    }
    let after_prefix = unpadded.strip_prefix(month_prefix)?;
    let day = after_prefix.get(..2)?;
    if day.bytes().all(|b| b.is_ascii_digit()) {
        Some((day, &after_prefix[2..]))
    } else {
        None
    }
}

/// True for lines that end a person block: another date-style heading
/// (3+ '#' then a 4-digit year), a heading-style "Word:" header, or the
/// daily-summary heading.
fn is_block_terminator(line: &str, markers: &Markers) -> bool {
    let Some(rest) = strip_heading_hashes(line.trim_start()) else {
        return false;
    };
    let rest = rest.trim_start();

    if rest.len() >= 4 && rest.as_bytes()[..4].iter().all(u8::is_ascii_digit) {
        return true;
    }

    let word_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if word_end > 0 && rest[word_end..].starts_with(':') {
        return true;
    }

    !markers.summary_marker.is_empty() && rest.starts_with(markers.summary_marker.as_str())
}

/// If `line` starts a person block for `name` (heading-style
/// "#### Name:" or bare "Name:" at line start, ASCII case-insensitive),
/// returns the text following the colon.
fn person_header_rest<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let candidate = match strip_heading_hashes(trimmed) {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    };
    let head = candidate.get(..name.len())?;
    if head.eq_ignore_ascii_case(name) && candidate[name.len()..].starts_with(':') {
        Some(&candidate[name.len() + 1..])
    } else {
        None
    }
}

// --- PIPELINE STAGES ---

/// Stage 1: splits the document into per-day sections for the given
/// year/month. Day headers of other months are ordinary text. A repeated
/// day header replaces the earlier section. Text before the first header
/// is discarded.
pub fn segment_month_sections(document: &str, year: i32, month: u32) -> HashMap<String, String> {
    let month_prefix = format!("{:04}/{:02}/", year, month);
    let mut sections: HashMap<String, String> = HashMap::new();
    let mut current: Option<(String, String)> = None;

    for line in document.lines() {
        if let Some((day, rest)) = parse_day_header(line, &month_prefix) {
            if let Some((prev_day, buf)) = current.take() {
                sections.insert(prev_day, buf);
            }
            current = Some((day.to_string(), rest.to_string()));
        } else if let Some((_, buf)) = current.as_mut() {
            buf.push('\n');
            buf.push_str(line);
        }
    }
    if let Some((day, buf)) = current.take() {
        sections.insert(day, buf);
    }
    sections
}

/// Stage 2: isolates the queried person's subsection of one day.
/// The block runs from the text after "Name:" to the first terminator
/// line or the end of the section. The first matching header wins.
pub fn find_person_block(content: &str, name: &str, markers: &Markers) -> Option<String> {
    let mut lines = content.lines();
    let mut block = String::new();

    loop {
        let line = lines.next()?;
        if let Some(rest) = person_header_rest(line, name) {
            block.push_str(rest);
            break;
        }
    }
    for line in lines {
        if is_block_terminator(line, markers) {
            break;
        }
        block.push('\n');
        block.push_str(line);
    }
    Some(block)
}

/// Stage 3: collects the "- " bullets under the accomplishment prompt.
/// Capture ends at a blank line, a dash line that is not a bullet, the
/// wrap-up phrase (which may cut a line short), or the end of the block.
/// Returns an empty list when the prompt is missing or nothing qualifies.
pub fn extract_goal_items(block: &str, markers: &Markers) -> Vec<String> {
    let Some(at) = find_ignore_ascii_case(block, &markers.accomplishment_prompt) else {
        return Vec::new();
    };
    let after = &block[at + markers.accomplishment_prompt.len()..];

    let mut items = Vec::new();
    for (idx, raw_line) in after.lines().enumerate() {
        let (line, hit_wrap_up) = match find_ignore_ascii_case(raw_line, &markers.wrap_up_phrase) {
            Some(pos) => (&raw_line[..pos], true),
            None => (raw_line, false),
        };
        let trimmed = line.trim();

        // idx 0 is the tail of the prompt's own line; an empty tail there
        // is not a blank-line boundary.
        if trimmed.is_empty() && idx > 0 && !hit_wrap_up {
            break;
        }
        if let Some(goal) = trimmed.strip_prefix("- ") {
            items.push(goal.to_string());
        } else if trimmed.starts_with('-') {
            // A dash line that is not a bullet (e.g. a horizontal rule).
            break;
        }
        if hit_wrap_up {
            break;
        }
    }
    items
}

/// Runs the full pipeline for the month containing `today` and returns
/// one entry per calendar day, ascending. Weekends always carry the
/// sentinel, even when the document has content for them. Every missing
/// stage (day section, person block, prompt, bullets) yields an empty
/// day rather than an error.
pub fn extract_goals(
    document: &str,
    person_name: &str,
    today: NaiveDate,
    markers: &Markers,
) -> Result<Vec<DailyGoals>> {
    let year = today.year();
    let month = today.month();

    let last_day = days_in_month(year, month)
        .ok_or_else(|| anyhow!("Invalid target month: {:04}/{:02}", year, month))?;
    let sections = segment_month_sections(document, year, month);

    let mut report = Vec::with_capacity(last_day as usize);
    for day in 1..=last_day {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            anyhow!("Day {} does not exist in {:04}/{:02}", day, year, month)
        })?;

        if is_weekend(date) {
            report.push(DailyGoals::weekend(date));
            continue;
        }

        let goals = sections
            .get(&format!("{:02}", day))
            .and_then(|content| find_person_block(content, person_name, markers))
            .map(|block| extract_goal_items(&block, markers))
            .unwrap_or_default();

        if goals.is_empty() {
            report.push(DailyGoals::empty(date));
        } else {
            report.push(DailyGoals::with_goals(date, goals));
        }
    }
    Ok(report)
}
