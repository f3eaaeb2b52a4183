// File: ./src/model/item.rs
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Marker used for Saturdays and Sundays: non-working day, no entry
/// expected. Mutually exclusive with real goal entries.
pub const WEEKEND_SENTINEL: &str = "X";

// --- DATE FORMAT ---

/// Serde codec for the report's wire format: dates travel as
/// slash-separated "YYYY/MM/DD" strings, not chrono's ISO default.
pub mod slash_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y/%m/%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

// --- REPORT ENTRIES ---

/// One calendar day of the report. `goals` is either empty, exactly the
/// weekend sentinel, or a list of accomplishment strings; the three cases
/// never mix.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DailyGoals {
    #[serde(with = "slash_date")]
    pub date: NaiveDate,
    pub goals: Vec<String>,
}

/// Borrowed view of the entry trichotomy, used by display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind<'a> {
    Weekend,
    Empty,
    Goals(&'a [String]),
}

impl DailyGoals {
    pub fn weekend(date: NaiveDate) -> Self {
        Self {
            date,
            goals: vec![WEEKEND_SENTINEL.to_string()],
        }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            goals: Vec::new(),
        }
    }

    pub fn with_goals(date: NaiveDate, goals: Vec<String>) -> Self {
        Self { date, goals }
    }

    pub fn kind(&self) -> DayKind<'_> {
        if self.goals.iter().any(|g| g == WEEKEND_SENTINEL) {
            DayKind::Weekend
        } else if self.goals.is_empty() {
            DayKind::Empty
        } else {
            DayKind::Goals(&self.goals)
        }
    }
}

// --- CALENDAR HELPERS ---

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of days in the given Gregorian month (leap-aware).
/// None for an invalid month number.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_kind_trichotomy() {
        let date = d(2024, 6, 3);
        assert_eq!(DailyGoals::weekend(date).kind(), DayKind::Weekend);
        assert_eq!(DailyGoals::empty(date).kind(), DayKind::Empty);

        let entry = DailyGoals::with_goals(date, vec!["Fixed bug".to_string()]);
        match entry.kind() {
            DayKind::Goals(goals) => assert_eq!(goals, ["Fixed bug".to_string()]),
            other => panic!("expected Goals, got {:?}", other),
        }
    }

    #[test]
    fn test_sentinel_wins_over_mixed_content() {
        // A hand-built entry mixing the sentinel with text still renders
        // as a weekend; constructors never produce this shape.
        let entry = DailyGoals::with_goals(
            d(2024, 6, 1),
            vec!["X".to_string(), "stray".to_string()],
        );
        assert_eq!(entry.kind(), DayKind::Weekend);
    }

    #[test]
    fn test_serde_uses_slash_dates() {
        let entry = DailyGoals::with_goals(d(2024, 6, 3), vec!["Wrote tests".to_string()]);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"2024/06/03\""), "got: {}", json);

        let back: DailyGoals = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29)); // leap year
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 6), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(d(2024, 6, 1))); // Saturday
        assert!(is_weekend(d(2024, 6, 2))); // Sunday
        assert!(!is_weekend(d(2024, 6, 3))); // Monday
    }
}
