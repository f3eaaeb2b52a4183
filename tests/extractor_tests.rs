// Integration tests for the full extraction pipeline: segmentation,
// person isolation, goal capture, and calendar backfilling.
use accompli::model::item::{days_in_month, is_weekend};
use accompli::model::parser::{Markers, extract_goals};
use accompli::model::{DayKind, WEEKEND_SENTINEL};
use chrono::{Datelike, NaiveDate};

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

// One recorded weekday (2024/06/03 is a Monday) in an otherwise
// unremarkable month.
const JUNE_DOC: &str = "### 2024/06/03\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Fixed bug\n\
- Wrote tests\n\
How close are we to being done?\n";

// ==================== Calendar Shape Tests ====================

#[test]
fn test_report_covers_every_calendar_day() {
    let report = extract_goals(JUNE_DOC, "Alice", june(3), &Markers::default()).unwrap();

    assert_eq!(report.len(), 30, "June has 30 days");
    for (i, entry) in report.iter().enumerate() {
        assert_eq!(entry.date, june(i as u32 + 1), "dates must ascend day by day");
        assert_eq!(entry.date.month(), 6);
        assert_eq!(entry.date.year(), 2024);
    }
}

#[test]
fn test_recorded_day_yields_its_goals() {
    let report = extract_goals(JUNE_DOC, "Alice", june(3), &Markers::default()).unwrap();

    assert_eq!(
        report[2].goals,
        vec!["Fixed bug".to_string(), "Wrote tests".to_string()]
    );

    // Every other day is a weekend sentinel or empty, never goals.
    for entry in report.iter().filter(|e| e.date != june(3)) {
        assert!(
            !matches!(entry.kind(), DayKind::Goals(_)),
            "unexpected goals on {}",
            entry.date
        );
    }
}

#[test]
fn test_weekends_always_carry_sentinel() {
    // Content exists for Saturday the 1st; the weekend rule must win.
    let doc = "### 2024/06/01\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Worked the weekend\n\
How close are we to being done?\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();

    for entry in &report {
        if is_weekend(entry.date) {
            assert_eq!(
                entry.goals,
                vec![WEEKEND_SENTINEL.to_string()],
                "{} is a weekend",
                entry.date
            );
        }
    }
    assert_eq!(report[0].kind(), DayKind::Weekend);
}

#[test]
fn test_leap_february_has_29_entries() {
    let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    let report = extract_goals("", "Alice", today, &Markers::default()).unwrap();

    assert_eq!(report.len(), 29);
    assert_eq!(days_in_month(2024, 2), Some(29));
}

// ==================== Name Matching Tests ====================

#[test]
fn test_name_matching_is_case_insensitive() {
    let doc = "### 2024/06/03\n\
#### ALICE:\n\
What could you say you have accomplished today?\n\
- Shipped feature\n\
How close are we to being done?\n";

    let report = extract_goals(doc, "alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].goals, vec!["Shipped feature".to_string()]);
}

#[test]
fn test_bare_name_header_matches() {
    // A "Name:" line without heading hashes starts a block too.
    let doc = "### 2024/06/03\n\
Alice:\n\
What could you say you have accomplished today?\n\
- Reviewed PRs\n\
How close are we to being done?\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].goals, vec!["Reviewed PRs".to_string()]);
}

#[test]
fn test_substring_name_does_not_match() {
    let doc = "### 2024/06/03\n\
#### Malice:\n\
What could you say you have accomplished today?\n\
- Plotted revenge\n\
How close are we to being done?\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].kind(), DayKind::Empty);

    // The prefix does not match the longer name either.
    let report = extract_goals(doc, "Mal", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].kind(), DayKind::Empty);
}

// ==================== Structure Tests ====================

#[test]
fn test_other_month_headers_are_ordinary_text() {
    // A May section before any June header is discarded entirely.
    let doc = "### 2024/05/10\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Old stuff\n\
How close are we to being done?\n\
### 2024/06/03\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- June work\n\
How close are we to being done?\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();

    assert_eq!(report[2].goals, vec!["June work".to_string()]);
    for entry in &report {
        assert!(
            !entry.goals.iter().any(|g| g == "Old stuff"),
            "May content leaked into {}",
            entry.date
        );
    }
}

#[test]
fn test_repeated_day_header_keeps_last_section() {
    let doc = "### 2024/06/03\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Morning entry\n\
How close are we to being done?\n\
### 2024/06/03\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Corrected entry\n\
How close are we to being done?\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].goals, vec!["Corrected entry".to_string()]);
}

#[test]
fn test_single_digit_day_header_is_ignored() {
    // Day headers use two-digit days; "2024/06/3" is ordinary text.
    let doc = "### 2024/06/3\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Should not appear\n\
How close are we to being done?\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].kind(), DayKind::Empty);
}

#[test]
fn test_next_person_header_ends_block() {
    let doc = "### 2024/06/03\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Alice item\n\
#### Bob:\n\
What could you say you have accomplished today?\n\
- Bob item\n\
How close are we to being done?\n";

    let markers = Markers::default();
    let alice = extract_goals(doc, "Alice", june(3), &markers).unwrap();
    assert_eq!(alice[2].goals, vec!["Alice item".to_string()]);

    let bob = extract_goals(doc, "Bob", june(3), &markers).unwrap();
    assert_eq!(bob[2].goals, vec!["Bob item".to_string()]);
}

#[test]
fn test_summary_heading_ends_block() {
    // Bullets under the daily-summary heading belong to nobody.
    let doc = "### 2024/06/03\n\
#### Alice:\n\
What could you say you have accomplished today?\n\
- Fixed bug\n\
### 💡 Team summary\n\
- Summary item\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].goals, vec!["Fixed bug".to_string()]);
}

// ==================== Absence Tests ====================

#[test]
fn test_missing_prompt_yields_empty_day() {
    let doc = "### 2024/06/03\n\
#### Alice:\n\
Rough day, nothing structured to report.\n\
- A stray bullet without the prompt\n";

    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].kind(), DayKind::Empty);
}

#[test]
fn test_empty_document_yields_empty_month() {
    let report = extract_goals("", "Alice", june(3), &Markers::default()).unwrap();

    assert_eq!(report.len(), 30);
    for entry in &report {
        match entry.kind() {
            DayKind::Weekend => assert!(is_weekend(entry.date)),
            DayKind::Empty => assert!(!is_weekend(entry.date)),
            DayKind::Goals(goals) => panic!("goals from nowhere: {:?}", goals),
        }
    }
}

#[test]
fn test_absent_person_yields_empty_month() {
    let report = extract_goals(JUNE_DOC, "Carol", june(3), &Markers::default()).unwrap();
    assert!(report.iter().all(|e| !matches!(e.kind(), DayKind::Goals(_))));
}

// ==================== Purity Tests ====================

#[test]
fn test_extraction_is_idempotent() {
    let markers = Markers::default();
    let first = extract_goals(JUNE_DOC, "Alice", june(3), &markers).unwrap();
    let second = extract_goals(JUNE_DOC, "Alice", june(3), &markers).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_markers_retarget_extraction() {
    let doc = "### 2024/06/03\n\
#### Alice:\n\
Qu'avez-vous accompli aujourd'hui ?\n\
- Corrigé un bug\n\
Où en sommes-nous ?\n";

    let markers = Markers {
        accomplishment_prompt: "Qu'avez-vous accompli aujourd'hui ?".to_string(),
        wrap_up_phrase: "Où en sommes-nous".to_string(),
        summary_marker: "💡".to_string(),
    };

    let report = extract_goals(doc, "Alice", june(3), &markers).unwrap();
    assert_eq!(report[2].goals, vec!["Corrigé un bug".to_string()]);

    // The default English markers find nothing in this document.
    let report = extract_goals(doc, "Alice", june(3), &Markers::default()).unwrap();
    assert_eq!(report[2].kind(), DayKind::Empty);
}
