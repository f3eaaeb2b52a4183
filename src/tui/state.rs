// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::model::{DailyGoals, Markers};
use chrono::NaiveDate;
use ratatui::widgets::ListState;

#[derive(PartialEq, Clone, Copy)]
pub enum Focus {
    Days,
    Detail,
}

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    EditingName,
    EditingPath,
}

pub struct AppState {
    // Data
    pub name: String,
    pub document: Option<String>,
    pub document_path: Option<String>,
    pub report: Vec<DailyGoals>,

    // Configuration copied at startup
    pub markers: Markers,
    pub export_dir: Option<String>,

    // UI State
    pub list_state: ListState,
    pub active_focus: Focus,
    pub mode: InputMode,
    pub message: String,
    pub show_full_help: bool,
    pub detail_scroll: u16,

    // Input Buffers
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            document: None,
            document_path: None,
            report: vec![],
            markers: Markers::default(),
            export_dir: None,
            list_state: ListState::default(),
            active_focus: Focus::Days,
            mode: InputMode::Normal,
            message: "Press 'o' to open a report, 'n' to set a name.".to_string(),
            show_full_help: false,
            detail_scroll: 0,
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    /// Install a freshly generated report and select today's entry.
    pub fn set_report(&mut self, report: Vec<DailyGoals>, today: NaiveDate) {
        self.report = report;
        self.detail_scroll = 0;
        if self.report.is_empty() {
            self.list_state.select(None);
        } else {
            let idx = self
                .report
                .iter()
                .position(|d| d.date == today)
                .unwrap_or(0);
            self.list_state.select(Some(idx));
        }
    }

    pub fn selected_day(&self) -> Option<&DailyGoals> {
        if let Some(idx) = self.list_state.selected() {
            self.report.get(idx)
        } else {
            None
        }
    }

    // --- INPUT HELPERS ---
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        // Safe insertion for UTF-8 strings
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    /// Pre-fill the input buffer with existing text, cursor at the end.
    pub fn seed_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.cursor_position = self.input_buffer.chars().count();
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        match self.active_focus {
            Focus::Days => {
                if self.report.is_empty() {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) => {
                        if i >= self.report.len() - 1 {
                            0
                        } else {
                            i + 1
                        }
                    }
                    None => 0,
                };
                self.list_state.select(Some(i));
                self.detail_scroll = 0;
            }
            Focus::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_add(1);
            }
        }
    }
    pub fn previous(&mut self) {
        match self.active_focus {
            Focus::Days => {
                if self.report.is_empty() {
                    return;
                }
                let i = match self.list_state.selected() {
                    Some(i) => {
                        if i == 0 {
                            self.report.len() - 1
                        } else {
                            i - 1
                        }
                    }
                    None => 0,
                };
                self.list_state.select(Some(i));
                self.detail_scroll = 0;
            }
            Focus::Detail => {
                self.detail_scroll = self.detail_scroll.saturating_sub(1);
            }
        }
    }
    pub fn jump_forward(&mut self, step: usize) {
        if self.active_focus == Focus::Days && !self.report.is_empty() {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state
                .select(Some((current + step).min(self.report.len() - 1)));
            self.detail_scroll = 0;
        }
    }
    pub fn jump_backward(&mut self, step: usize) {
        if self.active_focus == Focus::Days && !self.report.is_empty() {
            let current = self.list_state.selected().unwrap_or(0);
            self.list_state.select(Some(current.saturating_sub(step)));
            self.detail_scroll = 0;
        }
    }
    pub fn toggle_focus(&mut self) {
        self.active_focus = match self.active_focus {
            Focus::Days => Focus::Detail,
            Focus::Detail => Focus::Days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_day(day: u32) -> DailyGoals {
        DailyGoals::empty(NaiveDate::from_ymd_opt(2024, 6, day).unwrap())
    }

    #[test]
    fn test_navigation_next_wraps() {
        let mut state = AppState::new();
        state.report = vec![dummy_day(1), dummy_day(2), dummy_day(3)];

        // Start at 0
        state.list_state.select(Some(0));

        state.next(); // 1
        assert_eq!(state.list_state.selected(), Some(1));

        state.next(); // 2
        assert_eq!(state.list_state.selected(), Some(2));

        state.next(); // Wrap to 0
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_navigation_previous_wraps() {
        let mut state = AppState::new();
        state.report = vec![dummy_day(1), dummy_day(2), dummy_day(3)];

        state.list_state.select(Some(0));

        state.previous(); // Wrap to last (2)
        assert_eq!(state.list_state.selected(), Some(2));

        state.previous(); // 1
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_navigation_empty_list_safety() {
        let mut state = AppState::new();
        state.report = vec![]; // Empty

        // Should not panic
        state.next();
        state.previous();
    }

    #[test]
    fn test_cursor_clamping() {
        let mut state = AppState::new();
        state.input_buffer = "abc".to_string(); // len 3
        state.cursor_position = 0;

        state.move_cursor_right(); // 1
        state.move_cursor_right(); // 2
        state.move_cursor_right(); // 3 (after 'c')
        state.move_cursor_right(); // Should stay 3

        assert_eq!(state.cursor_position, 3);

        state.move_cursor_left(); // 2
        state.move_cursor_left(); // 1
        state.move_cursor_left(); // 0
        state.move_cursor_left(); // Should stay 0

        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_set_report_selects_today() {
        let mut state = AppState::new();
        let today = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        state.set_report(vec![dummy_day(1), dummy_day(2), dummy_day(3)], today);

        assert_eq!(state.list_state.selected(), Some(1));

        // A date outside the report falls back to the first entry.
        let elsewhere = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        state.set_report(vec![dummy_day(1), dummy_day(2)], elsewhere);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_detail_scroll_focus() {
        let mut state = AppState::new();
        state.report = vec![dummy_day(1), dummy_day(2)];
        state.list_state.select(Some(0));
        state.active_focus = Focus::Detail;

        state.next();
        state.next();
        assert_eq!(state.detail_scroll, 2);
        assert_eq!(state.list_state.selected(), Some(0)); // list untouched

        state.previous();
        assert_eq!(state.detail_scroll, 1);

        // Switching back to the list resets scroll on movement.
        state.toggle_focus();
        state.next();
        assert_eq!(state.detail_scroll, 0);
    }
}
