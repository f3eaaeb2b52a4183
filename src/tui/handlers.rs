// File: src/tui/handlers.rs
// Handles keyboard input and executes actions for the TUI.
use crate::export;
use crate::model::DayKind;
use crate::model::parser::extract_goals;
use crate::storage::Prefs;
use crate::tui::action::Action;
use crate::tui::state::{AppState, InputMode};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use std::fs;
use std::path::{Path, PathBuf};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match state.mode {
        InputMode::EditingName => match key.code {
            KeyCode::Enter => {
                state.name = state.input_buffer.trim().to_string();
                state.mode = InputMode::Normal;
                state.reset_input();
                if state.name.is_empty() {
                    state.message = "Please enter a name.".to_string();
                    return None;
                }
                return Some(Action::Generate);
            }
            KeyCode::Esc => {
                state.mode = InputMode::Normal;
                state.reset_input();
            }
            KeyCode::Char(c) => state.enter_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            _ => {}
        },
        InputMode::EditingPath => match key.code {
            KeyCode::Enter => {
                let path = state.input_buffer.trim().to_string();
                state.mode = InputMode::Normal;
                state.reset_input();
                if path.is_empty() {
                    return None;
                }
                return Some(Action::LoadFile(PathBuf::from(path)));
            }
            KeyCode::Esc => {
                state.mode = InputMode::Normal;
                state.reset_input();
            }
            KeyCode::Char(c) => state.enter_char(c),
            KeyCode::Backspace => state.delete_char(),
            KeyCode::Left => state.move_cursor_left(),
            KeyCode::Right => state.move_cursor_right(),
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
            KeyCode::Esc => {
                if state.show_full_help {
                    state.show_full_help = false;
                } else {
                    return Some(Action::Quit);
                }
            }
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('n') => {
                state.mode = InputMode::EditingName;
                let name = state.name.clone();
                state.seed_input(&name);
            }
            KeyCode::Char('o') => {
                state.mode = InputMode::EditingPath;
                let path = state.document_path.clone().unwrap_or_default();
                state.seed_input(&path);
            }
            KeyCode::Char('g') | KeyCode::Enter => return Some(Action::Generate),
            KeyCode::Char('e') => return Some(Action::Export),
            KeyCode::Char('j') | KeyCode::Down => state.next(),
            KeyCode::Char('k') | KeyCode::Up => state.previous(),
            KeyCode::PageDown => state.jump_forward(7),
            KeyCode::PageUp => state.jump_backward(7),
            KeyCode::Tab => state.toggle_focus(),
            _ => {}
        },
    }
    None
}

/// Execute an action against the state. `Action::Quit` is handled by the
/// main loop and is a no-op here.
pub fn perform_action(state: &mut AppState, action: Action) {
    match action {
        Action::LoadFile(path) => load_file(state, &path),
        Action::Generate => generate(state),
        Action::Export => export_csv(state),
        Action::Quit => {}
    }
}

fn load_file(state: &mut AppState, path: &Path) {
    match fs::read_to_string(path) {
        Ok(text) => {
            state.document = Some(text);
            state.document_path = Some(path.display().to_string());
            if state.name.trim().is_empty() {
                state.message = format!("Loaded '{}'. Press 'n' to set a name.", path.display());
                persist_prefs(state);
            } else {
                generate(state);
            }
        }
        Err(e) => {
            state.message = format!("Could not read '{}': {}", path.display(), e);
        }
    }
}

fn generate(state: &mut AppState) {
    // A zero-byte file loads as Some(""); treat it like no document.
    let document = state.document.clone().unwrap_or_default();
    if document.is_empty() {
        state.message = "Please load a Markdown report first.".to_string();
        return;
    }
    let name = state.name.trim().to_string();
    if name.is_empty() {
        state.message = "Please enter a name.".to_string();
        return;
    }

    let today = Local::now().date_naive();
    match extract_goals(&document, &name, today, &state.markers) {
        Ok(report) => {
            let recorded = report
                .iter()
                .filter(|d| matches!(d.kind(), DayKind::Goals(_)))
                .count();
            state.message = format!(
                "Generated {} for {} ({} days with goals).",
                today.format("%Y/%m"),
                name,
                recorded
            );
            state.set_report(report, today);
            persist_prefs(state);
        }
        Err(e) => {
            log::error!("Report extraction failed: {:#}", e);
            state.message =
                "An error occurred while parsing the file. Please check the file format."
                    .to_string();
        }
    }
}

fn export_csv(state: &mut AppState) {
    if state.report.is_empty() {
        state.message = "No goals to export. Please generate goals first.".to_string();
        return;
    }

    let path = export::resolve_export_path(state.export_dir.as_deref(), state.name.trim());
    match export::write_csv(&path, &state.report) {
        Ok(()) => state.message = format!("Exported to '{}'.", path.display()),
        Err(e) => state.message = format!("Export failed: {}", e),
    }
}

// Saving preferences is best-effort; a corrupt prefs file blocks the save
// and the session simply continues without persistence.
fn persist_prefs(state: &AppState) {
    let mut prefs = Prefs::load().unwrap_or_default();
    prefs.last_name = if state.name.trim().is_empty() {
        None
    } else {
        Some(state.name.trim().to_string())
    };
    prefs.document = state.document.clone();
    prefs.document_path = state.document_path.clone();
    if let Err(e) = prefs.save() {
        log::warn!("Could not save preferences: {:#}", e);
    }
}
