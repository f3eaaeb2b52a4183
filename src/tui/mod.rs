// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::config;
use crate::storage::Prefs;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};

pub fn run() -> Result<()> {
    // Panic Hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("accompli_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    let cfg = match config::Config::load() {
        Ok(c) => c,
        Err(e) => {
            // A missing config file just means defaults. Anything else is a
            // syntax/permission error; report it and exit instead of running
            // with settings the user did not ask for.
            if !config::Config::is_missing_config_error(&e) {
                eprintln!("Error loading configuration:\n{}", e);
                std::process::exit(1);
            }
            config::Config::default()
        }
    };

    let (prefs, prefs_load_failed) = match Prefs::load() {
        Ok(p) => (p, false),
        Err(e) => {
            log::error!("Could not load preferences: {:#}", e);
            (Prefs::default(), true)
        }
    };

    // --- TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- STATE INIT ---
    let mut app_state = AppState::new();
    app_state.markers = cfg.markers;
    app_state.export_dir = cfg.export_dir;
    app_state.name = prefs.last_name.unwrap_or(cfg.default_name);
    app_state.document = prefs.document;
    app_state.document_path = prefs.document_path;

    // Reopen where the user left off: with a stored document and name the
    // report is regenerated immediately.
    if app_state.document.is_some() && !app_state.name.trim().is_empty() {
        handlers::perform_action(&mut app_state, Action::Generate);
    }
    if prefs_load_failed {
        app_state.message =
            "Could not load saved preferences; continuing without them.".to_string();
    }

    // --- UI LOOP ---
    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        if crossterm::event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            match event {
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app_state.next(),
                    MouseEventKind::ScrollUp => app_state.previous(),
                    _ => {}
                },
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }

                    if let Some(action) = handlers::handle_key_event(key, &mut app_state) {
                        if matches!(action, Action::Quit) {
                            break;
                        }
                        handlers::perform_action(&mut app_state, action);
                    }
                }
                _ => {}
            }
        }
    }

    // --- CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
