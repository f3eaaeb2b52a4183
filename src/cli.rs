// File: ./src/cli.rs
//! Shared command-line interface logic: help text and the non-interactive
//! `show` / `export` commands.

use crate::config::Config;
use crate::export;
use crate::model::DailyGoals;
use crate::model::display::render_text_report;
use crate::model::parser::extract_goals;
use crate::storage::Prefs;
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::fs;

pub fn print_help(binary_name: &str) {
    println!(
        "Accompli v{} - Extract daily accomplishment reports from standup notes (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!(
        "    {}                                Start interactive TUI",
        binary_name
    );
    println!(
        "    {} show <report.md> <name>        Print the month report for <name>",
        binary_name
    );
    println!(
        "    {} export <report.md> <name>      Print the month report as CSV",
        binary_name
    );
    println!(
        "    {} --help                         Show this help message",
        binary_name
    );
    println!();
    println!("OPTIONS:");
    println!("    --json            With 'show', print the report as JSON.");
    println!("    -h, --help        Show this help message.");
    println!();
    println!("SHOW COMMAND:");
    println!(
        "    {} show standup.md Alice             Text report for Alice",
        binary_name
    );
    println!(
        "    {} show standup.md Alice --json      Machine-readable report",
        binary_name
    );
    println!();
    println!("EXPORT COMMAND:");
    println!(
        "    {} export standup.md Alice                Print CSV report",
        binary_name
    );
    println!(
        "    {} export standup.md Alice > alice.csv    Save report to file",
        binary_name
    );
    println!(
        "    {} export standup.md Alice | tail -n +2   Rows without the header",
        binary_name
    );
    println!();
    println!("KEYBINDINGS:");
    println!("    Press '?' inside the app for full interactive help");
    println!("    o                 Open a report file");
    println!("    n                 Edit the name to search for");
    println!("    g                 Generate the month report");
    println!("    e                 Export the report as CSV");
    println!("    j/k, arrows       Navigate days");
    println!("    Tab               Switch between day list and detail pane");
    println!("    q                 Quit");
    println!();
    println!("MORE INFO:");
    println!("    Repository: https://codeberg.org/trougnouf/accompli");
    println!("    License:    GPL-3.0");
}

/// `accompli show <file> <name> [--json]`
pub fn run_show(path: &str, name: &str, json: bool) -> Result<()> {
    let (report, name) = generate_report(path, name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text_report(&report, &name));
    }
    Ok(())
}

/// `accompli export <file> <name>`: CSV to stdout, redirect to save.
pub fn run_export(path: &str, name: &str) -> Result<()> {
    let (report, _) = generate_report(path, name)?;
    print!("{}", export::report_to_csv(&report));
    Ok(())
}

fn generate_report(path: &str, name: &str) -> Result<(Vec<DailyGoals>, String)> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Please enter a name.");
    }

    let document = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report file '{}'", path))?;
    if document.is_empty() {
        bail!("Please load a Markdown report first.");
    }

    let config = Config::load_or_default()?;
    let today = Local::now().date_naive();

    let report = extract_goals(&document, name, today, &config.markers).map_err(|e| {
        log::error!("Report extraction failed: {:#}", e);
        anyhow::anyhow!("An error occurred while parsing the file. Please check the file format.")
    })?;

    // Remember the inputs so the TUI reopens where the user left off.
    if let Err(e) = persist_inputs(path, &document, name) {
        log::warn!("Could not save preferences: {:#}", e);
    }

    Ok((report, name.to_string()))
}

fn persist_inputs(path: &str, document: &str, name: &str) -> Result<()> {
    let mut prefs = Prefs::load().unwrap_or_default();
    prefs.last_name = Some(name.to_string());
    prefs.document = Some(document.to_string());
    prefs.document_path = Some(path.to_string());
    prefs.save()
}
