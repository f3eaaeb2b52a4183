// Defines actions produced by input handling for the TUI loop.
use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    LoadFile(PathBuf),
    Generate,
    Export,
    Quit,
}
