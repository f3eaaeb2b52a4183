use accompli::cli;
use accompli::paths::AppPaths;
use anyhow::Result;
use std::env;

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();

    // Handle help flag
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        cli::print_help("accompli");
        return Ok(());
    }

    // CLI Command: accompli show <report.md> <name> [--json]
    if args.len() > 1 && args[1] == "show" {
        if args.len() < 4 {
            eprintln!("Usage: accompli show <report.md> <name> [--json]");
            std::process::exit(2);
        }
        let json = args.iter().skip(4).any(|a| a == "--json");
        return cli::run_show(&args[2], &args[3], json);
    }

    // CLI Command: accompli export <report.md> <name>
    if args.len() > 1 && args[1] == "export" {
        if args.len() < 4 {
            eprintln!("Usage: accompli export <report.md> <name>");
            std::process::exit(2);
        }
        return cli::run_export(&args[2], &args[3]);
    }

    // Normal TUI startup
    accompli::tui::run()
}

// Opt-in file logging: set ACCOMPLI_LOG to write accompli.log into the
// data directory. The TUI owns the terminal, so stderr is not an option.
fn init_logging() {
    if env::var("ACCOMPLI_LOG").is_err() {
        return;
    }
    if let Ok(path) = AppPaths::get_log_file_path()
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = simplelog::WriteLogger::init(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            file,
        );
    }
}
