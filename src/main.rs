use std::io;
use std::path::Path;

use clap::Parser;

/// Interactive incremental code search with a live preview pane
#[derive(Parser, Debug)]
#[command(
    name = "glint",
    version,
    about,
    after_help = "TUI controls:\n  Type to search, Up/Down navigate, Enter to open, Ctrl+C to quit, Tab toggles case mode"
)]
struct Args {
    /// Case-insensitive search (CLI mode; the interactive session toggles with Tab)
    #[arg(short = 'i')]
    case_insensitive: bool,

    /// Force one-shot CLI mode instead of the interactive session
    #[arg(long)]
    cli: bool,

    /// Search term (required for CLI mode)
    term: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let root = Path::new(".");

    if args.cli {
        if let Some(term) = args.term.as_deref() {
            return glint::cli::run(term, root, args.case_insensitive);
        }
    }

    let _logging = glint::logging::init();
    glint::tui::run(root)?;
    clear_terminal()
}

fn clear_terminal() -> io::Result<()> {
    use crossterm::cursor::MoveTo;
    use crossterm::execute;
    use crossterm::terminal::{Clear, ClearType};

    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
}
