//! Partners - Terminal Partner Program
//!
//! Keeps a list of business and community partners in a CSV file and
//! lets the user search, sort, add, edit and remove them from a
//! terminal interface. Every change is written back to the file at once.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use partners::application::{App, AppMode};
use partners::infrastructure::{PartnerRepository, DEFAULT_PATH};
use partners::presentation::{render_ui, InputHandler};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "partners")]
#[command(about = "Search and maintain business and community partners")]
struct Args {
    /// Partner data file
    #[arg(short, long, value_name = "PATH", env = "PARTNERS_FILE", default_value = DEFAULT_PATH)]
    file: PathBuf,

    /// Write logs to this file
    #[arg(long, value_name = "PATH", env = "PARTNERS_LOG")]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the partner program.
///
/// Loads the partner file before touching the terminal so a malformed
/// file is reported on a normal screen, then runs the event loop until
/// the user exits.
///
/// # Errors
///
/// Returns an error if the log file or partner file cannot be read, or
/// if terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        setup_tracing(log_file, args.verbose)?;
    }

    let mut app = App::load(PartnerRepository::new(&args.file))?;
    tracing::info!(path = %args.file.display(), "starting partners");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal error");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode or
/// Ctrl+C anywhere. Nothing needs flushing on exit since every change
/// was already saved.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            }
        }
    }
}

fn setup_tracing(log_path: &Path, verbose: bool) -> io::Result<()> {
    use std::fs::OpenOptions;
    use std::sync::Mutex;

    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("partners=debug")
        } else {
            EnvFilter::new("partners=info")
        }
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(path = %log_path.display(), "tracing initialized");
    Ok(())
}
