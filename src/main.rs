//! citycast - search a city and view its weather
//!
//! A terminal dashboard showing current conditions, a 7-day forecast and
//! hourly detail from Open-Meteo. With `--print` it writes a plain-text
//! report for `--city` and exits.

use std::error::Error;
use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use citycast::app::App;
use citycast::cli::{Cli, StartupConfig};
use citycast::session::Session;
use citycast::{logging, report, ui};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Searches `--city` once and prints the report to stdout
async fn run_print(config: StartupConfig) -> ExitCode {
    logging::init_stderr_logging();

    let Some(city) = config.initial_city else {
        eprintln!("Error: --print needs a non-empty --city");
        return ExitCode::from(2);
    };

    let mut session = Session::new(config.session);
    match session.search(&city).await {
        Ok(()) => {
            print!("{}", report::render_text(&session));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(city = %city, error = %e, "Search failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main event loop: draw, run queued work, then wait briefly for a key
async fn run_loop(terminal: &mut Tui, app: &mut App) -> io::Result<()> {
    loop {
        // Render UI; the header clock updates on every pass
        terminal.draw(|f| ui::render(f, app, Local::now().naive_local()))?;

        if app.is_busy() {
            app.run_pending().await;
            continue;
        }

        // Poll for keyboard events with 250ms timeout
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

async fn run_dashboard(config: StartupConfig) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = logging::default_log_dir() {
        match logging::init_file_logging(&dir) {
            Ok(path) => info!(path = %path.display(), "Logging to file"),
            Err(e) => eprintln!("Warning: could not open log file in {}: {}", dir.display(), e),
        }
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    if config.print {
        return Ok(run_print(config).await);
    }

    run_dashboard(config).await?;
    Ok(ExitCode::SUCCESS)
}
