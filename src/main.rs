//! omdbtui - search the OMDb movie database from your terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! omdbtui
//!
//! # CLI mode (for scripting)
//! omdbtui search "blade runner" --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use omdbtui::cli::{Cli, Command, ExitCode, Output};
use omdbtui::{commands, logging, ui};
use omdbtui::{App, Config, HttpImageFetcher, ImageCache, OmdbClient, SearchMachine};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        logging::init_stderr();
        let exit_code = run_cli(cli, &config).await;
        std::process::exit(exit_code.into());
    } else {
        let _guard = logging::init_file()?;
        run_tui(&config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: &Config) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Search(cmd)) => {
            if cmd.title.trim().is_empty() {
                return output.error("Title must not be empty", ExitCode::InvalidArgs);
            }
            commands::search_cmd(cmd, config, &output).await
        }
        Some(Command::Poster(cmd)) => commands::poster_cmd(cmd, config, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Build the app from config: one service, one shared image cache
fn build_app(config: &Config) -> App {
    let service = Arc::new(OmdbClient::with_base_url(config.api_key(), config.base_url()));
    let search = SearchMachine::with_settings(service, config.debounce(), config.min_query_len());
    let images = Arc::new(ImageCache::new(
        Arc::new(HttpImageFetcher::new()),
        config.image_cache_capacity(),
    ));
    App::new(search, images)
}

/// Run interactive TUI
async fn run_tui(config: &Config) -> Result<()> {
    let mut terminal = init_terminal()?;
    let mut app = build_app(config);
    info!("tui started");

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, advances searches, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        // crossterm's poll blocks; keep it off the runtime threads
        let ready = tokio::task::block_in_place(|| event::poll(TICK_RATE))?;
        if ready {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }

        app.tick(Instant::now());
        tokio::task::yield_now().await;
    }

    Ok(())
}
