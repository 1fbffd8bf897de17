//! YETRS - yet another terminal falling-block game
//!
//! Survival mode with hold, invisible and sliding board variants.

mod board;
mod flow;
mod game;
mod input;
mod menu;
mod piece;
mod queue;
mod score;
mod settings;
mod srs;
mod tetromino;
mod timer;
mod ui;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flow::{InputSource, StateManager};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    path::PathBuf,
    time::Duration,
};

/// Get the yetrs temp directory, creating it if needed
fn yetrs_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("yetrs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Key presses read from the terminal
struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<KeyCode>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key.code)),
            _ => Ok(None),
        }
    }
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let yetrs_dir = yetrs_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&yetrs_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "yetrs=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "YETRS starting up, session={:08x}, log={}",
        session_id,
        yetrs_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut manager = StateManager::new(settings);
    let result = manager.run(&mut terminal, &mut TerminalInput);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Keep the menu toggles for next time
    if let Err(e) = manager.into_settings().save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if let Err(e) = &result {
        tracing::error!("Exited with error: {}", e);
    }
    tracing::info!("YETRS shutting down");
    result
}
