//! feedreader — browse RSS feeds in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//!                 LoadSettled             settle()
//! ┌───────────┐   (channel)   ┌──────────────┐  ┌─────────────┐
//! │ loader.rs │ ────────────► │  reader.rs   │─►│ renderer.rs │
//! │  (tasks)  │ ◄──────────── │ (core state) │  └─────────────┘
//! └───────────┘    load()     └──────────────┘
//!                                ▲       ▲
//!                 activate()     │       │ register()
//!                 ┌──────────┐   │   ┌─────────────────┐
//!                 │ input.rs │───┘   │ registration.rs │
//!                 └──────────┘       └─────────────────┘
//! ```
//!
//! * **`registry`** — the ordered, append-only list of feeds.
//! * **`source/`** — the `FeedFetcher` trait and the RSS implementation.
//! * **`loader`** — spawns fetches and stamps each with a generation.
//! * **`renderer`** — the visible entry list; rejects stale generations.
//! * **`menu`** — the collapsible feed menu.
//! * **`registration`** — adds feeds at runtime, keeping the menu in step.
//! * **`reader`** — owns all of the above; the single writer of the display.
//! * **`app`**, **`ui`**, **`input`** — terminal presentation.
//! * **`main`** — wires everything together: parse args, set up logging and
//!   the terminal, and run the event loop.

mod app;
mod config;
mod error;
mod input;
mod loader;
mod menu;
mod reader;
mod registration;
mod registry;
mod renderer;
mod source;
mod ui;

use std::fs::File;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use reader::FeedReader;
use source::RssFetcher;

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the panic message is printed.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Send logs to `--log-file`, filtered by RUST_LOG or `--log-level`.
///
/// Without a log file nothing is installed: the UI owns the terminal.
fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    // -- core --------------------------------------------------------------
    let fetcher =
        Arc::new(RssFetcher::new(config.timeout()).context("cannot build HTTP client")?);
    let (reader, mut settled_rx) =
        FeedReader::new(config.seed(), fetcher).context("invalid startup feed")?;
    info!(feeds = reader.registry().len(), "feed registry seeded");

    let mut app = App::new(reader);
    app.load(config.initial_feed)
        .context("cannot load initial feed")?;

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    install_panic_hook();
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply any settled loads.
    //   2. Render the UI.
    //   3. Poll for keyboard input (up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(settled) = settled_rx.try_recv() {
            app.reader.settle(settled);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // crossterm's poll blocks; keep it off the runtime's worker threads.
        let key = tokio::task::block_in_place(|| -> io::Result<Option<Event>> {
            if event::poll(tick_rate)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })?;
        if let Some(Event::Key(key)) = key {
            input::handle_key_event(&mut app, key);
        }

        if app.quit {
            break;
        }
    }

    info!("shutting down");
    Ok(())
}
