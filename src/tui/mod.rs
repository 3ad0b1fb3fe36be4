// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, the fetch result)
// - Rendering the table, editor and overlays

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod modal;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::engine::{spawn_fetch, FetchError, PendingFetch, RecordSource};
use crate::export::XlsxExporter;
use crate::logging::LogBuffer;
use crate::model::Record;
use crate::theme::Theme;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI against `source`
///
/// Sets up the terminal, starts the one fetch for the configured endpoint,
/// runs the event loop and restores the terminal when done.
pub async fn run_tui<S>(source: Arc<S>, config: Config, log_buffer: LogBuffer) -> Result<()>
where
    S: RecordSource + 'static,
{
    let exporter = XlsxExporter::new(config.export_dir.clone());
    let theme = Theme::by_name(&config.theme);
    tracing::debug!("Using theme {}", theme.name);
    let mut app = App::new(
        config.page_size,
        theme,
        log_buffer,
        Box::new(exporter),
    );
    app.source_label = if config.demo_mode {
        format!("{} (demo)", config.endpoint)
    } else {
        format!("{}{}", config.api_url.trim_end_matches('/'), config.endpoint)
    };

    let mut pending = app
        .request_fetch(&config.endpoint)
        .map(|ticket| spawn_fetch(source, ticket));

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut pending).await;

    // An unfinished fetch is aborted here
    drop(pending);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (spinner, toast expiry)
/// 3. The pending fetch, delivered once as a discrete event
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    pending: &mut Option<PendingFetch>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        input::handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            result = wait_for_fetch(pending) => {
                if let Some(fetch) = pending.take() {
                    app.on_fetch_complete(fetch.ticket(), result);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Resolves with the fetch result, or never when nothing is pending
async fn wait_for_fetch(pending: &mut Option<PendingFetch>) -> Result<Vec<Record>, FetchError> {
    match pending {
        Some(fetch) => fetch.wait().await,
        None => std::future::pending().await,
    }
}
