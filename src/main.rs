// posttable - paginated record table in the terminal
//
// Fetches one collection of records over HTTP, then lets you page through
// it, search titles, edit a row in place and export to .xlsx. All edits
// live in memory for the session.
//
// Architecture:
// - Engine: fetcher, paginator, filter, edit session, TableModel (pure state)
// - TUI (ratatui): renders TableModel snapshots, drives it with key events
// - Export (rust_xlsxwriter): current page or the whole collection
// - Headless `export` subcommand: fetch once, write the workbook, exit

mod cli;
mod config;
mod demo;
mod engine;
mod export;
mod logging;
mod model;
mod theme;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation, DEMO_RECORD_COUNT};
use demo::DemoSource;
use engine::{HttpSource, RecordSource, TableModel};
use export::{ExportScope, ExportSink, XlsxExporter};
use logging::{LogBuffer, TuiLogLayer};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management exits before anything else is set up
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::load()?;

    let headless = matches!(cli.command, Some(Commands::Export { .. }));
    let log_buffer = LogBuffer::new();
    let _file_guard = init_logging(&config, headless, &log_buffer);

    match cli.command {
        Some(Commands::Export { dir }) => {
            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            let path = if config.demo_mode {
                let source = DemoSource::new(DEMO_RECORD_COUNT).with_latency(Duration::ZERO);
                export_all(&source, &config, &XlsxExporter::new(dir)).await?
            } else {
                let source = http_source(&config)?;
                export_all(&source, &config, &XlsxExporter::new(dir)).await?
            };
            println!("{}", path.display());
            Ok(())
        }
        _ => {
            if config.demo_mode {
                tracing::info!("Running in DEMO MODE - serving generated records");
                let source = Arc::new(DemoSource::new(DEMO_RECORD_COUNT));
                tui::run_tui(source, config, log_buffer).await
            } else {
                let source = Arc::new(http_source(&config)?);
                tui::run_tui(source, config, log_buffer).await
            }
        }
    }
}

fn http_source(config: &Config) -> Result<HttpSource> {
    HttpSource::new(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to build HTTP client")
}

/// Initialize tracing
///
/// TUI mode captures events into the log buffer (stdout would garble the
/// display); headless mode prints them. File logging adds a JSON layer on a
/// rotating, non-blocking writer. The returned guard must live until exit
/// so the writer flushes.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_logging(
    config: &Config,
    headless: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("posttable={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    let console_layer = if headless {
        tracing_subscriber::fmt::layer().boxed()
    } else {
        TuiLogLayer::new(log_buffer.clone()).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Fetch the configured endpoint once and write every record to
/// `todos_os_itens.xlsx`
async fn export_all<S: RecordSource>(
    source: &S,
    config: &Config,
    sink: &dyn ExportSink,
) -> Result<PathBuf> {
    let records = source
        .fetch_all(&config.endpoint)
        .await
        .with_context(|| format!("Failed to fetch {}", config.endpoint))?;

    // Same load path as the TUI: duplicate ids are dropped
    let mut model = TableModel::new(config.page_size);
    model.load(records);

    let refs: Vec<_> = model.records().iter().collect();
    let scope = ExportScope::AllRecords;
    let path = sink
        .export(&refs, scope.filename())
        .with_context(|| format!("Failed to write {}.xlsx", scope.filename()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_headless_export_writes_all_records() {
        let dir = tempfile::tempdir().unwrap();
        let source = DemoSource::new(42).with_latency(Duration::ZERO);
        let sink = XlsxExporter::new(dir.path());

        let path = export_all(&source, &Config::default(), &sink).await.unwrap();
        assert_eq!(path, dir.path().join("todos_os_itens.xlsx"));
        assert!(path.exists());
    }
}
