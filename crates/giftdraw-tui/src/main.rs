// giftdraw entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Initialize tracing (stderr in batch mode, a log file under the TUI)
// 3. Load config and apply command-line overrides
// 4. Batch mode: draw everything, print, exit
// 5. Otherwise create mpsc channels, spawn the app task, run the TUI
// 6. Wait for the app task and surface a fatal engine error

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use giftdraw::app;
use giftdraw::cli::{self, Cli};
use giftdraw::config;
use giftdraw::tui;
use tokio::sync::mpsc;
use tracing::{error, info};

const DEFAULT_FILTER: &str = "giftdraw=info,giftdraw_core=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Arguments
    let args = Cli::parse();

    // 2. Tracing. The TUI owns the terminal, so it logs to a file.
    if args.is_batch() {
        init_stderr_tracing()?;
    } else {
        init_tracing()?;
    }
    info!("giftdraw starting up");

    // 3. Config
    let mut config =
        config::load_config(args.config.as_deref()).context("failed to load configuration")?;
    args.apply_overrides(&mut config);
    info!(
        "Config loaded: strategy={}, spin={}ms",
        config.draw.strategy, config.animation.spin_duration_ms
    );

    // 4. Batch mode
    if let Some(path) = &args.names {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read names file {}", path.display()))?;
        let output = cli::run_batch(&text, args.first.as_deref(), args.json, &config)?;
        print!("{output}");
        return Ok(());
    }

    // 5. Channels and tasks
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(config);
    let app_handle = tokio::spawn(app::run(cmd_rx, ui_tx, app_state));

    // Blocks until the user quits or the app task stops.
    let tui_result = tui::run(ui_rx, cmd_tx).await;
    if let Err(e) = &tui_result {
        error!("TUI error: {:#}", e);
    }

    // 6. The TUI dropped cmd_tx, so the app loop is on its way out.
    let app_result = app_handle.await.context("application task panicked")?;
    if let Err(e) = &app_result {
        error!("Application loop error: {:#}", e);
    }

    tui_result?;
    app_result?;
    info!("giftdraw shut down cleanly");
    Ok(())
}

/// Directory for the log file: the platform data dir, else `./logs`.
fn log_dir() -> anyhow::Result<PathBuf> {
    match config::project_dirs() {
        Some(dirs) => Ok(dirs.data_local_dir().join("logs")),
        None => Ok(std::env::current_dir()?.join("logs")),
    }
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("giftdraw.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

/// Batch mode keeps stdout for results; diagnostics go to stderr at warn.
fn init_stderr_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
