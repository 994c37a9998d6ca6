//! `capacity-checkr`: terminal dashboard for a room's live occupancy.
//!
//! Polls the occupancy endpoint in the background and shows building,
//! room, a green / yellow / red status panel, and current vs. max occupancy.
//!
//! Logs go to a file (default `/tmp/capacity-checkr.log`) so they never
//! corrupt the terminal. Failed polls are logged there and otherwise ignored.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod theme;
mod tui;
mod view;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use checkr_config::Config;
use checkr_core::StatusPoller;

use crate::app::App;

/// Terminal dashboard for a room's occupancy status.
#[derive(Parser, Debug)]
#[command(name = "capacity-checkr", version, about)]
struct Cli {
    /// Occupancy endpoint URL (overrides the deployment outputs file)
    #[arg(short = 'e', long, env = "CHECKR_ENDPOINT")]
    endpoint: Option<String>,

    /// Deployment outputs file to read the endpoint from (e.g. cdk-outputs.json)
    #[arg(long)]
    outputs: Option<PathBuf>,

    /// Stack name inside the outputs file
    #[arg(long)]
    stack: Option<String>,

    /// Poll interval in milliseconds
    #[arg(short = 'i', long)]
    interval: Option<u64>,

    /// Poll once at startup instead of waiting a full interval
    #[arg(long)]
    immediate: bool,

    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = "/tmp/capacity-checkr.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Nothing may be written to stdout/stderr while the
/// TUI owns the terminal. Hold the returned guard until exit.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "capacity_checkr={log_level},checkr_core={log_level},checkr_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("capacity-checkr.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Config file + environment, then CLI flags on top.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match cli.config {
        Some(ref path) => checkr_config::load_config_from(path)?,
        None => checkr_config::load_config()?,
    };

    if let Some(ref endpoint) = cli.endpoint {
        cfg.endpoint = Some(endpoint.clone());
    }
    if let Some(ref outputs) = cli.outputs {
        cfg.outputs.file = Some(outputs.clone());
    }
    if let Some(ref stack) = cli.stack {
        cfg.outputs.stack = Some(stack.clone());
    }
    if let Some(interval) = cli.interval {
        cfg.interval_ms = interval;
    }
    if cli.immediate {
        cfg.immediate = true;
    }

    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let poller_config = load_config(&cli)?.poller_config()?;
    info!(
        endpoint = %poller_config.endpoint,
        interval = ?poller_config.schedule.interval,
        "starting capacity-checkr"
    );

    let poller = StatusPoller::new();
    poller.start(poller_config).await?;

    let mut app = App::new(poller.clone());
    let result = app.run().await;

    poller.stop().await;
    result
}
