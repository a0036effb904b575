//! Sales Dashboard - Main Entry Point
//!
//! Monthly sales dashboard for the console

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sales_dashboard::app::application::run_app;
use sales_dashboard::constants::LOG_FILE_PREFIX;
use sales_dashboard::domain::{AppConfig, Month};
use sales_dashboard::helpers::is_development;

#[derive(Debug, Parser)]
#[command(name = "sales-dashboard", version, about = "Monthly sales dashboard")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the sales service
    #[arg(long)]
    base_url: Option<String>,

    /// Month selected at startup (Jan, march, 3, ...)
    #[arg(long)]
    month: Option<Month>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log filter used when RUST_LOG is unset (e.g. debug)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the dashboard once and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(month) = self.month {
            config.dashboard.default_month = month;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.api.timeout_secs = timeout_secs;
        }
        if let Some(level) = &self.log_level {
            config.log.level = Some(level.clone());
        }
    }
}

/// Initialize tracing; the returned guard flushes the log file on drop
fn init_tracing(config: &AppConfig) -> Option<WorkerGuard> {
    let default_level = config
        .log
        .level
        .clone()
        .unwrap_or_else(|| (if is_development() { "debug" } else { "info" }).to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_level));

    let (file_layer, guard) = match &config.log.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    guard
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::try_load(args.config.as_deref()).context("Failed to load config")?;
    args.apply(&mut config);

    let _guard = init_tracing(&config);
    tracing::info!(
        month = %config.dashboard.default_month,
        base_url = %config.api.base_url,
        "Starting Sales Dashboard..."
    );

    run_app(config, args.once)
}
