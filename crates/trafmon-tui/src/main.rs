//! `trafmon-tui`: live terminal dashboard for the traffic monitor backend.
//!
//! Built on [ratatui](https://ratatui.rs) with data pushed from
//! `trafmon-core`'s view store. Screens are navigable via number keys (1-5):
//! Traffic, Interfaces, Alerts, Packets, and Users.
//!
//! Logs are written to a file (default `/tmp/trafmon-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task forwards every
//! applied fetch from the dashboard into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use trafmon_config::{ConfigError, Profile};
use trafmon_core::{Dashboard, DashboardConfig};

use crate::app::App;

/// Terminal dashboard for monitoring network traffic.
#[derive(Parser, Debug)]
#[command(name = "trafmon-tui", version, about)]
struct Cli {
    /// Config profile to use
    #[arg(short = 'p', long, env = "TRAFMON_PROFILE")]
    profile: Option<String>,

    /// Backend URL (e.g., http://127.0.0.1:5000), overrides the profile
    #[arg(short = 'u', long, env = "TRAFMON_URL")]
    url: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(short = 'k', long, env = "TRAFMON_INSECURE")]
    insecure: bool,

    /// Log file path (defaults to /tmp/trafmon-tui.log)
    #[arg(long, default_value = "/tmp/trafmon-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr; that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "trafmon_tui={log_level},trafmon_core={log_level},trafmon_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("trafmon-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the backend from the config file, then apply CLI overrides.
///
/// Priority: CLI flags > config profile > built-in local default. With
/// `--url`, a profile missing from the config file is not an error.
fn build_config(cli: &Cli) -> Result<DashboardConfig> {
    let cfg = trafmon_config::load_config_or_default();

    let mut profile = match cfg.resolve_profile(cli.profile.as_deref()) {
        Ok((_, profile)) => profile,
        Err(ConfigError::UnknownProfile { .. }) if cli.url.is_some() => Profile::default(),
        Err(e) => return Err(e.into()),
    };

    if let Some(ref url) = cli.url {
        profile.url.clone_from(url);
    }
    if cli.insecure {
        profile.insecure = Some(true);
    }

    Ok(trafmon_config::profile_to_dashboard_config(
        &profile,
        &cfg.defaults,
    )?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = build_config(&cli)?;
    info!(
        url = %config.url,
        interval_secs = config.refresh_interval.as_secs(),
        "starting trafmon-tui"
    );

    let dashboard = Dashboard::new(config)?;
    let mut app = App::new(dashboard);
    app.run().await?;

    Ok(())
}
