//! Irrigation Hub — coordinator entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HTTP (axum)    LogEventSink   SystemClock   TomlConfig  │
//! │                 (EventSink)    (Clock)       (ConfigPort)│
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │         AppService (coordinator logic)             │  │
//! │  │  StateStore · StatusPublisher · ControlResolver    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use irrigation_hub::adapters::config_file::TomlConfigFile;
use irrigation_hub::adapters::http;
use irrigation_hub::adapters::log_sink::LogEventSink;
use irrigation_hub::adapters::time::SystemClock;
use irrigation_hub::app::ports::ConfigPort;
use irrigation_hub::app::service::AppService;

#[derive(Debug, Parser)]
#[command(name = "irrigation-hub", version, about = "Garden irrigation coordinator")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file (e.g. 0.0.0.0:5000)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    // The subscriber's log bridge picks up the library's `log` records.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Irrigation Hub v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let args = Args::parse();
    let file = args.config.as_ref().map(TomlConfigFile::new);
    if let Some(file) = &file {
        info!("Config file {}", file.path().display());
    }
    let config = irrigation_hub::config::resolve(file.as_ref().map(|f| f as &dyn ConfigPort), args.bind)?;

    // ── 3. Coordinator + transport ────────────────────────────
    let service = Arc::new(AppService::new(&config, SystemClock::new(), LogEventSink::new()));
    info!(
        "Dry threshold {}%, CORS {}",
        service.dry_threshold_percent(),
        if config.cors_permissive { "permissive" } else { "off" }
    );
    http::serve(service, &config.bind_addr, config.cors_permissive).await?;

    Ok(())
}
