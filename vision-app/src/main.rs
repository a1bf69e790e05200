mod api;

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use vision_engine::VisionEngine;

#[derive(Parser, Debug)]
#[command(
    name = "vision-app",
    version,
    about = "Quantum Vision Control Center — AI-driven device monitoring"
)]
struct Cli {
    /// Simulation tick interval in milliseconds
    #[arg(long, default_value_t = 2000)]
    tick_ms: u64,

    /// RNG seed for the simulation (omit for a time-derived seed)
    #[arg(long)]
    seed: Option<u64>,

    /// API bind address
    #[arg(long, default_value = "127.0.0.1:9090")]
    bind: String,

    /// Disable the JSON API
    #[arg(long)]
    no_api: bool,

    /// Screen-recording output path
    #[arg(long, default_value = "screen_record.mp4")]
    recording_path: String,

    /// Log level (trace/debug/info/warn/error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let start = Utc::now();
    let seed = cli.seed.unwrap_or_else(|| start.timestamp_millis() as u64);
    let engine = Arc::new(VisionEngine::new(start, seed, &cli.recording_path));

    info!("Quantum Vision Control Center v{}", env!("CARGO_PKG_VERSION"));
    info!(
        devices = engine.device_names().len(),
        seed,
        tick_ms = cli.tick_ms,
        "Engine initialized"
    );

    if !cli.no_api {
        let api_engine = engine.clone();
        let bind = cli.bind.clone();
        tokio::spawn(async move {
            if let Err(e) = api::serve(api_engine, &bind).await {
                error!(error = %e, "API server failed");
            }
        });
        info!(addr = %cli.bind, "API available at http://{}", cli.bind);
    }

    let mut ticker = tokio::time::interval(std::time::Duration::from_millis(cli.tick_ms));
    info!("Simulation running. Press Ctrl+C to stop.");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.advance_tick(Utc::now());
                // Headless runs surface popups in the log; with the API
                // up, /api/alert is the consumer instead.
                if cli.no_api {
                    if let Some(alert) = engine.poll_transient_alert() {
                        warn!(title = %alert.title, detail = %alert.lines.join(" | "), "Transient alert");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    info!("Shutting down...");
    let _ = engine.execute(vision_engine::ManualCommand::StopRecording);
    info!(
        ticks = engine.ticks(),
        notifications = engine.notifications().len(),
        "Shutdown complete"
    );

    Ok(())
}
