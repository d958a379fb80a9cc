//! Site monitor (v1)
//!
//! Probes the configured endpoints every interval and delivers one report
//! per cycle to the configured sink.
//!
//! # Usage
//!
//! ```text
//! site-monitor --config monitor.toml            # run until SIGINT/SIGTERM
//! site-monitor --config monitor.toml --once     # one cycle, JSON to stdout
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use site_monitor::config::load_config;
use site_monitor::lifecycle::signals::spawn_signal_listener;
use site_monitor::observability::{logging, metrics};
use site_monitor::{ConfiguredSink, CycleRunner, HttpProber, PeriodicDriver, Shutdown};

#[derive(Parser)]
#[command(name = "site-monitor")]
#[command(about = "Periodic HTTP(S) reachability monitor", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "monitor.toml")]
    config: PathBuf,

    /// Override `monitor.interval_secs`.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: Option<u64>,

    /// Run a single cycle, print the report as JSON and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(secs) = cli.interval_secs {
        config.monitor.interval_secs = secs;
    }

    logging::init_logging(&config.observability);

    tracing::info!("site-monitor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = %cli.config.display(),
        endpoints = config.endpoints.len(),
        batch_size = config.monitor.batch_size,
        timeout_secs = config.monitor.timeout_secs,
        interval_secs = config.monitor.interval_secs,
        sink = ?config.sink.kind,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address format is checked during validation.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let prober = Arc::new(HttpProber::new(config.probe.clone(), &config.endpoints)?);
    let sink = Arc::new(ConfiguredSink::from_config(&config.sink)?);
    let runner = Arc::new(CycleRunner::new(
        config.monitor.clone(),
        config.endpoints.clone(),
        prober,
        sink,
    ));

    if cli.once {
        let report = runner.run_cycle().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let shutdown = Arc::new(Shutdown::new());
    let stop = shutdown.subscribe();
    spawn_signal_listener(Arc::clone(&shutdown));

    let driver = PeriodicDriver::new(runner);
    driver.run(stop).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
