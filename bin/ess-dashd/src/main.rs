//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "binary"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Binary entrypoint for the ESS dashboard refresh driver."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ess_dash_common::config::AppConfig;
use ess_dash_common::logging::init_tracing;
use ess_dash_common::timing::RefreshTimer;
use ess_dash_core::Dashboard;
use ess_dash_logging::{fleet_error, LogContext};
use ess_dash_metrics::{new_registry, FleetMetrics};
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "configs/ess-dash.toml";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "ESS fleet dashboard refresh driver",
    long_about = None
)]
struct Cli {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to configuration file (must exist; overrides ESS_DASH_CONFIG)"
    )]
    config: Option<PathBuf>,

    #[arg(long, help = "Override the RNG seed for reproducible telemetry")]
    seed: Option<u64>,

    #[arg(long, help = "Stop after this many refresh ticks (runs until ctrl-c when absent)")]
    ticks: Option<u64>,

    #[arg(long, value_name = "SECONDS", help = "Override the refresh interval")]
    interval_secs: Option<u64>,

    #[arg(long, value_name = "INDEX", help = "Drill into this ESS (0-based) before the first frame")]
    select: Option<usize>,

    #[arg(long, help = "Print Prometheus text metrics on exit")]
    print_metrics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let fallbacks = [PathBuf::from(DEFAULT_CONFIG_PATH)];
    let loaded = AppConfig::load_or_default(cli.config.as_deref(), &fallbacks)?;
    let mut config = loaded.config;
    if let Some(seed) = cli.seed {
        config.simulation.random_seed = Some(seed);
    }
    if let Some(secs) = cli.interval_secs {
        config.simulation.refresh_interval = Duration::from_secs(secs);
    }
    config.validate()?;
    init_tracing("ess-dashd", &config.logging)?;

    match &loaded.source {
        Some(path) => info!(config_path = %path.display(), "configuration loaded"),
        None => info!("running with reference configuration"),
    }

    let mut dashboard = Dashboard::from_config(&config)?;
    if let Some(index) = cli.select {
        dashboard.select(index)?;
    }
    let metrics = FleetMetrics::new(new_registry())?;

    run(&mut dashboard, &metrics, config.simulation.refresh_interval, cli.ticks).await?;

    if cli.print_metrics {
        println!("{}", metrics.render()?);
    }
    Ok(())
}

async fn run(
    dashboard: &mut Dashboard,
    metrics: &FleetMetrics,
    refresh_interval: Duration,
    max_ticks: Option<u64>,
) -> Result<()> {
    let timer = RefreshTimer::new(refresh_interval);
    let mut ticker = interval(refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately and renders the initial snapshot.
    ticker.tick().await;
    emit_frame(dashboard, metrics)?;
    timer.record_refresh();

    info!(
        ess_count = dashboard.fleet().len(),
        interval_secs = refresh_interval.as_secs(),
        "refresh loop running; waiting for termination signal"
    );

    loop {
        if max_ticks.is_some_and(|limit| dashboard.ticks() >= limit) {
            info!(ticks = dashboard.ticks(), "tick limit reached");
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = dashboard.tick() {
                    fleet_error!(
                        context = LogContext::new().with_tick(dashboard.ticks()).with_phase("tick"),
                        "refresh aborted: {err}"
                    );
                    return Err(err).context("telemetry refresh failed");
                }
                metrics.record_tick();
                timer.record_refresh();
                emit_frame(dashboard, metrics)?;
            }
            result = signal::ctrl_c() => {
                result.context("failed to listen for ctrl-c")?;
                info!("ctrl-c received; shutting down");
                break;
            }
        }
    }

    match timer.histogram().summary() {
        Some(jitter) => info!(
            samples = jitter.samples,
            mean_ms = jitter.mean_ms,
            max_ms = jitter.max_ms,
            min_ms = jitter.min_ms,
            "refresh cadence jitter"
        ),
        None => warn!("no refresh cadence samples recorded"),
    }
    Ok(())
}

fn emit_frame(dashboard: &Dashboard, metrics: &FleetMetrics) -> Result<()> {
    let frame = dashboard.frame();
    metrics.observe(&frame.summary);
    info!(
        tick = frame.tick,
        alert_ess = frame.summary.alert_ess,
        alert_batteries = frame.summary.alert_batteries,
        mean_availability = frame.summary.mean_availability_percent,
        "fleet refreshed"
    );
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &frame).context("failed to serialise dashboard frame")?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
