//! ---
//! ems_section: "03-persistence-logging"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Fleet rollup metrics and text exposition."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::sync::Arc;

use anyhow::{Context, Result};
use ess_dash_core::FleetSummary;
use prometheus::{Gauge, IntCounter, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};
use tracing::trace;

/// Shared registry type used across the dashboard.
pub type SharedRegistry = Arc<Registry>;

/// Produce a new shared registry.
pub fn new_registry() -> SharedRegistry {
    Arc::new(Registry::new())
}

/// Gauges mirroring the latest [`FleetSummary`] plus a refresh counter.
#[derive(Clone, Debug)]
pub struct FleetMetrics {
    registry: SharedRegistry,
    ess_status: IntGaugeVec,
    alert_batteries: IntGauge,
    mean_availability: Gauge,
    mean_rte: Gauge,
    mean_renewable_rate: Gauge,
    mean_peak_shaving: Gauge,
    co2_reduction: Gauge,
    cost_saving: IntGauge,
    ticks_total: IntCounter,
}

impl FleetMetrics {
    pub fn new(registry: SharedRegistry) -> Result<Self> {
        let ess_status = IntGaugeVec::new(
            Opts::new(
                "ess_dash_ess_status_total",
                "Number of ESS units per classification",
            ),
            &["status"],
        )?;
        registry.register(Box::new(ess_status.clone()))?;

        let alert_batteries = IntGauge::with_opts(Opts::new(
            "ess_dash_alert_batteries",
            "Batteries in alert across the whole fleet",
        ))?;
        registry.register(Box::new(alert_batteries.clone()))?;

        let mean_availability = Gauge::with_opts(Opts::new(
            "ess_dash_mean_availability_percent",
            "Fleet mean availability",
        ))?;
        registry.register(Box::new(mean_availability.clone()))?;

        let mean_rte = Gauge::with_opts(Opts::new(
            "ess_dash_mean_rte_percent",
            "Fleet mean round-trip efficiency",
        ))?;
        registry.register(Box::new(mean_rte.clone()))?;

        let mean_renewable_rate = Gauge::with_opts(Opts::new(
            "ess_dash_mean_renewable_rate_percent",
            "Fleet mean renewable energy share",
        ))?;
        registry.register(Box::new(mean_renewable_rate.clone()))?;

        let mean_peak_shaving = Gauge::with_opts(Opts::new(
            "ess_dash_mean_peak_shaving_percent",
            "Fleet mean peak shaving rate",
        ))?;
        registry.register(Box::new(mean_peak_shaving.clone()))?;

        let co2_reduction = Gauge::with_opts(Opts::new(
            "ess_dash_co2_reduction_tonnes",
            "Daily CO2 reduction summed over the fleet",
        ))?;
        registry.register(Box::new(co2_reduction.clone()))?;

        let cost_saving = IntGauge::with_opts(Opts::new(
            "ess_dash_cost_saving_krw",
            "Daily cost saving summed over the fleet",
        ))?;
        registry.register(Box::new(cost_saving.clone()))?;

        let ticks_total = IntCounter::with_opts(Opts::new(
            "ess_dash_ticks_total",
            "Telemetry refresh ticks applied",
        ))?;
        registry.register(Box::new(ticks_total.clone()))?;

        Ok(Self {
            registry,
            ess_status,
            alert_batteries,
            mean_availability,
            mean_rte,
            mean_renewable_rate,
            mean_peak_shaving,
            co2_reduction,
            cost_saving,
            ticks_total,
        })
    }

    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    /// Overwrite every gauge from a fresh rollup.
    pub fn observe(&self, summary: &FleetSummary) {
        self.ess_status
            .with_label_values(&["normal"])
            .set(summary.normal_ess as i64);
        self.ess_status
            .with_label_values(&["alert"])
            .set(summary.alert_ess as i64);
        self.alert_batteries.set(summary.alert_batteries as i64);
        self.mean_availability
            .set(summary.mean_availability_percent);
        self.mean_rte.set(summary.mean_rte_percent);
        self.mean_renewable_rate
            .set(summary.mean_renewable_rate_percent);
        self.mean_peak_shaving
            .set(summary.mean_peak_shaving_percent);
        self.co2_reduction.set(summary.total_co2_reduction_t);
        self.cost_saving
            .set(i64::try_from(summary.total_cost_saving_krw).unwrap_or(i64::MAX));
        trace!(
            alert_ess = summary.alert_ess,
            alert_batteries = summary.alert_batteries,
            "fleet metrics updated"
        );
    }

    pub fn record_tick(&self) {
        self.ticks_total.inc();
    }

    /// Text exposition of every registered metric.
    pub fn render(&self) -> Result<String> {
        let families = self.registry.gather();
        TextEncoder::new()
            .encode_to_string(&families)
            .context("failed to encode fleet metrics")
    }
}

pub use prometheus;
