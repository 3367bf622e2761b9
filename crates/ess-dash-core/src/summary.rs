//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Fleet-wide rollups for the statistics panel."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use ess_dash_model::{Fleet, Status};
use serde::Serialize;

/// Rollup of one fleet snapshot. Recompute after every tick; never cache across ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    pub ess_total: usize,
    pub normal_ess: usize,
    pub alert_ess: usize,
    pub mean_availability_percent: f64,
    pub mean_rte_percent: f64,
    pub mean_renewable_rate_percent: f64,
    pub mean_peak_shaving_percent: f64,
    pub total_co2_reduction_t: f64,
    pub total_cost_saving_krw: u64,
    /// Alert batteries across every pack, from a full scan.
    pub alert_batteries: usize,
    pub battery_total: usize,
}

impl FleetSummary {
    /// Any ESS in alert flags the availability panel for inspection.
    pub fn needs_inspection(&self) -> bool {
        self.alert_ess > 0
    }

    /// Daily cost saving in units of 10,000 KRW, floored.
    pub fn cost_saving_ten_thousand_krw(&self) -> u64 {
        self.total_cost_saving_krw / 10_000
    }
}

pub fn summarize(fleet: &Fleet) -> FleetSummary {
    let mut normal_ess = 0;
    let mut alert_ess = 0;
    let mut availability = 0.0;
    let mut rte = 0.0;
    let mut renewable = 0.0;
    let mut peak_shaving = 0.0;
    let mut co2 = 0.0;
    let mut cost_saving = 0u64;
    let mut alert_batteries = 0;
    let mut battery_total = 0;

    for ess in fleet {
        match ess.status {
            Status::Normal => normal_ess += 1,
            Status::Alert => alert_ess += 1,
        }
        availability += ess.availability_percent;
        rte += ess.rte_percent;
        renewable += ess.renewable_rate_percent;
        peak_shaving += ess.peak_shaving_percent;
        co2 += ess.co2_reduction_t;
        cost_saving += ess.cost_saving_krw;
        alert_batteries += ess.alert_battery_count();
        battery_total += ess.batteries.len();
    }

    let count = fleet.len();
    let mean = |total: f64| {
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    };

    FleetSummary {
        ess_total: count,
        normal_ess,
        alert_ess,
        mean_availability_percent: mean(availability),
        mean_rte_percent: mean(rte),
        mean_renewable_rate_percent: mean(renewable),
        mean_peak_shaving_percent: mean(peak_shaving),
        total_co2_reduction_t: co2,
        total_cost_saving_krw: cost_saving,
        alert_batteries,
        battery_total,
    }
}
