//! ---
//! ems_section: "02-fleet-model"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Fleet entity model, layout, and status classification."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::battery::Battery;
use crate::status::Status;

/// Identifier for the ESS at `position` inside the fleet, e.g. `ESS-01`.
pub fn ess_id(position: usize) -> String {
    format!("ESS-{:02}", position + 1)
}

/// Composite energy storage unit with its ordered battery pack and economics metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ess {
    pub id: String,
    pub position: usize,
    pub status: Status,
    pub voltage_v: f64,
    pub current_a: f64,
    pub temperature_c: f64,
    pub soc_percent: u8,
    pub soh_percent: u8,
    pub batteries: Vec<Battery>,
    /// Round-trip efficiency.
    pub rte_percent: f64,
    pub cycles: u32,
    pub power_kw: f64,
    pub energy_kwh: f64,
    pub peak_shaving_percent: f64,
    pub availability_percent: f64,
    /// Daily CO2 reduction in tonnes.
    pub co2_reduction_t: f64,
    /// Daily cost saving in KRW.
    pub cost_saving_krw: u64,
    pub renewable_rate_percent: f64,
    /// Mean time between failures in hours.
    pub mtbf_h: u32,
}

impl Ess {
    pub fn is_alert(&self) -> bool {
        self.status.is_alert()
    }

    pub fn battery(&self, position: usize) -> Option<&Battery> {
        self.batteries.get(position)
    }

    /// Number of batteries currently reporting `alert`, counted over the whole pack.
    pub fn alert_battery_count(&self) -> usize {
        self.batteries.iter().filter(|b| b.is_alert()).count()
    }

    /// Short label used by compact displays: `ESS-03` becomes `03`.
    pub fn short_label(&self) -> &str {
        self.id.strip_prefix("ESS-").unwrap_or(&self.id)
    }
}
