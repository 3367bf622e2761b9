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

use crate::status::Status;

/// Identifier for the battery at `position` inside its pack, e.g. `B-001`.
pub fn battery_id(position: usize) -> String {
    format!("B-{:03}", position + 1)
}

/// Leaf cell telemetry record owned by an [`Ess`](crate::Ess).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub id: String,
    pub position: usize,
    pub status: Status,
    pub voltage_v: f64,
    pub current_a: f64,
    pub temperature_c: f64,
    pub soc_percent: u8,
    pub soh_percent: u8,
    pub cycles: u32,
    pub dod_percent: u8,
    pub internal_resistance_mohm: f64,
}

impl Battery {
    pub fn is_alert(&self) -> bool {
        self.status.is_alert()
    }
}
