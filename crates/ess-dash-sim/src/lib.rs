//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "01-bootstrap"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Simulation module exports."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Synthetic telemetry for the ESS fleet.
//!
//! Values are drawn uniformly from fixed bands. Entities classified `alert` by the
//! [`FaultMap`](ess_dash_model::FaultMap) are drawn from their alert bands on every tick, so
//! faults persist across refreshes instead of healing.

pub mod bands;
pub mod generator;

pub use bands::{Band, StatusBands};
pub use generator::TelemetryGenerator;
