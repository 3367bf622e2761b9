//! ---
//! ems_section: "02-fleet-model"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Fleet entity model, layout, and status classification."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Fleet → ESS → battery records and the fault-membership classifier.
//!
//! The records here carry no behaviour beyond field access; values are written by the
//! telemetry generator in `ess-dash-sim` and read by the rollups in `ess-dash-core`.

pub mod battery;
pub mod classifier;
pub mod errors;
pub mod ess;
pub mod fleet;
pub mod status;

pub use battery::{battery_id, Battery};
pub use classifier::FaultMap;
pub use errors::{ConfigurationError, InvariantViolation, ModelError, Result};
pub use ess::{ess_id, Ess};
pub use fleet::{Fleet, FleetLayout};
pub use status::Status;
