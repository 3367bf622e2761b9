//! ---
//! ems_section: "02-fleet-model"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Fleet entity model, layout, and status classification."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use thiserror::Error;

use crate::status::Status;

pub type Result<T> = std::result::Result<T, ModelError>;

/// Fault configuration that cannot be honoured by the fleet layout. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("fleet layout must contain at least one ESS with at least one battery (got {ess_count} x {batteries_per_ess})")]
    EmptyLayout {
        ess_count: usize,
        batteries_per_ess: usize,
    },
    #[error("faulted ESS index {index} is outside the fleet (valid 0..={max})")]
    EssIndexOutOfRange { index: usize, max: usize },
    #[error("faulted battery index {index} on ESS {ess} is outside the pack (valid 0..={max})")]
    BatteryIndexOutOfRange { ess: usize, index: usize, max: usize },
}

/// A classified entity reported a status the fault sets do not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{ess_id} reports {actual} but is classified {expected}")]
    EssStatusDrift {
        ess_id: String,
        expected: Status,
        actual: Status,
    },
    #[error("{ess_id}/{battery_id} reports {actual} but is classified {expected}")]
    BatteryStatusDrift {
        ess_id: String,
        battery_id: String,
        expected: Status,
        actual: Status,
    },
    #[error("fleet shape changed: expected {expected_ess} x {expected_batteries}, found {actual_ess} ESS")]
    ShapeChanged {
        expected_ess: usize,
        expected_batteries: usize,
        actual_ess: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),
}
