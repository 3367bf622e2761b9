//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Dashboard context error types."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use ess_dash_model::{ConfigurationError, ModelError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("ESS index {index} does not exist (fleet has {ess_count})")]
    UnknownEss { index: usize, ess_count: usize },
    #[error("battery index {index} does not exist on ESS {ess} (pack has {batteries_per_ess})")]
    UnknownBattery {
        ess: usize,
        index: usize,
        batteries_per_ess: usize,
    },
    #[error("sample count {samples} must be between 1 and {batteries_per_ess}")]
    InvalidSampleCount {
        samples: usize,
        batteries_per_ess: usize,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<ConfigurationError> for DashboardError {
    fn from(err: ConfigurationError) -> Self {
        DashboardError::Model(err.into())
    }
}
