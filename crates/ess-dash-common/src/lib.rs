//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared primitives and utilities for the dashboard runtime."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Shared primitives for the ESS dashboard workspace: configuration loading, tracing setup,
//! and refresh cadence measurement.

pub mod config;
pub mod logging;
pub mod timing;

pub use config::{
    AppConfig, BatteryFaultConfig, DisplayConfig, FaultConfig, FleetConfig, LoadedAppConfig,
    LoggingConfig, SimulationConfig,
};
pub use logging::{init_tracing, FilterChoice, FilterSource, LogFormat};
pub use timing::{JitterHistogram, JitterSummary, RefreshTimer};
