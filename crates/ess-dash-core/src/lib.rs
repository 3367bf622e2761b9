//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Dashboard context, rollups, and sampling."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Dashboard core for the ESS fleet: the session context, fleet rollups, stride sampling,
//! and the read-only views consumed by the renderer.

pub mod dashboard;
pub mod errors;
pub mod sampling;
pub mod summary;
pub mod views;

pub use dashboard::{Dashboard, DashboardFrame};
pub use errors::{DashboardError, Result};
pub use sampling::{sample, sample_indices, sampled_alert_count, MINIMAP_SAMPLES, PREVIEW_SAMPLES};
pub use summary::{summarize, FleetSummary};
pub use views::{BatteryDetail, BatteryTooltip, EssCard, Minimap, MinimapTile};
