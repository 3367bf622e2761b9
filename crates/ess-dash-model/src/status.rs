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
use strum::{AsRefStr, Display, EnumString};

/// Health status shared by ESS units and battery cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Normal,
    Alert,
}

impl Status {
    pub fn from_fault(faulted: bool) -> Self {
        if faulted {
            Status::Alert
        } else {
            Status::Normal
        }
    }

    pub fn is_alert(&self) -> bool {
        matches!(self, Status::Alert)
    }
}
