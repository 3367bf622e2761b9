//! ---
//! ems_section: "02-fleet-model"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Fleet entity model, layout, and status classification."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Status classification from fixed fault membership.
//!
//! An ESS is `alert` exactly when its index is in the faulted ESS set. A battery is `alert`
//! exactly when its ESS is faulted *and* its position is listed for that ESS. ESS status is
//! deliberately not derived from battery status: a faulted ESS with no listed batteries is
//! still `alert`.

use std::collections::{BTreeMap, BTreeSet};

use ess_dash_logging::{fleet_warn, LogContext};

use crate::errors::{ConfigurationError, InvariantViolation};
use crate::ess::ess_id;
use crate::fleet::{Fleet, FleetLayout};
use crate::status::Status;

pub const REFERENCE_FAULTED_ESS: [usize; 2] = [2, 5];
pub const REFERENCE_FAULTED_BATTERIES: [(usize, &[usize]); 2] = [(2, &[156, 287]), (5, &[89])];

/// Immutable fault membership for one fleet layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultMap {
    layout: FleetLayout,
    faulted_ess: BTreeSet<usize>,
    // Only entries whose ESS is itself faulted are kept.
    faulted_batteries: BTreeMap<usize, BTreeSet<usize>>,
}

impl FaultMap {
    /// Build a fault map, rejecting any index outside `layout`.
    ///
    /// Battery entries for an ESS that is not in `faulted_ess` are validated, logged, and
    /// dropped.
    pub fn new<E, M, B>(
        layout: FleetLayout,
        faulted_ess: E,
        faulted_batteries: M,
    ) -> Result<Self, ConfigurationError>
    where
        E: IntoIterator<Item = usize>,
        M: IntoIterator<Item = (usize, B)>,
        B: IntoIterator<Item = usize>,
    {
        layout.validate()?;
        let max_ess = layout.ess_count - 1;
        let max_battery = layout.batteries_per_ess - 1;

        let mut ess_set = BTreeSet::new();
        for index in faulted_ess {
            if index > max_ess {
                return Err(ConfigurationError::EssIndexOutOfRange {
                    index,
                    max: max_ess,
                });
            }
            ess_set.insert(index);
        }

        let mut battery_map: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for (ess, positions) in faulted_batteries {
            if ess > max_ess {
                return Err(ConfigurationError::EssIndexOutOfRange {
                    index: ess,
                    max: max_ess,
                });
            }
            let mut set = BTreeSet::new();
            for index in positions {
                if index > max_battery {
                    return Err(ConfigurationError::BatteryIndexOutOfRange {
                        ess,
                        index,
                        max: max_battery,
                    });
                }
                set.insert(index);
            }
            if !ess_set.contains(&ess) {
                let id = ess_id(ess);
                fleet_warn!(
                    context = LogContext::new().with_ess(&id).with_phase("configure"),
                    "ignoring {} faulted battery entries for an ESS that is not faulted",
                    set.len()
                );
                continue;
            }
            battery_map.entry(ess).or_default().extend(set);
        }

        Ok(Self {
            layout,
            faulted_ess: ess_set,
            faulted_batteries: battery_map,
        })
    }

    /// Reference scenario: ESS-03 and ESS-06 faulted, three faulted batteries in total.
    pub fn reference() -> Self {
        Self {
            layout: FleetLayout::default(),
            faulted_ess: REFERENCE_FAULTED_ESS.into_iter().collect(),
            faulted_batteries: REFERENCE_FAULTED_BATTERIES
                .iter()
                .map(|(ess, positions)| (*ess, positions.iter().copied().collect()))
                .collect(),
        }
    }

    /// A fault map with nothing faulted.
    pub fn healthy(layout: FleetLayout) -> Self {
        Self {
            layout,
            faulted_ess: BTreeSet::new(),
            faulted_batteries: BTreeMap::new(),
        }
    }

    pub fn layout(&self) -> FleetLayout {
        self.layout
    }

    pub fn ess_status(&self, ess: usize) -> Status {
        Status::from_fault(self.faulted_ess.contains(&ess))
    }

    pub fn battery_status(&self, ess: usize, battery: usize) -> Status {
        let faulted = self
            .faulted_batteries
            .get(&ess)
            .is_some_and(|positions| positions.contains(&battery));
        Status::from_fault(faulted)
    }

    pub fn faulted_ess(&self) -> impl Iterator<Item = usize> + '_ {
        self.faulted_ess.iter().copied()
    }

    pub fn faulted_batteries(&self, ess: usize) -> impl Iterator<Item = usize> + '_ {
        self.faulted_batteries
            .get(&ess)
            .into_iter()
            .flat_map(|positions| positions.iter().copied())
    }

    /// Cardinality of the effective battery fault mapping.
    pub fn alert_battery_total(&self) -> usize {
        self.faulted_batteries.values().map(BTreeSet::len).sum()
    }

    /// Check every recorded status in `fleet` against this map.
    pub fn verify(&self, fleet: &Fleet) -> Result<(), InvariantViolation> {
        fleet.check_shape()?;
        for (ess_index, ess) in fleet.iter().enumerate() {
            let expected = self.ess_status(ess_index);
            if ess.status != expected {
                return Err(InvariantViolation::EssStatusDrift {
                    ess_id: ess.id.clone(),
                    expected,
                    actual: ess.status,
                });
            }
            for (battery_index, battery) in ess.batteries.iter().enumerate() {
                let expected = self.battery_status(ess_index, battery_index);
                if battery.status != expected {
                    return Err(InvariantViolation::BatteryStatusDrift {
                        ess_id: ess.id.clone(),
                        battery_id: battery.id.clone(),
                        expected,
                        actual: battery.status,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for FaultMap {
    fn default() -> Self {
        Self::reference()
    }
}
