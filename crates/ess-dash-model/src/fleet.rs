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

use crate::errors::{ConfigurationError, InvariantViolation};
use crate::ess::Ess;

/// Shape of the fleet: how many ESS units and how many batteries each one owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetLayout {
    pub ess_count: usize,
    pub batteries_per_ess: usize,
}

impl FleetLayout {
    pub const REFERENCE_ESS_COUNT: usize = 9;
    pub const REFERENCE_BATTERIES_PER_ESS: usize = 420;

    pub fn new(ess_count: usize, batteries_per_ess: usize) -> Self {
        Self {
            ess_count,
            batteries_per_ess,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.ess_count == 0 || self.batteries_per_ess == 0 {
            return Err(ConfigurationError::EmptyLayout {
                ess_count: self.ess_count,
                batteries_per_ess: self.batteries_per_ess,
            });
        }
        Ok(())
    }

    pub fn total_batteries(&self) -> usize {
        self.ess_count * self.batteries_per_ess
    }
}

impl Default for FleetLayout {
    fn default() -> Self {
        Self::new(
            Self::REFERENCE_ESS_COUNT,
            Self::REFERENCE_BATTERIES_PER_ESS,
        )
    }
}

/// Ordered, fixed-size collection of ESS units. Owns every ESS and battery record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fleet {
    layout: FleetLayout,
    units: Vec<Ess>,
}

impl Fleet {
    /// Assemble a fleet, rejecting units that do not match the layout.
    pub fn new(layout: FleetLayout, units: Vec<Ess>) -> Result<Self, InvariantViolation> {
        let fleet = Self { layout, units };
        fleet.check_shape()?;
        Ok(fleet)
    }

    pub fn layout(&self) -> FleetLayout {
        self.layout
    }

    pub fn units(&self) -> &[Ess] {
        &self.units
    }

    /// In-place access for the telemetry generator. The slice cannot grow or shrink.
    pub fn units_mut(&mut self) -> &mut [Ess] {
        &mut self.units
    }

    pub fn ess(&self, index: usize) -> Option<&Ess> {
        self.units.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ess> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn check_shape(&self) -> Result<(), InvariantViolation> {
        let shape_ok = self.units.len() == self.layout.ess_count
            && self
                .units
                .iter()
                .all(|ess| ess.batteries.len() == self.layout.batteries_per_ess);
        if shape_ok {
            Ok(())
        } else {
            Err(InvariantViolation::ShapeChanged {
                expected_ess: self.layout.ess_count,
                expected_batteries: self.layout.batteries_per_ess,
                actual_ess: self.units.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Ess;
    type IntoIter = std::slice::Iter<'a, Ess>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_layout_is_nine_by_four_twenty() {
        let layout = FleetLayout::default();
        assert_eq!(layout.ess_count, 9);
        assert_eq!(layout.batteries_per_ess, 420);
        assert_eq!(layout.total_batteries(), 3780);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn empty_layout_is_rejected() {
        let err = FleetLayout::new(0, 420).validate().unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyLayout { .. }));
        assert!(FleetLayout::new(9, 0).validate().is_err());
    }

    #[test]
    fn fleet_rejects_mismatched_units() {
        let err = Fleet::new(FleetLayout::new(2, 5), Vec::new()).unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::ShapeChanged {
                expected_ess: 2,
                expected_batteries: 5,
                actual_ess: 0,
            }
        );
    }
}
