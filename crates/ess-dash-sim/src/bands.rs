//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "01-bootstrap"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Value bands used when synthesising fleet telemetry."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
//! Uniform value bands `[min, min + span)` quantised to a fixed number of decimals.

use ess_dash_model::Status;
use rand::Rng;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub span: f64,
    pub decimals: u32,
}

impl Band {
    pub const fn new(min: f64, span: f64, decimals: u32) -> Self {
        Self {
            min,
            span,
            decimals,
        }
    }

    pub fn max(&self) -> f64 {
        self.min + self.span
    }

    /// Half-open membership test, tolerant of float noise on the decimal grid.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min - EPSILON && value < self.max() - EPSILON
    }

    /// Draw uniformly from the band's decimal grid. Never returns `max()`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        let base = (self.min * scale).round() as i64;
        let steps = ((self.span * scale).round() as i64).max(1);
        (base + rng.gen_range(0..steps)) as f64 / scale
    }

    /// Draw a whole number, for bands with zero decimals.
    pub fn draw_whole<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let base = self.min.floor() as u64;
        let steps = (self.span.round() as u64).max(1);
        base + rng.gen_range(0..steps)
    }
}

/// A normal band paired with the band used while an entity is classified `alert`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBands {
    pub normal: Band,
    pub alert: Band,
}

impl StatusBands {
    pub const fn new(normal: Band, alert: Band) -> Self {
        Self { normal, alert }
    }

    pub fn for_status(&self, status: Status) -> &Band {
        match status {
            Status::Normal => &self.normal,
            Status::Alert => &self.alert,
        }
    }
}

pub mod battery {
    use super::{Band, StatusBands};

    pub const VOLTAGE_V: StatusBands =
        StatusBands::new(Band::new(3.65, 0.2, 2), Band::new(3.2, 0.2, 2));
    pub const TEMPERATURE_C: StatusBands =
        StatusBands::new(Band::new(24.0, 4.0, 1), Band::new(45.0, 5.0, 1));
    pub const SOC_PERCENT: StatusBands =
        StatusBands::new(Band::new(75.0, 15.0, 0), Band::new(15.0, 10.0, 0));
    pub const SOH_PERCENT: StatusBands =
        StatusBands::new(Band::new(96.0, 4.0, 0), Band::new(75.0, 5.0, 0));
    pub const CURRENT_A: Band = Band::new(20.0, 10.0, 1);
    pub const CYCLES: Band = Band::new(800.0, 1200.0, 0);
    pub const DOD_PERCENT: Band = Band::new(60.0, 20.0, 0);
    pub const INTERNAL_RESISTANCE_MOHM: Band = Band::new(2.5, 0.5, 2);
}

pub mod ess {
    use super::{Band, StatusBands};

    pub const TEMPERATURE_C: StatusBands =
        StatusBands::new(Band::new(25.0, 3.0, 1), Band::new(45.0, 5.0, 1));
    pub const AVAILABILITY_PERCENT: StatusBands =
        StatusBands::new(Band::new(99.2, 0.5, 1), Band::new(94.0, 2.0, 1));
    pub const VOLTAGE_V: Band = Band::new(48.5, 1.0, 1);
    pub const CURRENT_A: Band = Band::new(100.0, 50.0, 1);
    pub const SOC_PERCENT: Band = Band::new(75.0, 15.0, 0);
    pub const SOH_PERCENT: Band = Band::new(95.0, 5.0, 0);
    pub const RTE_PERCENT: Band = Band::new(92.0, 3.0, 1);
    pub const CYCLES: Band = Band::new(1200.0, 800.0, 0);
    pub const POWER_KW: Band = Band::new(450.0, 50.0, 0);
    pub const ENERGY_KWH: Band = Band::new(1800.0, 200.0, 0);
    pub const PEAK_SHAVING_PERCENT: Band = Band::new(85.0, 10.0, 1);
    pub const CO2_REDUCTION_T: Band = Band::new(2.5, 0.5, 2);
    pub const COST_SAVING_KRW: Band = Band::new(150_000.0, 50_000.0, 0);
    pub const RENEWABLE_RATE_PERCENT: Band = Band::new(65.0, 15.0, 1);
    pub const MTBF_H: Band = Band::new(2000.0, 1000.0, 0);
}
