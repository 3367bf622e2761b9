//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Dashboard context owning the fleet, selection, and generator."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use ess_dash_common::config::{AppConfig, DisplayConfig};
use ess_dash_logging::{fleet_info, LogContext};
use ess_dash_model::{Battery, Ess, FaultMap, Fleet};
use ess_dash_sim::TelemetryGenerator;
use serde::Serialize;
use tracing::debug;

use crate::errors::{DashboardError, Result};
use crate::summary::{summarize, FleetSummary};
use crate::views::{BatteryDetail, BatteryTooltip, EssCard, Minimap};

/// Everything the renderer needs for one refresh cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardFrame {
    pub generated_at: DateTime<Utc>,
    pub tick: u64,
    pub selected_ess: Option<usize>,
    pub summary: FleetSummary,
    pub cards: Vec<EssCard>,
    pub minimap: Minimap,
}

/// Context object for one dashboard session.
///
/// Owns the fleet, the generator that is its only writer, and the drill-down selection.
/// Every derived view is computed from the current fleet on request.
#[derive(Debug)]
pub struct Dashboard {
    fleet: Fleet,
    generator: TelemetryGenerator,
    selection: Option<usize>,
    display: DisplayConfig,
}

impl Dashboard {
    pub fn new(faults: FaultMap, seed: Option<u64>, display: DisplayConfig) -> Result<Self> {
        let batteries_per_ess = faults.layout().batteries_per_ess;
        for samples in [display.preview_samples, display.minimap_samples] {
            if samples == 0 || samples > batteries_per_ess {
                return Err(DashboardError::InvalidSampleCount {
                    samples,
                    batteries_per_ess,
                });
            }
        }
        let mut generator = TelemetryGenerator::new(faults, seed);
        let fleet = generator.initialize()?;
        Ok(Self {
            fleet,
            generator,
            selection: None,
            display,
        })
    }

    /// Build a session from validated configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let faults = config.faults.fault_map(config.fleet.layout())?;
        Self::new(faults, config.simulation.random_seed, config.display)
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn faults(&self) -> &FaultMap {
        self.generator.faults()
    }

    pub fn ticks(&self) -> u64 {
        self.generator.ticks()
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Advance telemetry by one refresh interval.
    pub fn tick(&mut self) -> Result<()> {
        self.generator.tick(&mut self.fleet)?;
        Ok(())
    }

    pub fn summarize(&self) -> FleetSummary {
        summarize(&self.fleet)
    }

    pub fn selected_ess(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Ess> {
        self.selection.and_then(|index| self.fleet.ess(index))
    }

    /// Drill into one ESS. An unknown index leaves the selection unchanged.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let ess = self.ess(index)?;
        fleet_info!(
            context = LogContext::new().with_ess(&ess.id).with_phase("navigate"),
            "drill-down selected"
        );
        self.selection = Some(index);
        Ok(())
    }

    /// Return to the fleet overview.
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            debug!("returned to fleet overview");
        }
    }

    /// Minimap navigation: picking the selected ESS again returns to the overview.
    pub fn toggle_selection(&mut self, index: usize) -> Result<Option<usize>> {
        if self.selection == Some(index) {
            self.clear_selection();
        } else {
            self.select(index)?;
        }
        Ok(self.selection)
    }

    /// Full battery grid of the selected ESS.
    pub fn battery_grid(&self) -> Option<&[Battery]> {
        self.selected().map(|ess| ess.batteries.as_slice())
    }

    pub fn ess_cards(&self) -> Vec<EssCard> {
        self.fleet
            .iter()
            .enumerate()
            .map(|(index, ess)| EssCard::new(index, ess, self.display.preview_samples))
            .collect()
    }

    pub fn minimap(&self) -> Minimap {
        Minimap::new(&self.fleet, self.selection, self.display.minimap_samples)
    }

    pub fn battery_detail(&self, ess: usize, battery: usize) -> Result<BatteryDetail> {
        let (unit, cell) = self.battery(ess, battery)?;
        Ok(BatteryDetail::new(unit, cell))
    }

    pub fn battery_tooltip(&self, ess: usize, battery: usize) -> Result<BatteryTooltip> {
        let (_, cell) = self.battery(ess, battery)?;
        Ok(BatteryTooltip::from(cell))
    }

    pub fn frame(&self) -> DashboardFrame {
        DashboardFrame {
            generated_at: Utc::now(),
            tick: self.ticks(),
            selected_ess: self.selection,
            summary: self.summarize(),
            cards: self.ess_cards(),
            minimap: self.minimap(),
        }
    }

    fn ess(&self, index: usize) -> Result<&Ess> {
        self.fleet.ess(index).ok_or(DashboardError::UnknownEss {
            index,
            ess_count: self.fleet.len(),
        })
    }

    fn battery(&self, ess: usize, battery: usize) -> Result<(&Ess, &Battery)> {
        let unit = self.ess(ess)?;
        let cell = unit
            .battery(battery)
            .ok_or(DashboardError::UnknownBattery {
                ess,
                index: battery,
                batteries_per_ess: unit.batteries.len(),
            })?;
        Ok((unit, cell))
    }
}
