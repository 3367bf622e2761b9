//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Read-only presentation views derived from the fleet."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Plain data handed to the renderer. Nothing here holds a reference back into the fleet.

use ess_dash_model::{Battery, Ess, Fleet, Status};
use serde::Serialize;

use crate::sampling::{sample, sampled_alert_count};

/// ESS cards highlight temperatures above this value.
pub const ESS_TEMPERATURE_WARN_C: f64 = 30.0;
pub const BATTERY_VOLTAGE_LOW_V: f64 = 3.5;
pub const BATTERY_TEMPERATURE_HIGH_C: f64 = 35.0;
pub const BATTERY_SOC_LOW_PERCENT: u8 = 20;
pub const BATTERY_SOH_LOW_PERCENT: u8 = 80;

/// Summary card shown in the fleet grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EssCard {
    pub index: usize,
    pub id: String,
    pub status: Status,
    pub soc_percent: u8,
    pub soh_percent: u8,
    pub rte_percent: f64,
    pub temperature_c: f64,
    pub temperature_elevated: bool,
    pub availability_percent: f64,
    pub power_kw: f64,
    pub energy_kwh: f64,
    pub cycles: u32,
    pub mtbf_h: u32,
    /// Badge count; only present for ESS units in alert.
    pub alert_badge: Option<usize>,
    pub preview: Vec<Status>,
}

impl EssCard {
    pub fn new(index: usize, ess: &Ess, preview_samples: usize) -> Self {
        Self {
            index,
            id: ess.id.clone(),
            status: ess.status,
            soc_percent: ess.soc_percent,
            soh_percent: ess.soh_percent,
            rte_percent: ess.rte_percent,
            temperature_c: ess.temperature_c,
            temperature_elevated: ess.temperature_c > ESS_TEMPERATURE_WARN_C,
            availability_percent: ess.availability_percent,
            power_kw: ess.power_kw,
            energy_kwh: ess.energy_kwh,
            cycles: ess.cycles,
            mtbf_h: ess.mtbf_h,
            alert_badge: ess.is_alert().then(|| ess.alert_battery_count()),
            preview: sample(&ess.batteries, preview_samples)
                .into_iter()
                .map(|battery| battery.status)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimapTile {
    pub index: usize,
    pub label: String,
    pub status: Status,
    pub selected: bool,
    pub cells: Vec<Status>,
    /// Alert cells visible in `cells`; may differ from the pack's true alert count.
    pub sampled_alerts: usize,
}

/// Compact overview of every ESS with the true fleet-wide alert battery count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Minimap {
    pub tiles: Vec<MinimapTile>,
    pub alert_batteries: usize,
}

impl Minimap {
    pub fn new(fleet: &Fleet, selected: Option<usize>, samples: usize) -> Self {
        let tiles = fleet
            .iter()
            .enumerate()
            .map(|(index, ess)| MinimapTile {
                index,
                label: ess.short_label().to_owned(),
                status: ess.status,
                selected: selected == Some(index),
                cells: sample(&ess.batteries, samples)
                    .into_iter()
                    .map(|battery| battery.status)
                    .collect(),
                sampled_alerts: sampled_alert_count(&ess.batteries, samples),
            })
            .collect();
        Self {
            tiles,
            alert_batteries: fleet.iter().map(Ess::alert_battery_count).sum(),
        }
    }
}

/// Popup contents for one battery, with per-field warning flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryDetail {
    pub title: String,
    pub status: Status,
    pub voltage_v: f64,
    pub voltage_low: bool,
    pub current_a: f64,
    pub temperature_c: f64,
    pub temperature_high: bool,
    pub soc_percent: u8,
    pub soc_low: bool,
    pub soh_percent: u8,
    pub soh_low: bool,
    pub cycles: u32,
    pub dod_percent: u8,
    pub internal_resistance_mohm: f64,
}

impl BatteryDetail {
    pub fn new(ess: &Ess, battery: &Battery) -> Self {
        Self {
            title: format!("{} - {}", ess.id, battery.id),
            status: battery.status,
            voltage_v: battery.voltage_v,
            voltage_low: battery.voltage_v < BATTERY_VOLTAGE_LOW_V,
            current_a: battery.current_a,
            temperature_c: battery.temperature_c,
            temperature_high: battery.temperature_c > BATTERY_TEMPERATURE_HIGH_C,
            soc_percent: battery.soc_percent,
            soc_low: battery.soc_percent < BATTERY_SOC_LOW_PERCENT,
            soh_percent: battery.soh_percent,
            soh_low: battery.soh_percent < BATTERY_SOH_LOW_PERCENT,
            cycles: battery.cycles,
            dod_percent: battery.dod_percent,
            internal_resistance_mohm: battery.internal_resistance_mohm,
        }
    }

    pub fn has_warning(&self) -> bool {
        self.voltage_low || self.temperature_high || self.soc_low || self.soh_low
    }
}

/// Hover tooltip in the per-battery grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryTooltip {
    pub id: String,
    pub voltage_v: f64,
    pub temperature_c: f64,
    pub soc_percent: u8,
}

impl From<&Battery> for BatteryTooltip {
    fn from(battery: &Battery) -> Self {
        Self {
            id: battery.id.clone(),
            voltage_v: battery.voltage_v,
            temperature_c: battery.temperature_c,
            soc_percent: battery.soc_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(position: usize, status: Status) -> Battery {
        let alert = status.is_alert();
        Battery {
            id: ess_dash_model::battery_id(position),
            position,
            status,
            voltage_v: if alert { 3.31 } else { 3.72 },
            current_a: 24.5,
            temperature_c: if alert { 47.2 } else { 25.8 },
            soc_percent: if alert { 18 } else { 82 },
            soh_percent: if alert { 77 } else { 98 },
            cycles: 1_204,
            dod_percent: 71,
            internal_resistance_mohm: 2.71,
        }
    }

    #[test]
    fn detail_flags_abnormal_fields() {
        let mut ess_batteries = vec![battery(0, Status::Normal), battery(1, Status::Alert)];
        let alert = ess_batteries.pop().unwrap();
        let normal = ess_batteries.pop().unwrap();
        let ess = Ess {
            id: "ESS-03".into(),
            position: 2,
            status: Status::Alert,
            voltage_v: 48.9,
            current_a: 120.0,
            temperature_c: 46.0,
            soc_percent: 80,
            soh_percent: 97,
            batteries: Vec::new(),
            rte_percent: 93.1,
            cycles: 1500,
            power_kw: 470.0,
            energy_kwh: 1900.0,
            peak_shaving_percent: 90.2,
            availability_percent: 95.0,
            co2_reduction_t: 2.71,
            cost_saving_krw: 170_000,
            renewable_rate_percent: 71.5,
            mtbf_h: 2500,
        };

        let detail = BatteryDetail::new(&ess, &alert);
        assert_eq!(detail.title, "ESS-03 - B-002");
        assert!(detail.voltage_low && detail.temperature_high && detail.soc_low && detail.soh_low);
        assert!(detail.has_warning());

        let detail = BatteryDetail::new(&ess, &normal);
        assert!(!detail.has_warning());
    }

    #[test]
    fn tooltip_copies_hover_fields() {
        let tooltip = BatteryTooltip::from(&battery(156, Status::Alert));
        assert_eq!(tooltip.id, "B-157");
        assert_eq!(tooltip.soc_percent, 18);
        assert_eq!(tooltip.voltage_v, 3.31);
    }
}
