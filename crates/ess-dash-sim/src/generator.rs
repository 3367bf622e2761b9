//! ---
//! ems_section: "11-simulation"
//! ems_subsection: "01-bootstrap"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Synthetic fleet telemetry generator."
//! ems_version: "v0.1.0"
//! ems_owner: "tbd"
//! ---
use ess_dash_logging::{fleet_debug, log_system_event, LogContext, SystemEventOutcome};
use ess_dash_model::{
    battery_id, ess_id, Battery, Ess, FaultMap, Fleet, InvariantViolation, Result, Status,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::bands::{battery as cell, ess as unit};

/// Creates the fleet and advances its telemetry, holding faulted entities in alert bands.
#[derive(Debug)]
pub struct TelemetryGenerator {
    faults: FaultMap,
    rng: StdRng,
    ticks: u64,
}

impl TelemetryGenerator {
    /// `seed = None` draws the RNG seed from OS entropy.
    pub fn new(faults: FaultMap, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            faults,
            rng,
            ticks: 0,
        }
    }

    pub fn faults(&self) -> &FaultMap {
        &self.faults
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Build every ESS and battery record with freshly drawn values.
    pub fn initialize(&mut self) -> Result<Fleet> {
        let layout = self.faults.layout();
        let mut units = Vec::with_capacity(layout.ess_count);
        for ess_index in 0..layout.ess_count {
            let batteries = (0..layout.batteries_per_ess)
                .map(|position| {
                    let status = self.faults.battery_status(ess_index, position);
                    new_battery(&mut self.rng, position, status)
                })
                .collect();
            let status = self.faults.ess_status(ess_index);
            units.push(new_ess(&mut self.rng, ess_index, status, batteries));
        }
        let fleet = Fleet::new(layout, units)?;

        log_system_event(
            Some(&LogContext::new().with_phase("initialize")),
            "fleet.initialize",
            &format!(
                "fleet initialised with {} ESS x {} batteries, {} ESS and {} batteries faulted",
                layout.ess_count,
                layout.batteries_per_ess,
                self.faults.faulted_ess().count(),
                self.faults.alert_battery_total()
            ),
            SystemEventOutcome::Success,
        );
        Ok(fleet)
    }

    /// Advance every entity by one refresh interval, mutating `fleet` in place.
    ///
    /// Statuses are checked against the fault map before anything is written, so a fleet
    /// built from another fault map, or one whose statuses were altered elsewhere, is
    /// rejected untouched.
    pub fn tick(&mut self, fleet: &mut Fleet) -> Result<()> {
        if fleet.layout() != self.faults.layout() {
            return Err(InvariantViolation::ShapeChanged {
                expected_ess: self.faults.layout().ess_count,
                expected_batteries: self.faults.layout().batteries_per_ess,
                actual_ess: fleet.len(),
            }
            .into());
        }
        if let Err(violation) = self.faults.verify(fleet) {
            log_system_event(
                Some(&LogContext::new().with_tick(self.ticks + 1).with_phase("tick")),
                "fleet.verify",
                &violation.to_string(),
                SystemEventOutcome::Fault,
            );
            return Err(violation.into());
        }

        for (ess_index, ess) in fleet.units_mut().iter_mut().enumerate() {
            refresh_ess(&mut self.rng, ess, self.faults.ess_status(ess_index));
            for (position, battery) in ess.batteries.iter_mut().enumerate() {
                let status = self.faults.battery_status(ess_index, position);
                refresh_battery(&mut self.rng, battery, status);
                if status.is_alert() {
                    fleet_debug!(
                        context = LogContext::new()
                            .with_ess(&ess.id)
                            .with_battery(&battery.id)
                            .with_tick(self.ticks + 1),
                        "faulted battery held at {:.2} V / {:.1} C / {}%",
                        battery.voltage_v,
                        battery.temperature_c,
                        battery.soc_percent
                    );
                }
            }
        }
        self.ticks += 1;
        debug!(tick = self.ticks, "telemetry advanced");
        Ok(())
    }
}

fn new_battery(rng: &mut StdRng, position: usize, status: Status) -> Battery {
    Battery {
        id: battery_id(position),
        position,
        status,
        voltage_v: cell::VOLTAGE_V.for_status(status).draw(rng),
        current_a: cell::CURRENT_A.draw(rng),
        temperature_c: cell::TEMPERATURE_C.for_status(status).draw(rng),
        soc_percent: cell::SOC_PERCENT.for_status(status).draw_whole(rng) as u8,
        soh_percent: cell::SOH_PERCENT.for_status(status).draw_whole(rng) as u8,
        cycles: cell::CYCLES.draw_whole(rng) as u32,
        dod_percent: cell::DOD_PERCENT.draw_whole(rng) as u8,
        internal_resistance_mohm: cell::INTERNAL_RESISTANCE_MOHM.draw(rng),
    }
}

fn new_ess(rng: &mut StdRng, position: usize, status: Status, batteries: Vec<Battery>) -> Ess {
    Ess {
        id: ess_id(position),
        position,
        status,
        voltage_v: unit::VOLTAGE_V.draw(rng),
        current_a: unit::CURRENT_A.draw(rng),
        temperature_c: unit::TEMPERATURE_C.for_status(status).draw(rng),
        soc_percent: unit::SOC_PERCENT.draw_whole(rng) as u8,
        soh_percent: unit::SOH_PERCENT.draw_whole(rng) as u8,
        batteries,
        rte_percent: unit::RTE_PERCENT.draw(rng),
        cycles: unit::CYCLES.draw_whole(rng) as u32,
        power_kw: unit::POWER_KW.draw(rng),
        energy_kwh: unit::ENERGY_KWH.draw(rng),
        peak_shaving_percent: unit::PEAK_SHAVING_PERCENT.draw(rng),
        availability_percent: unit::AVAILABILITY_PERCENT.for_status(status).draw(rng),
        co2_reduction_t: unit::CO2_REDUCTION_T.draw(rng),
        cost_saving_krw: unit::COST_SAVING_KRW.draw_whole(rng),
        renewable_rate_percent: unit::RENEWABLE_RATE_PERCENT.draw(rng),
        mtbf_h: unit::MTBF_H.draw_whole(rng) as u32,
    }
}

// soh, cycles, power, energy, renewable rate and mtbf keep their initial draw.
fn refresh_ess(rng: &mut StdRng, ess: &mut Ess, status: Status) {
    ess.status = status;
    ess.voltage_v = unit::VOLTAGE_V.draw(rng);
    ess.current_a = unit::CURRENT_A.draw(rng);
    ess.temperature_c = unit::TEMPERATURE_C.for_status(status).draw(rng);
    ess.soc_percent = unit::SOC_PERCENT.draw_whole(rng) as u8;
    ess.rte_percent = unit::RTE_PERCENT.draw(rng);
    ess.availability_percent = unit::AVAILABILITY_PERCENT.for_status(status).draw(rng);
    ess.co2_reduction_t = unit::CO2_REDUCTION_T.draw(rng);
    ess.cost_saving_krw = unit::COST_SAVING_KRW.draw_whole(rng);
    ess.peak_shaving_percent = unit::PEAK_SHAVING_PERCENT.draw(rng);
}

// soh, cycles, dod and resistance keep their initial draw.
fn refresh_battery(rng: &mut StdRng, battery: &mut Battery, status: Status) {
    battery.status = status;
    battery.voltage_v = cell::VOLTAGE_V.for_status(status).draw(rng);
    battery.current_a = cell::CURRENT_A.draw(rng);
    battery.temperature_c = cell::TEMPERATURE_C.for_status(status).draw(rng);
    battery.soc_percent = cell::SOC_PERCENT.for_status(status).draw_whole(rng) as u8;
}
