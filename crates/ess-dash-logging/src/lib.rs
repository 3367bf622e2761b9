//! ---
//! ems_section: "03-logging"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Structured logging context and lifecycle events for the fleet core."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Fleet-aware logging helpers shared by the model, simulation, and core crates.
#![warn(missing_docs)]

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for tests and development.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer())
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// ESS identifier associated with the log event (e.g. `ESS-03`).
    pub ess: Option<&'a str>,
    /// Battery identifier associated with the log event (e.g. `B-157`).
    pub battery: Option<&'a str>,
    /// Refresh tick sequence number.
    pub tick: Option<u64>,
    /// Generation phase (`initialize`, `tick`, ...).
    pub phase: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an ESS identifier.
    pub fn with_ess(mut self, ess: &'a str) -> Self {
        self.ess = Some(ess);
        self
    }

    /// Attach a battery identifier.
    pub fn with_battery(mut self, battery: &'a str) -> Self {
        self.battery = Some(battery);
        self
    }

    /// Attach a tick value.
    pub fn with_tick(mut self, tick: u64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Attach a generation phase descriptor.
    pub fn with_phase(mut self, phase: &'a str) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// High-level outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemEventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed or was aborted.
    Fault,
}

impl SystemEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            SystemEventOutcome::Success => "success",
            SystemEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized lifecycle event with a success/fault outcome.
pub fn log_system_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: SystemEventOutcome,
) {
    let fallback = LogContext::default();
    let ctx = context.unwrap_or(&fallback);
    match outcome {
        SystemEventOutcome::Success => tracing::event!(
            Level::INFO,
            event,
            outcome = outcome.as_str(),
            ess = ctx.ess.unwrap_or(""),
            battery = ctx.battery.unwrap_or(""),
            tick = ctx.tick.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %message
        ),
        SystemEventOutcome::Fault => tracing::event!(
            Level::ERROR,
            event,
            outcome = outcome.as_str(),
            ess = ctx.ess.unwrap_or(""),
            battery = ctx.battery.unwrap_or(""),
            tick = ctx.tick.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %message
        ),
    }
}
