//! ---
//! ems_section: "03-logging"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Structured logging context and lifecycle events for the fleet core."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Level-specific macros that attach a [`LogContext`](crate::LogContext) to each event.

#[doc(hidden)]
#[macro_export]
macro_rules! __fleet_event {
    ($level:expr, $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            $level,
            ess = ctx.ess.unwrap_or(""),
            battery = ctx.battery.unwrap_or(""),
            tick = ctx.tick.unwrap_or_default(),
            phase = ctx.phase.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit an informational log enriched with fleet context.
#[macro_export]
macro_rules! fleet_info {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::INFO, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::INFO, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with fleet context.
#[macro_export]
macro_rules! fleet_debug {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::DEBUG, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::DEBUG, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a warning enriched with fleet context.
#[macro_export]
macro_rules! fleet_warn {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::WARN, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::WARN, $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with fleet context.
#[macro_export]
macro_rules! fleet_error {
    (context = $ctx:expr, $($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::ERROR, $ctx, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__fleet_event!(tracing::Level::ERROR, $crate::LogContext::default(), $($arg)+)
    };
}
