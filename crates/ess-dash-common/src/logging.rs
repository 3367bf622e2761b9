//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Tracing setup for the dashboard driver: stderr console plus daily JSON file."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "ESS_DASH_LOG";
const RUST_LOG_ENV: &str = "RUST_LOG";
const DEFAULT_DIRECTIVE: &str = "debug";

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
static STDERR_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Available console log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    StructuredJson,
    Pretty,
}

/// Where the active filter directive came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSource {
    DashboardEnv,
    RustLog,
    Default,
}

impl FilterSource {
    fn as_str(&self) -> &'static str {
        match self {
            FilterSource::DashboardEnv => LOG_ENV,
            FilterSource::RustLog => RUST_LOG_ENV,
            FilterSource::Default => "default",
        }
    }
}

/// Filter directive chosen from `ESS_DASH_LOG`, then `RUST_LOG`, then `debug`.
///
/// Blank or unparsable directives are skipped, with the reason returned so it can be logged
/// once the subscriber exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChoice {
    pub directive: String,
    pub source: FilterSource,
    pub rejected: Vec<String>,
}

impl FilterChoice {
    pub fn resolve(dashboard_env: Option<String>, rust_log: Option<String>) -> Self {
        let mut rejected = Vec::new();
        for (value, source) in [
            (dashboard_env, FilterSource::DashboardEnv),
            (rust_log, FilterSource::RustLog),
        ] {
            let Some(directive) = value.filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            match EnvFilter::try_new(&directive) {
                Ok(_) => {
                    return Self {
                        directive,
                        source,
                        rejected,
                    }
                }
                Err(err) => rejected.push(format!("{}={directive:?}: {err}", source.as_str())),
            }
        }
        Self {
            directive: DEFAULT_DIRECTIVE.to_owned(),
            source: FilterSource::Default,
            rejected,
        }
    }

    fn from_env() -> Self {
        Self::resolve(std::env::var(LOG_ENV).ok(), std::env::var(RUST_LOG_ENV).ok())
    }
}

impl LoggingConfig {
    /// Base name of the rolling log file; the appender adds a date suffix.
    pub fn log_file_name(&self, service_name: &str) -> String {
        let prefix = self
            .file_prefix
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(service_name);
        format!("{prefix}.log")
    }

    pub fn log_file_path(&self, service_name: &str) -> PathBuf {
        self.directory.join(self.log_file_name(service_name))
    }
}

/// Initialize the tracing subscriber for a dashboard process.
///
/// Console output goes to stderr so stdout carries only rendered frames. Events are flattened
/// in JSON output so `LogContext` fields (`ess`, `battery`, `tick`, `phase`) sit at the top
/// level of each record, in both the console and the daily file under `config.directory`.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<()> {
    std::fs::create_dir_all(&config.directory).with_context(|| {
        format!(
            "unable to create log directory {}",
            config.directory.display()
        )
    })?;

    let file_appender = daily(&config.directory, config.log_file_name(service_name));
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());

    let _ = FILE_GUARD.set(file_guard);
    let _ = STDERR_GUARD.set(stderr_guard);

    let choice = FilterChoice::from_env();
    let filter = EnvFilter::try_new(&choice.directive)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let console_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .flatten_event(true)
            .with_writer(stderr_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .compact()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(stderr_writer)
            .boxed(),
    };

    let file_layer = fmt::layer()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .json()
        .flatten_event(true)
        .with_writer(file_writer)
        .boxed();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .ok();

    for reason in &choice.rejected {
        warn!(reason = %reason, "ignored invalid log filter directive");
    }
    info!(
        service = %service_name,
        log_file = %config.log_file_path(service_name).display(),
        format = ?config.format,
        filter = %choice.directive,
        filter_source = choice.source.as_str(),
        "tracing initialised"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(prefix: Option<&str>) -> LoggingConfig {
        LoggingConfig {
            directory: PathBuf::from("target/logs"),
            format: LogFormat::StructuredJson,
            file_prefix: prefix.map(str::to_owned),
        }
    }

    #[test]
    fn log_format_uses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: LogFormat,
        }
        let parsed: Wrapper = toml::from_str("format = \"pretty\"").unwrap();
        assert_eq!(parsed.format, LogFormat::Pretty);
        let parsed: Wrapper = toml::from_str("format = \"structured-json\"").unwrap();
        assert_eq!(parsed.format, LogFormat::StructuredJson);
    }

    #[test]
    fn log_file_defaults_to_service_name() {
        assert_eq!(logging(None).log_file_name("ess-dashd"), "ess-dashd.log");
        assert_eq!(logging(Some("  ")).log_file_name("ess-dashd"), "ess-dashd.log");
        assert_eq!(logging(Some("site-a")).log_file_name("ess-dashd"), "site-a.log");
        assert_eq!(
            logging(None).log_file_path("ess-dashd"),
            PathBuf::from("target/logs/ess-dashd.log")
        );
    }

    #[test]
    fn dashboard_env_wins_over_rust_log() {
        let choice = FilterChoice::resolve(Some("info".into()), Some("trace".into()));
        assert_eq!(choice.directive, "info");
        assert_eq!(choice.source, FilterSource::DashboardEnv);
        assert!(choice.rejected.is_empty());
    }

    #[test]
    fn blank_and_invalid_directives_fall_through() {
        let choice = FilterChoice::resolve(Some("   ".into()), Some("ess_dash_sim=warn".into()));
        assert_eq!(choice.source, FilterSource::RustLog);
        assert_eq!(choice.directive, "ess_dash_sim=warn");

        let choice = FilterChoice::resolve(Some("ess_dash=notalevel".into()), None);
        assert_eq!(choice.source, FilterSource::Default);
        assert_eq!(choice.directive, "debug");
        assert_eq!(choice.rejected.len(), 1);
        assert!(choice.rejected[0].starts_with("ESS_DASH_LOG="));
    }

    #[test]
    fn init_tracing_creates_log_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = LoggingConfig {
            directory: dir.path().join("logs"),
            format: LogFormat::Pretty,
            file_prefix: Some("test".into()),
        };
        init_tracing("ess-dash-test", &config)?;
        assert!(config.directory.is_dir());
        Ok(())
    }
}
