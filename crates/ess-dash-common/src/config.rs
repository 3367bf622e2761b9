//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared primitives and utilities for the dashboard runtime."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ess_dash_model::classifier::{REFERENCE_FAULTED_BATTERIES, REFERENCE_FAULTED_ESS};
use ess_dash_model::{ConfigurationError, FaultMap, FleetLayout};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::{debug, warn};

use crate::logging::LogFormat;

fn default_ess_count() -> usize {
    FleetLayout::REFERENCE_ESS_COUNT
}

fn default_batteries_per_ess() -> usize {
    FleetLayout::REFERENCE_BATTERIES_PER_ESS
}

fn default_refresh_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_preview_samples() -> usize {
    60
}

fn default_minimap_samples() -> usize {
    100
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::StructuredJson
}

/// Primary configuration object for the dashboard core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fleet: FleetConfig,
    #[serde(default)]
    pub faults: FaultConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and the reference configuration is in use.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "ESS_DASH_CONFIG";

    /// Load configuration from disk, respecting the `ESS_DASH_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration from disk together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        Self::search(Self::env_override(), candidates)?.ok_or_else(|| {
            anyhow!(
                "no configuration files found. inspected: {}",
                candidates
                    .iter()
                    .map(|p| p.as_ref().display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }

    /// Resolve the driver configuration.
    ///
    /// Precedence: `explicit` (a `--config` flag), then `ESS_DASH_CONFIG`, then the first
    /// existing `fallbacks` entry, then the reference configuration. An explicit path that does
    /// not exist is an error; only the fallbacks are optional.
    pub fn load_or_default<P: AsRef<Path>>(
        explicit: Option<&Path>,
        fallbacks: &[P],
    ) -> Result<LoadedAppConfig> {
        Self::resolve(explicit, Self::env_override(), fallbacks)
    }

    fn resolve<P: AsRef<Path>>(
        explicit: Option<&Path>,
        env_path: Option<PathBuf>,
        fallbacks: &[P],
    ) -> Result<LoadedAppConfig> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(anyhow!(
                    "configuration file {} does not exist",
                    path.display()
                ));
            }
            return Self::loaded_from(path.to_path_buf());
        }
        if let Some(loaded) = Self::search(env_path, fallbacks)? {
            return Ok(loaded);
        }
        warn!("no configuration file found; using reference fleet configuration");
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    // The env path, when set, is authoritative: a missing file there fails in `from_path`.
    fn search<P: AsRef<Path>>(
        env_path: Option<PathBuf>,
        candidates: &[P],
    ) -> Result<Option<LoadedAppConfig>> {
        if let Some(path) = env_path {
            return Self::loaded_from(path).map(Some);
        }
        candidates
            .iter()
            .map(|candidate| candidate.as_ref())
            .find(|candidate| candidate.exists())
            .map(|candidate| Self::loaded_from(candidate.to_path_buf()))
            .transpose()
    }

    fn loaded_from(path: PathBuf) -> Result<LoadedAppConfig> {
        let config = Self::from_path(&path)?;
        Ok(LoadedAppConfig {
            config,
            source: Some(path),
        })
    }

    fn env_override() -> Option<PathBuf> {
        std::env::var(Self::ENV_CONFIG_PATH)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Validate structural invariants. Fault indices outside the layout are fatal.
    pub fn validate(&self) -> Result<()> {
        let layout = self.fleet.layout();
        self.faults.fault_map(layout)?;
        self.display.validate(layout)?;
        if self.simulation.refresh_interval.is_zero() {
            return Err(anyhow!("simulation.refresh_interval must be greater than zero"));
        }
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default = "default_ess_count")]
    pub ess_count: usize,
    #[serde(default = "default_batteries_per_ess")]
    pub batteries_per_ess: usize,
}

impl FleetConfig {
    pub fn layout(&self) -> FleetLayout {
        FleetLayout::new(self.ess_count, self.batteries_per_ess)
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            ess_count: default_ess_count(),
            batteries_per_ess: default_batteries_per_ess(),
        }
    }
}

/// Fault scenario. An absent `[faults]` table means the reference scenario; a present one
/// lists everything explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultConfig {
    #[serde(default)]
    pub ess: Vec<usize>,
    #[serde(default)]
    pub batteries: Vec<BatteryFaultConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryFaultConfig {
    pub ess: usize,
    #[serde(default)]
    pub positions: Vec<usize>,
}

impl FaultConfig {
    pub fn fault_map(&self, layout: FleetLayout) -> Result<FaultMap, ConfigurationError> {
        FaultMap::new(
            layout,
            self.ess.iter().copied(),
            self.batteries
                .iter()
                .map(|entry| (entry.ess, entry.positions.iter().copied())),
        )
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            ess: REFERENCE_FAULTED_ESS.to_vec(),
            batteries: REFERENCE_FAULTED_BATTERIES
                .iter()
                .map(|(ess, positions)| BatteryFaultConfig {
                    ess: *ess,
                    positions: positions.to_vec(),
                })
                .collect(),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed RNG seed; entropy-seeded when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
    #[serde(default = "default_refresh_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub refresh_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            refresh_interval: default_refresh_interval(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_preview_samples")]
    pub preview_samples: usize,
    #[serde(default = "default_minimap_samples")]
    pub minimap_samples: usize,
}

impl DisplayConfig {
    pub fn validate(&self, layout: FleetLayout) -> Result<()> {
        for (name, k) in [
            ("preview_samples", self.preview_samples),
            ("minimap_samples", self.minimap_samples),
        ] {
            if k == 0 || k > layout.batteries_per_ess {
                return Err(anyhow!(
                    "display.{} must be between 1 and {} (got {})",
                    name,
                    layout.batteries_per_ess,
                    k
                ));
            }
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_samples: default_preview_samples(),
            minimap_samples: default_minimap_samples(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}
