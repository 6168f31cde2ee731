//! # Planner Configuration
//!
//! Optional `loadsheet.toml` with per-installation settings. Every field has
//! a default, so a missing file or a partial file both work:
//!
//! ```toml
//! near_margin = 0.05
//! operator = "Sevenair Academy"
//! fleet_path = "club_fleet.toml"
//! report_dir = "reports"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculations::DEFAULT_NEAR_MARGIN;
use crate::errors::{CalcError, CalcResult};

/// File looked up in the working directory when no path is given
pub const CONFIG_FILE: &str = "loadsheet.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Fraction below a limit at which a value is reported as near-limit
    pub near_margin: f64,

    /// Operator name printed on load sheets
    pub operator: String,

    /// Aircraft table replacing the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fleet_path: Option<PathBuf>,

    /// Directory exported reports are written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            near_margin: DEFAULT_NEAR_MARGIN,
            operator: String::new(),
            fleet_path: None,
            report_dir: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        let config: PlannerConfig =
            toml::from_str(contents).map_err(|e| CalcError::serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(0.0..1.0).contains(&self.near_margin) {
            return Err(CalcError::invalid_config(
                "near_margin",
                format!("{} is outside [0, 1)", self.near_margin),
            ));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }
}

/// Load a config file. Unlike [`load_config_or_default`], a missing or
/// broken file is an error.
pub fn load_config(path: &Path) -> CalcResult<PlannerConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let config = PlannerConfig::from_toml_str(&contents)?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Load `loadsheet.toml` from `dir` if present, defaults otherwise.
///
/// A file that exists but does not parse falls back to defaults with a
/// warning; an out-of-range margin is still rejected.
pub fn load_config_or_default(dir: &Path) -> CalcResult<PlannerConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(PlannerConfig::default());
    }

    match load_config(&path) {
        Ok(config) => Ok(config),
        Err(e) if e.is_configuration_error() => Err(e),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
            Ok(PlannerConfig::default())
        }
    }
}
