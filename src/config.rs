//! shapebot configuration.
//!
//! Loaded from `~/.shapebot/config.toml`, or the path given with `--config`.
//! Every key is optional; a missing default file means all defaults.
//!
//! ```toml
//! report-path = "/home/pi/shapes_log.txt"
//!
//! [kinematics]
//! speed-cm-per-s = 12.33
//! turn-reference-ms = 1500
//! turn-reference-deg = 115
//!
//! [motion]
//! drive-power = 40
//! turn-power = 58
//! settle-ms = 500
//!
//! [scan]
//! timeout-ms = 10000
//! poll-ms = 1000
//!
//! [indicator]
//! color = [0, 255, 0]
//! delay-ms = 1500
//! hold-ms = 2000
//!
//! [plan]
//! triangle-turn = "legacy"        # or "corrected"
//! enforce-triangle-bounds = true
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::descriptor::Parser;
use crate::geometry::TriangleTurn;
use crate::kinematics::Kinematics;
use crate::plan::Planner;

/// Errors loading or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// shapebot configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where session reports are appended.
    /// Defaults to `~/.shapebot/shapes_log.txt`.
    pub report_path: Option<PathBuf>,

    pub kinematics: Kinematics,
    pub motion: MotionConfig,
    pub scan: ScanConfig,
    pub indicator: IndicatorConfig,
    pub plan: PlanConfig,
}

/// Wheel powers and pacing for executing motion commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MotionConfig {
    /// Power applied to both wheels when driving straight (percent).
    pub drive_power: i32,

    /// Power applied to the right wheel when turning in place (percent).
    pub turn_power: i32,

    /// Pause after every drive and turn.
    pub settle_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            drive_power: 40,
            turn_power: 58,
            settle_ms: 500,
        }
    }
}

/// Bounds on waiting for a readable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScanConfig {
    pub timeout_ms: u64,
    pub poll_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            poll_ms: 1_000,
        }
    }
}

impl ScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}

/// The light shown after each finished shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IndicatorConfig {
    pub color: [u8; 3],

    /// Wait between finishing a shape and lighting up.
    pub delay_ms: u64,

    /// How long the light stays on.
    pub hold_ms: u64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            delay_ms: 1_500,
            hold_ms: 2_000,
        }
    }
}

/// Shape validation and path options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlanConfig {
    pub triangle_turn: TriangleTurn,
    pub enforce_triangle_bounds: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            triangle_turn: TriangleTurn::Legacy,
            enforce_triangle_bounds: true,
        }
    }
}

impl Config {
    /// Load config from `path`, or from `~/.shapebot/config.toml` when `None`.
    ///
    /// An explicit path must exist. The default path may be absent, in which
    /// case defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None => match Self::path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects calibration values that would make every time meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let k = &self.kinematics;
        for (name, value) in [
            ("kinematics.speed-cm-per-s", k.speed_cm_per_s),
            ("kinematics.turn-reference-ms", k.turn_reference_ms),
            ("kinematics.turn-reference-deg", k.turn_reference_deg),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.scan.poll_ms == 0 {
            return Err(ConfigError::Invalid("scan.poll-ms must be at least 1".into()));
        }
        Ok(())
    }

    /// The config file path: `~/.shapebot/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".shapebot").join("config.toml"))
    }

    /// The report file: `report-path` if set, else `~/.shapebot/shapes_log.txt`.
    pub fn report_path(&self) -> Option<PathBuf> {
        self.report_path.clone().or_else(|| {
            dirs::home_dir().map(|h| h.join(".shapebot").join("shapes_log.txt"))
        })
    }

    pub fn parser(&self) -> Parser {
        Parser {
            enforce_triangle_bounds: self.plan.enforce_triangle_bounds,
        }
    }

    pub fn planner(&self) -> Planner {
        Planner::new(
            self.kinematics,
            self.motion.settle_ms,
            self.plan.triangle_turn,
        )
    }
}
