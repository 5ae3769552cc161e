//! Side segments and the timed motion commands built from them.

use serde::{Deserialize, Serialize};

/// One side of a shape path: drive `distance_cm`, then rotate `turn_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideSegment {
    pub distance_cm: i32,
    pub turn_deg: f64,
}

/// One atomic robot instruction.
///
/// Durations are milliseconds. Wheel power is not part of the command;
/// the runner applies the configured drive and turn powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum MotionCommand {
    /// Drive straight at the fixed drive power.
    Drive { duration_ms: u64 },

    /// Rotate in place at the fixed turn power.
    Turn { duration_ms: u64 },

    /// Settle pause: motors idle while the chassis stops moving.
    Pause { duration_ms: u64 },
}

impl MotionCommand {
    pub fn duration_ms(&self) -> u64 {
        match *self {
            Self::Drive { duration_ms } | Self::Turn { duration_ms } | Self::Pause { duration_ms } => {
                duration_ms
            }
        }
    }
}
