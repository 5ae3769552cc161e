//! Open-loop kinematic model.
//!
//! The robot has no odometry. Distance and rotation are reached purely by
//! running the motors for a computed time at a fixed power, so accuracy is
//! bounded by how well these constants match the floor, battery, and wheels.

use serde::{Deserialize, Serialize};

use crate::model::{MAX_SIDE_CM, MIN_SIDE_CM};

/// Errors converting a distance into a drive duration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    #[error("distance must be between {min} and {max} cm, got {distance_cm}", min = MIN_SIDE_CM, max = MAX_SIDE_CM)]
    OutOfRange { distance_cm: i32 },

    #[error("distance {distance_cm} cm gives a non-positive drive time")]
    InvalidDuration { distance_cm: i32 },
}

/// Calibration constants for converting geometry into motor run times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Kinematics {
    /// Forward speed at the drive power, in cm/s.
    pub speed_cm_per_s: f64,

    /// A turn of this many milliseconds at the turn power...
    pub turn_reference_ms: f64,

    /// ...rotates the robot by this many degrees.
    pub turn_reference_deg: f64,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            speed_cm_per_s: 12.33,
            turn_reference_ms: 1500.0,
            turn_reference_deg: 115.0,
        }
    }
}

impl Kinematics {
    /// Milliseconds of straight driving needed to cover `distance_cm`.
    pub fn time_for_distance(&self, distance_cm: i32) -> Result<u64, DistanceError> {
        if !(MIN_SIDE_CM..=MAX_SIDE_CM).contains(&distance_cm) {
            return Err(DistanceError::OutOfRange { distance_cm });
        }
        let millis = (f64::from(distance_cm) / self.speed_cm_per_s * 1000.0).floor();
        if !millis.is_finite() || millis <= 0.0 {
            return Err(DistanceError::InvalidDuration { distance_cm });
        }
        Ok(millis as u64)
    }

    /// Milliseconds of in-place rotation needed to turn `angle_deg`.
    ///
    /// Scales linearly from the reference turn. Zero, negative, and
    /// non-finite angles yield a zero-length turn.
    pub fn time_for_turn(&self, angle_deg: f64) -> u64 {
        let millis = (angle_deg * self.turn_reference_ms / self.turn_reference_deg).floor();
        if millis.is_finite() && millis > 0.0 {
            millis as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_times_match_calibration() {
        let k = Kinematics::default();
        assert_eq!(k.time_for_distance(15).unwrap(), 1216);
        assert_eq!(k.time_for_distance(40).unwrap(), 3244);
        assert_eq!(k.time_for_distance(85).unwrap(), 6893);
    }

    #[test]
    fn distance_time_is_positive_and_monotonic() {
        let k = Kinematics::default();
        let mut previous = 0;
        for cm in MIN_SIDE_CM..=MAX_SIDE_CM {
            let millis = k.time_for_distance(cm).unwrap();
            assert!(millis > 0);
            assert!(millis >= previous);
            previous = millis;
        }
    }

    #[test]
    fn distance_outside_bounds_is_rejected() {
        let k = Kinematics::default();
        for cm in [-1, 0, 14, 86, 200] {
            assert_eq!(
                k.time_for_distance(cm),
                Err(DistanceError::OutOfRange { distance_cm: cm })
            );
        }
    }

    #[test]
    fn absurd_speed_gives_invalid_duration() {
        let k = Kinematics {
            speed_cm_per_s: 1.0e9,
            ..Kinematics::default()
        };
        assert_eq!(
            k.time_for_distance(40),
            Err(DistanceError::InvalidDuration { distance_cm: 40 })
        );
    }

    #[test]
    fn turn_time_scales_linearly() {
        let k = Kinematics::default();
        assert_eq!(k.time_for_turn(115.0), 1500);
        assert_eq!(k.time_for_turn(92.0), 1200);
        assert_eq!(k.time_for_turn(90.0), 1173);
        assert_eq!(k.time_for_turn(72.0), 939);
        assert_eq!(k.time_for_turn(60.0), 782);
        for angle in [1.0, 33.3, 126.87, 143.13, 179.0] {
            let expected = angle / 115.0 * 1500.0;
            assert!((k.time_for_turn(angle) as f64 - expected).abs() < 1.0);
        }
    }

    #[test]
    fn non_positive_turn_is_a_no_op() {
        let k = Kinematics::default();
        assert_eq!(k.time_for_turn(0.0), 0);
        assert_eq!(k.time_for_turn(-45.0), 0);
        assert_eq!(k.time_for_turn(f64::NAN), 0);
    }
}
