//! Completed-shape records fed to the session.

use serde::{Deserialize, Serialize};

use crate::geometry;

use super::{ShapeKind, ShapeSpec};

/// The outcome of one shape the robot finished drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    pub spec: ShapeSpec,

    /// Enclosed area in cm².
    pub area: f64,

    /// Exterior angles of a triangle in degrees, in tracing order.
    /// `None` for regular polygons.
    pub exterior_angles: Option<[f64; 3]>,

    /// Wall-clock time the motion sequence took.
    pub duration_ms: u64,
}

impl ShapeRecord {
    /// Builds a record for `spec`, deriving area and angles from its geometry.
    pub fn new(spec: ShapeSpec, duration_ms: u64) -> Self {
        Self {
            spec,
            area: geometry::area(&spec),
            exterior_angles: geometry::exterior_angles(&spec).ok().flatten(),
            duration_ms,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.spec.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_record_has_no_angles() {
        let record = ShapeRecord::new(ShapeSpec::Square { side: 40 }, 19_000);
        assert_eq!(record.kind(), ShapeKind::Square);
        assert!((record.area - 1600.0).abs() < 1e-9);
        assert!(record.exterior_angles.is_none());
    }

    #[test]
    fn triangle_record_carries_exterior_angles() {
        let record = ShapeRecord::new(ShapeSpec::Triangle { a: 50, b: 40, c: 30 }, 15_000);
        let [a, b, c] = record.exterior_angles.unwrap();
        assert!((a - 90.0).abs() < 1e-9);
        assert!((b - 126.869_897_645).abs() < 1e-6);
        assert!((c - 143.130_102_354).abs() < 1e-6);
        assert!((record.area - 600.0).abs() < 1e-9);
    }
}
