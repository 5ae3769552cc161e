//! Shape geometry: side order, turn angles, and area.
//!
//! Regular polygons are traced with identical sides and a constant exterior
//! turn of `360 / n`. Triangles are traced starting from the longest side,
//! with turn angles derived from the law of cosines.

use serde::{Deserialize, Serialize};

use crate::model::{ShapeSpec, SideSegment};

/// Turn taken after a triangle's first (longest) side in legacy mode.
///
/// Equals the 1200 ms turn used on the physical robot at the 1500 ms / 115°
/// calibration. It does not depend on the triangle's angles.
pub const LEGACY_FIRST_TURN_DEG: f64 = 92.0;

/// Errors that make a shape impossible to trace.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("side length must be positive, got {side}")]
    NonPositiveSide { side: i32 },

    #[error("sides {a}, {b}, {c} do not form a triangle")]
    DegenerateTriangle { a: i32, b: i32, c: i32 },
}

/// How the turn after a triangle's first side is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriangleTurn {
    /// Fixed [`LEGACY_FIRST_TURN_DEG`] turn after the first side.
    #[default]
    Legacy,

    /// The computed exterior angle for the first side, so the turns sum to 360°.
    Corrected,
}

/// True iff `a`, `b`, `c` satisfy the strict triangle inequality.
pub fn is_valid_triangle(a: i32, b: i32, c: i32) -> bool {
    let (a, b, c) = (i64::from(a), i64::from(b), i64::from(c));
    a + b > c && a + c > b && b + c > a
}

/// Triangle sides reordered for tracing, with their interior angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleLayout {
    /// Sides in tracing order: longest first, the other two in input order.
    pub sides: [i32; 3],

    /// Interior angles in degrees, each opposite the side at the same index.
    pub interior: [f64; 3],
}

impl TriangleLayout {
    pub fn new(a: i32, b: i32, c: i32) -> Result<Self, GeometryError> {
        if let Some(&side) = [a, b, c].iter().find(|&&s| s <= 0) {
            return Err(GeometryError::NonPositiveSide { side });
        }
        if !is_valid_triangle(a, b, c) {
            return Err(GeometryError::DegenerateTriangle { a, b, c });
        }

        let longest = a.max(b).max(c);
        let sides = if longest == a {
            [a, b, c]
        } else if longest == b {
            [b, a, c]
        } else {
            [c, a, b]
        };
        let [first, second, third] = sides.map(f64::from);

        let angle_a = angle_opposite(first, second, third);
        let angle_b = angle_opposite(second, first, third);
        if !angle_a.is_finite() || !angle_b.is_finite() {
            return Err(GeometryError::DegenerateTriangle { a, b, c });
        }

        Ok(Self {
            sides,
            interior: [angle_a, angle_b, 180.0 - angle_a - angle_b],
        })
    }

    /// Exterior angles (`180 - interior`) at each vertex, in tracing order.
    pub fn exterior(&self) -> [f64; 3] {
        self.interior.map(|angle| 180.0 - angle)
    }
}

/// Interior angle opposite side `x`, given the other two sides, in degrees.
fn angle_opposite(x: f64, y: f64, z: f64) -> f64 {
    ((y * y + z * z - x * x) / (2.0 * y * z)).acos().to_degrees()
}

/// Lays out the sides of `spec` as an ordered list of segments.
pub fn plan(spec: &ShapeSpec, triangle_turn: TriangleTurn) -> Result<Vec<SideSegment>, GeometryError> {
    match *spec {
        ShapeSpec::Triangle { a, b, c } => {
            let layout = TriangleLayout::new(a, b, c)?;
            let exterior = layout.exterior();
            let first_turn = match triangle_turn {
                TriangleTurn::Legacy => LEGACY_FIRST_TURN_DEG,
                TriangleTurn::Corrected => exterior[0],
            };
            let turns = [first_turn, exterior[1], exterior[2]];
            Ok(layout
                .sides
                .iter()
                .zip(turns)
                .map(|(&distance_cm, turn_deg)| SideSegment {
                    distance_cm,
                    turn_deg,
                })
                .collect())
        }
        ShapeSpec::Square { side } | ShapeSpec::Pentagon { side } | ShapeSpec::Hexagon { side } => {
            if side <= 0 {
                return Err(GeometryError::NonPositiveSide { side });
            }
            let n = spec.kind().sides();
            let segment = SideSegment {
                distance_cm: side,
                turn_deg: 360.0 / n as f64,
            };
            Ok(vec![segment; n])
        }
    }
}

/// Exterior angles of a triangle spec, or `None` for regular polygons.
pub fn exterior_angles(spec: &ShapeSpec) -> Result<Option<[f64; 3]>, GeometryError> {
    match *spec {
        ShapeSpec::Triangle { a, b, c } => Ok(Some(TriangleLayout::new(a, b, c)?.exterior())),
        _ => Ok(None),
    }
}

/// Enclosed area in cm².
///
/// Triangles use Heron's formula on the sides as given; an impossible
/// triangle has zero area.
pub fn area(spec: &ShapeSpec) -> f64 {
    match *spec {
        ShapeSpec::Square { side } => f64::from(side).powi(2),
        ShapeSpec::Pentagon { side } => {
            0.25 * (5.0 * (5.0 + 2.0 * 5f64.sqrt())).sqrt() * f64::from(side).powi(2)
        }
        ShapeSpec::Hexagon { side } => 3.0 * 3f64.sqrt() / 2.0 * f64::from(side).powi(2),
        ShapeSpec::Triangle { a, b, c } => {
            let (a, b, c) = (f64::from(a), f64::from(b), f64::from(c));
            let s = (a + b + c) / 2.0;
            let squared = s * (s - a) * (s - b) * (s - c);
            if squared > 0.0 { squared.sqrt() } else { 0.0 }
        }
    }
}
