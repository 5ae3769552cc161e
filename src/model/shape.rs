//! Shape kinds and validated shape specs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shortest side the robot will draw, in centimetres.
pub const MIN_SIDE_CM: i32 = 15;

/// Longest side the robot will draw, in centimetres.
pub const MAX_SIDE_CM: i32 = 85;

/// The closed set of shapes the robot can trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Square,
    Triangle,
    Pentagon,
    Hexagon,
}

impl ShapeKind {
    /// The one-letter prefix used in descriptors (`S-40`, `T-30-40-50`, ...).
    pub fn prefix(self) -> char {
        match self {
            Self::Square => 'S',
            Self::Triangle => 'T',
            Self::Pentagon => 'P',
            Self::Hexagon => 'H',
        }
    }

    /// Number of sides.
    pub fn sides(self) -> usize {
        match self {
            Self::Triangle => 3,
            Self::Square => 4,
            Self::Pentagon => 5,
            Self::Hexagon => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Triangle => "Triangle",
            Self::Pentagon => "Pentagon",
            Self::Hexagon => "Hexagon",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated shape request.
///
/// Produced by the descriptor parser. Side lengths are whole centimetres;
/// triangle sides keep the order they were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShapeSpec {
    Square { side: i32 },
    Triangle { a: i32, b: i32, c: i32 },
    Pentagon { side: i32 },
    Hexagon { side: i32 },
}

impl ShapeSpec {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Square { .. } => ShapeKind::Square,
            Self::Triangle { .. } => ShapeKind::Triangle,
            Self::Pentagon { .. } => ShapeKind::Pentagon,
            Self::Hexagon { .. } => ShapeKind::Hexagon,
        }
    }

    /// Side lengths in input order: one for regular polygons, three for triangles.
    pub fn sides(&self) -> Vec<i32> {
        match *self {
            Self::Square { side } | Self::Pentagon { side } | Self::Hexagon { side } => vec![side],
            Self::Triangle { a, b, c } => vec![a, b, c],
        }
    }

    /// The dimension that identifies this shape in the report.
    ///
    /// Regular polygons use their side; triangles use the first side as given.
    pub fn identifying_side(&self) -> i32 {
        match *self {
            Self::Square { side } | Self::Pentagon { side } | Self::Hexagon { side } => side,
            Self::Triangle { a, .. } => a,
        }
    }
}

/// Formats the spec back into descriptor form, e.g. `T-50-40-30`.
impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Triangle { a, b, c } => write!(f, "T-{a}-{b}-{c}"),
            Self::Square { side } | Self::Pentagon { side } | Self::Hexagon { side } => {
                write!(f, "{}-{side}", self.kind().prefix())
            }
        }
    }
}
