//! Dead-reckoned path of a planned shape.
//!
//! The robot has no position feedback, so this is where a plan would put it if
//! every drive and turn were exact. Turns are counter-clockwise and the path
//! starts at the origin heading along +X.

use glam::DVec2;
use serde::Serialize;

use crate::model::SideSegment;

/// Vertices visited while tracing a list of segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathTrace {
    /// Start point followed by the end of every side.
    pub vertices: Vec<DVec2>,

    /// Total rotation in degrees after the last turn.
    pub heading_deg: f64,
}

impl PathTrace {
    /// Distance between where the path starts and where it ends.
    pub fn closure_gap(&self) -> f64 {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(start), Some(end)) => start.distance(*end),
            _ => 0.0,
        }
    }
}

pub fn trace(segments: &[SideSegment]) -> PathTrace {
    let mut position = DVec2::ZERO;
    let mut heading_deg = 0.0_f64;
    let mut vertices = Vec::with_capacity(segments.len() + 1);
    vertices.push(position);

    for segment in segments {
        let radians = heading_deg.to_radians();
        let direction = DVec2::new(radians.cos(), radians.sin());
        position += direction * f64::from(segment.distance_cm);
        vertices.push(position);
        heading_deg += segment.turn_deg;
    }

    PathTrace {
        vertices,
        heading_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::geometry::{self, TriangleTurn};
    use crate::model::ShapeSpec;

    fn traced(spec: ShapeSpec, turn: TriangleTurn) -> PathTrace {
        trace(&geometry::plan(&spec, turn).unwrap())
    }

    #[test]
    fn regular_polygons_close() {
        for spec in [
            ShapeSpec::Square { side: 40 },
            ShapeSpec::Pentagon { side: 25 },
            ShapeSpec::Hexagon { side: 85 },
        ] {
            let path = traced(spec, TriangleTurn::Legacy);
            assert!(path.closure_gap() < 1e-9, "{spec}: gap {}", path.closure_gap());
            assert!((path.heading_deg - 360.0).abs() < 1e-9);
        }
    }

    #[test]
    fn square_visits_corners() {
        let path = traced(ShapeSpec::Square { side: 40 }, TriangleTurn::Legacy);
        let expected = [(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0), (0.0, 0.0)];
        assert_eq!(path.vertices.len(), expected.len());
        for (v, (x, y)) in path.vertices.iter().zip(expected) {
            assert!(v.distance(DVec2::new(x, y)) < 1e-9, "{v} != ({x}, {y})");
        }
    }

    #[test]
    fn corrected_triangle_turns_a_full_circle() {
        let path = traced(ShapeSpec::Triangle { a: 50, b: 40, c: 30 }, TriangleTurn::Corrected);
        assert!((path.heading_deg - 360.0).abs() < 1e-9);

        // 50 along +X, 40 along +Y, then 30 on a 3-4-5 diagonal.
        let end = path.vertices[3];
        assert!(end.distance(DVec2::new(26.0, 22.0)) < 1e-9, "{end}");
    }

    #[test]
    fn legacy_triangle_over_rotates() {
        let path = traced(ShapeSpec::Triangle { a: 50, b: 40, c: 30 }, TriangleTurn::Legacy);
        assert!((path.heading_deg - 362.0).abs() < 1e-9);
        assert!(path.closure_gap() > 1.0);
    }

    #[test]
    fn empty_trace_has_no_gap() {
        let path = trace(&[]);
        assert_eq!(path.vertices, [DVec2::ZERO]);
        assert_eq!(path.closure_gap(), 0.0);
    }
}
