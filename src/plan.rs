//! Motion sequencing: turns a shape spec into timed robot commands.
//!
//! Planning is pure. Nothing here touches the robot; the runner executes
//! the finished [`ShapePlan`].

use serde::Serialize;

use crate::geometry::{self, GeometryError, TriangleTurn};
use crate::kinematics::{DistanceError, Kinematics};
use crate::model::{MotionCommand, ShapeSpec, SideSegment};

/// Errors that abort a single shape's plan.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Distance(#[from] DistanceError),
}

/// A fully timed plan for one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePlan {
    pub spec: ShapeSpec,
    pub segments: Vec<SideSegment>,
    pub commands: Vec<MotionCommand>,
}

impl ShapePlan {
    /// Sum of every command's duration, settle pauses included.
    pub fn total_ms(&self) -> u64 {
        self.commands.iter().map(MotionCommand::duration_ms).sum()
    }
}

/// Builds [`ShapePlan`]s from a kinematic model and pacing settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planner {
    kinematics: Kinematics,
    settle_ms: u64,
    triangle_turn: TriangleTurn,
}

impl Planner {
    pub fn new(kinematics: Kinematics, settle_ms: u64, triangle_turn: TriangleTurn) -> Self {
        Self {
            kinematics,
            settle_ms,
            triangle_turn,
        }
    }

    /// Plans `spec`: for each side, drive, settle, turn, settle.
    ///
    /// Every side is timed before any command is returned, so an error on a
    /// later side never leaves a partial plan behind.
    pub fn build(&self, spec: &ShapeSpec) -> Result<ShapePlan, PlanError> {
        let segments = geometry::plan(spec, self.triangle_turn)?;

        let mut commands = Vec::with_capacity(segments.len() * 4);
        for segment in &segments {
            let drive_ms = self.kinematics.time_for_distance(segment.distance_cm)?;
            let turn_ms = self.kinematics.time_for_turn(segment.turn_deg);
            commands.extend([
                MotionCommand::Drive {
                    duration_ms: drive_ms,
                },
                MotionCommand::Pause {
                    duration_ms: self.settle_ms,
                },
                MotionCommand::Turn {
                    duration_ms: turn_ms,
                },
                MotionCommand::Pause {
                    duration_ms: self.settle_ms,
                },
            ]);
        }

        Ok(ShapePlan {
            spec: *spec,
            segments,
            commands,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(Kinematics::default(), 500, TriangleTurn::Legacy)
    }
}
