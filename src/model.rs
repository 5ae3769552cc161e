//! Core data model for shapebot.
//!
//! These types carry a shape from the scanned descriptor to the session report:
//! shape specs, side segments, motion commands, and completed shape records.

mod motion;
mod record;
mod shape;

pub use motion::{MotionCommand, SideSegment};
pub use record::ShapeRecord;
pub use shape::{MAX_SIDE_CM, MIN_SIDE_CM, ShapeKind, ShapeSpec};
