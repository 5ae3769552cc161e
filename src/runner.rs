//! Batch execution: scan, parse, plan, drive, record.
//!
//! Shapes in a batch run strictly one after another on the one robot. A shape
//! that fails to parse or plan is reported and skipped; the rest of the batch
//! still runs.

use crate::config::{Config, IndicatorConfig, MotionConfig, ScanConfig};
use crate::descriptor::{ParseError, Parser};
use crate::model::{MotionCommand, ShapeRecord, ShapeSpec};
use crate::plan::{PlanError, Planner, ShapePlan};
use crate::robot::{Camera, Robot};
use crate::scan::{ScanError, scan_for_descriptor};
use crate::session::{Session, SessionError};

/// Errors that abandon a whole batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that abandon a single shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// What happened to one token of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeOutcome {
    /// Drawn and recorded in the session.
    Drawn(ShapeRecord),

    /// The token did not parse; nothing moved.
    Rejected(ParseError),

    /// The shape parsed but could not be drawn.
    Failed { spec: ShapeSpec, error: DrawError },
}

/// Runs batches of shapes on a robot, recording each into a session.
pub struct Runner<'a, R> {
    robot: &'a mut R,
    session: &'a Session,
    parser: Parser,
    planner: Planner,
    motion: MotionConfig,
    indicator: IndicatorConfig,
    scan: ScanConfig,
}

impl<'a, R: Robot> Runner<'a, R> {
    pub fn new(robot: &'a mut R, session: &'a Session, config: &Config) -> Self {
        Self {
            robot,
            session,
            parser: config.parser(),
            planner: config.planner(),
            motion: config.motion,
            indicator: config.indicator,
            scan: config.scan,
        }
    }

    /// Waits for a code, then runs the batch it carries.
    ///
    /// A scan timeout abandons the batch before anything moves.
    pub fn scan_and_run(&mut self, camera: &mut impl Camera) -> Result<Vec<ShapeOutcome>, BatchError> {
        let descriptor = scan_for_descriptor(camera, &self.scan)?;
        Ok(self.run_batch(&descriptor)?)
    }

    /// Parses `descriptor` and draws every valid shape in order.
    pub fn run_batch(&mut self, descriptor: &str) -> Result<Vec<ShapeOutcome>, ParseError> {
        let parsed = self.parser.parse(descriptor)?;

        let outcomes = parsed
            .into_iter()
            .map(|parsed| match parsed {
                Ok(spec) => match self.draw(&spec) {
                    Ok(record) => ShapeOutcome::Drawn(record),
                    Err(error) => {
                        tracing::warn!(shape = %spec, %error, "shape not drawn");
                        ShapeOutcome::Failed { spec, error }
                    }
                },
                Err(error) => {
                    tracing::warn!(%error, "shape rejected");
                    ShapeOutcome::Rejected(error)
                }
            })
            .collect();
        Ok(outcomes)
    }

    /// Plans, drives, and records a single shape.
    pub fn draw(&mut self, spec: &ShapeSpec) -> Result<ShapeRecord, DrawError> {
        if self.session.is_closed() {
            return Err(SessionError::Closed.into());
        }
        let plan = self.planner.build(spec)?;

        tracing::info!(shape = %spec, planned_ms = plan.total_ms(), "drawing");
        let duration_ms = self.execute(&plan);
        let record = ShapeRecord::new(*spec, duration_ms);

        self.signal_done();
        self.session.record_shape(record.clone())?;
        Ok(record)
    }

    /// Sends every command of `plan` to the robot, returning the elapsed time.
    pub fn execute(&mut self, plan: &ShapePlan) -> u64 {
        let started = self.robot.uptime_ms();
        for command in &plan.commands {
            match *command {
                MotionCommand::Drive { duration_ms } => {
                    let power = self.motion.drive_power;
                    self.robot.drive(power, power, duration_ms);
                }
                MotionCommand::Turn { duration_ms } => {
                    self.robot.drive(0, self.motion.turn_power, duration_ms);
                }
                MotionCommand::Pause { duration_ms } => self.robot.pause(duration_ms),
            }
        }
        self.robot.uptime_ms().saturating_sub(started)
    }

    /// Flashes the underlights once a shape is finished.
    fn signal_done(&mut self) {
        self.robot.pause(self.indicator.delay_ms);
        self.robot.set_indicator(self.indicator.color);
        self.robot.pause(self.indicator.hold_ms);
        self.robot.clear_indicator();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::geometry::GeometryError;
    use crate::kinematics::DistanceError;
    use crate::model::ShapeKind;
    use crate::robot::{Actuation, ScriptedCamera, SimulatedRobot};

    fn drives(robot: &SimulatedRobot) -> Vec<(i32, i32, u64)> {
        robot
            .history()
            .iter()
            .filter_map(|a| match *a {
                Actuation::Drive {
                    left_power,
                    right_power,
                    duration_ms,
                } => Some((left_power, right_power, duration_ms)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn square_drives_and_turns_four_times() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let config = Config::default();

        let outcomes = Runner::new(&mut robot, &session, &config)
            .run_batch("S-40")
            .unwrap();

        assert_eq!(outcomes.len(), 1);
        let ShapeOutcome::Drawn(record) = &outcomes[0] else {
            panic!("expected drawn, got {:?}", outcomes[0]);
        };
        // Drive, pause, turn, pause on each of four sides.
        assert_eq!(record.duration_ms, 4 * (3244 + 500 + 1173 + 500));
        assert_eq!(
            drives(&robot),
            [(40, 40, 3244), (0, 58, 1173)].repeat(4)
        );
        assert_eq!(session.summary().count(), 1);
    }

    #[test]
    fn indicator_flashes_after_each_shape() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let config = Config::default();

        Runner::new(&mut robot, &session, &config)
            .run_batch("S-40")
            .unwrap();

        let tail = &robot.history()[robot.history().len() - 4..];
        assert_eq!(
            tail,
            [
                Actuation::Pause { duration_ms: 1500 },
                Actuation::SetIndicator([0, 255, 0]),
                Actuation::Pause { duration_ms: 2000 },
                Actuation::ClearIndicator,
            ]
        );
    }

    #[test]
    fn bad_shapes_do_not_stop_the_batch() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let config = Config::default();

        let outcomes = Runner::new(&mut robot, &session, &config)
            .run_batch("S-40&X-99&T-20-30-50&H-30")
            .unwrap();

        assert_eq!(outcomes.len(), 4);
        assert!(matches!(outcomes[0], ShapeOutcome::Drawn(_)));
        assert!(matches!(
            outcomes[1],
            ShapeOutcome::Rejected(ParseError::UnknownShapeFormat { .. })
        ));
        assert!(matches!(
            outcomes[2],
            ShapeOutcome::Rejected(ParseError::InvalidTriangle { .. })
        ));
        assert!(matches!(outcomes[3], ShapeOutcome::Drawn(_)));

        let summary = session.summary();
        assert_eq!(summary.count(), 2);
        assert_eq!(summary.most_frequent(), Some((ShapeKind::Square, 1)));
    }

    #[test]
    fn plan_failure_is_isolated_to_its_shape() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let mut config = Config::default();
        config.plan.enforce_triangle_bounds = false;

        let outcomes = Runner::new(&mut robot, &session, &config)
            .run_batch("T-90-50-50&S-20")
            .unwrap();

        assert_eq!(
            outcomes[0],
            ShapeOutcome::Failed {
                spec: ShapeSpec::Triangle { a: 90, b: 50, c: 50 },
                error: DrawError::Plan(PlanError::Distance(DistanceError::OutOfRange {
                    distance_cm: 90
                })),
            }
        );
        assert!(matches!(outcomes[1], ShapeOutcome::Drawn(_)));
        // Only the square moved the robot.
        assert_eq!(drives(&robot).len(), 8);
    }

    #[test]
    fn too_many_shapes_moves_nothing() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let config = Config::default();

        let err = Runner::new(&mut robot, &session, &config)
            .run_batch("S-20&S-20&S-20&S-20&S-20&S-20")
            .unwrap_err();

        assert_eq!(err, ParseError::TooManyShapes { count: 6 });
        assert!(robot.history().is_empty());
        assert_eq!(session.summary().count(), 0);
    }

    #[test]
    fn closed_session_refuses_to_draw() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let config = Config::default();
        session.render();

        let err = Runner::new(&mut robot, &session, &config)
            .draw(&ShapeSpec::Square { side: 40 })
            .unwrap_err();

        assert_eq!(err, DrawError::Session(SessionError::Closed));
        assert!(robot.history().is_empty());
    }

    #[test]
    fn scan_and_run_uses_decoded_payload() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let mut config = Config::default();
        config.scan.poll_ms = 1;
        let mut camera = ScriptedCamera::new();
        camera.show_blank();
        camera.show("P-20&H-20");

        let outcomes = Runner::new(&mut robot, &session, &config)
            .scan_and_run(&mut camera)
            .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(session.summary().count(), 2);
    }

    #[test]
    fn scan_timeout_abandons_batch() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let mut config = Config::default();
        config.scan.timeout_ms = 10;
        config.scan.poll_ms = 2;

        let err = Runner::new(&mut robot, &session, &config)
            .scan_and_run(&mut ScriptedCamera::new())
            .unwrap_err();

        assert_eq!(err, BatchError::Scan(ScanError::Timeout { timeout_ms: 10 }));
        assert!(robot.history().is_empty());
    }

    #[test]
    fn degenerate_triangle_from_legacy_parsing_is_a_geometry_failure() {
        let mut robot = SimulatedRobot::new(false);
        let session = Session::new();
        let config = Config::default();

        let err = Runner::new(&mut robot, &session, &config)
            .draw(&ShapeSpec::Triangle { a: 20, b: 30, c: 50 })
            .unwrap_err();

        assert!(matches!(
            err,
            DrawError::Plan(PlanError::Geometry(GeometryError::DegenerateTriangle { .. }))
        ));
    }
}
