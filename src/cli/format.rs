//! Output formatting for CLI display.

use std::path::Path;

use crate::plan::ShapePlan;
use crate::runner::ShapeOutcome;
use crate::trace::PathTrace;

/// Format a plan as one line per side plus a total.
pub(super) fn format_plan(plan: &ShapePlan) -> String {
    let mut lines = vec![format!("{} ({})", plan.spec, plan.spec.kind())];
    for (n, (segment, step)) in plan.segments.iter().zip(plan.commands.chunks(4)).enumerate() {
        let [drive, _, turn, _] = step else {
            continue;
        };
        lines.push(format!(
            "  {}. drive {} cm ({} ms), turn {:.2}° ({} ms)",
            n + 1,
            segment.distance_cm,
            drive.duration_ms(),
            segment.turn_deg,
            turn.duration_ms()
        ));
    }
    lines.push(format!("  total: {} ms", plan.total_ms()));
    lines.join("\n") + "\n"
}

/// Confirmation printed once the session report has been appended.
pub(super) fn format_saved(path: &Path) -> String {
    format!(
        "Data has been successfully saved to the log file.\n{}",
        path.display()
    )
}

pub(super) fn format_trace(trace: &PathTrace) -> String {
    let end = trace.vertices.last().copied().unwrap_or_default();
    format!(
        "  trace: ends at ({:.2}, {:.2}), gap {:.2} cm, heading {:.2}°",
        end.x,
        end.y,
        trace.closure_gap(),
        trace.heading_deg
    )
}

/// Format one batch outcome for human-readable display.
pub(super) fn format_outcome(outcome: &ShapeOutcome) -> String {
    match outcome {
        ShapeOutcome::Drawn(record) => {
            format!(
                "drew {} in {:.2} seconds",
                record.spec,
                record.duration_ms as f64 / 1000.0
            )
        }
        ShapeOutcome::Rejected(error) => format!("rejected: {error}"),
        ShapeOutcome::Failed { spec, error } => format!("failed {spec}: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use glam::DVec2;

    use crate::descriptor::ParseError;
    use crate::kinematics::DistanceError;
    use crate::model::{ShapeRecord, ShapeSpec};
    use crate::plan::{PlanError, Planner};
    use crate::runner::DrawError;

    #[test]
    fn format_square_plan() {
        let plan = Planner::default().build(&ShapeSpec::Square { side: 40 }).unwrap();
        let side = "  {n}. drive 40 cm (3244 ms), turn 90.00° (1173 ms)\n";
        let expected = format!(
            "S-40 (Square)\n{}{}{}{}  total: 21668 ms\n",
            side.replace("{n}", "1"),
            side.replace("{n}", "2"),
            side.replace("{n}", "3"),
            side.replace("{n}", "4"),
        );
        assert_eq!(format_plan(&plan), expected);
    }

    #[test]
    fn format_triangle_plan_starts_with_longest_side() {
        let plan = Planner::default()
            .build(&ShapeSpec::Triangle { a: 30, b: 40, c: 50 })
            .unwrap();
        let text = format_plan(&plan);
        assert!(text.starts_with("T-30-40-50 (Triangle)\n  1. drive 50 cm (4055 ms), turn 92.00° (1200 ms)\n"));
    }

    #[test]
    fn format_trace_line() {
        let trace = PathTrace {
            vertices: vec![DVec2::ZERO, DVec2::new(50.0, 0.0), DVec2::new(26.0, 22.0)],
            heading_deg: 360.0,
        };
        assert_eq!(
            format_trace(&trace),
            "  trace: ends at (26.00, 22.00), gap 34.06 cm, heading 360.00°"
        );
    }

    #[test]
    fn format_saved_names_the_report_file() {
        let path = Path::new("/home/pi/.shapebot/shapes_log.txt");
        assert_eq!(
            format_saved(path),
            "Data has been successfully saved to the log file.\n/home/pi/.shapebot/shapes_log.txt"
        );
    }

    #[test]
    fn format_outcomes() {
        let drawn = ShapeOutcome::Drawn(ShapeRecord::new(ShapeSpec::Hexagon { side: 30 }, 21_340));
        assert_eq!(format_outcome(&drawn), "drew H-30 in 21.34 seconds");

        let rejected = ShapeOutcome::Rejected(ParseError::MalformedTriangle {
            token: "T-30-40".to_string(),
        });
        assert_eq!(
            format_outcome(&rejected),
            "rejected: malformed triangle `T-30-40`: expected T-xx-yy-zz"
        );

        let failed = ShapeOutcome::Failed {
            spec: ShapeSpec::Triangle { a: 90, b: 50, c: 50 },
            error: DrawError::Plan(PlanError::Distance(DistanceError::OutOfRange {
                distance_cm: 90,
            })),
        };
        assert!(format_outcome(&failed).starts_with("failed T-90-50-50: "));
    }
}
