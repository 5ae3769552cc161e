//! CLI interface for shapebot.
//!
//! - `shapebot plan <DESCRIPTOR>`: show the timed plan for a code, without moving.
//! - `shapebot draw <DESCRIPTOR>...`: run each code as one scan on the robot,
//!   then print the session report and append it to the report log.
//! - `shapebot report`: print every session recorded so far.

mod format;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use jiff::Timestamp;
use serde::Serialize;

use crate::config::Config;
use crate::descriptor::ParseError;
use crate::model::ShapeSpec;
use crate::plan::{Planner, ShapePlan};
use crate::robot::{ScriptedCamera, SimulatedRobot};
use crate::runner::Runner;
use crate::session::Session;
use crate::storage::ReportLog;
use crate::trace::{self, PathTrace};

use format::{format_outcome, format_plan, format_saved, format_trace};

/// shapebot: draw shapes from scanned codes.
#[derive(Debug, Parser)]
#[command(name = "shapebot", version, after_long_help = DESCRIPTOR_HELP)]
pub struct Cli {
    /// Config file (default: ~/.shapebot/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more: `-v` for progress, `-vv` for every motor call.
    /// `SHAPEBOT_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

const DESCRIPTOR_HELP: &str = r#"Descriptors:
  S-<side>               square
  P-<side>               pentagon
  H-<side>               hexagon
  T-<a>-<b>-<c>          triangle
  Sides are whole centimetres from 15 to 85. Join up to 5 shapes with `&`.

Examples:
  shapebot plan 'T-30-40-50' --trace
  shapebot draw 'S-40&H-30' 'P-25'
  shapebot report"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the timed motion plan for a descriptor without driving.
    Plan {
        /// Descriptor, e.g. `S-40&T-30-40-50`.
        descriptor: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Include the dead-reckoned path and how far it ends from the start.
        #[arg(long)]
        trace: bool,
    },

    /// Draw shapes on the simulated robot and report the session.
    ///
    /// Each descriptor is presented to the camera as one code, in order.
    Draw {
        /// One or more descriptors.
        #[arg(required = true)]
        descriptors: Vec<String>,

        /// Block for each command's real duration.
        #[arg(long)]
        realtime: bool,

        /// Do not append the session to the report log.
        #[arg(long)]
        no_report: bool,
    },

    /// Print the report log.
    Report,
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    match cli.command {
        Command::Plan {
            descriptor,
            json,
            trace,
        } => cmd_plan(config, &descriptor, json, trace),
        Command::Draw {
            descriptors,
            realtime,
            no_report,
        } => cmd_draw(config, &descriptors, realtime, no_report),
        Command::Report => cmd_report(config),
    }
}

/// One token's plan, or why it has none.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PlanEntry {
    Planned {
        plan: ShapePlan,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace: Option<PathTrace>,
    },
    Invalid {
        error: String,
    },
}

fn plan_entry(planner: &Planner, parsed: Result<ShapeSpec, ParseError>, with_trace: bool) -> PlanEntry {
    let planned = match parsed {
        Ok(spec) => planner.build(&spec).map_err(|e| format!("{spec}: {e}")),
        Err(e) => Err(e.to_string()),
    };
    match planned {
        Ok(plan) => {
            let trace = with_trace.then(|| trace::trace(&plan.segments));
            PlanEntry::Planned { plan, trace }
        }
        Err(error) => PlanEntry::Invalid { error },
    }
}

fn cmd_plan(config: &Config, descriptor: &str, json: bool, with_trace: bool) -> Result<(), String> {
    let parsed = config.parser().parse(descriptor).map_err(|e| e.to_string())?;
    let planner = config.planner();
    let entries: Vec<PlanEntry> = parsed
        .into_iter()
        .map(|p| plan_entry(&planner, p, with_trace))
        .collect();

    if json {
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| format!("failed to serialize plan: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    for entry in &entries {
        match entry {
            PlanEntry::Planned { plan, trace } => {
                print!("{}", format_plan(plan));
                if let Some(trace) = trace {
                    println!("{}", format_trace(trace));
                }
            }
            PlanEntry::Invalid { error } => println!("error: {error}"),
        }
    }
    Ok(())
}

fn cmd_draw(
    config: &Config,
    descriptors: &[String],
    realtime: bool,
    no_report: bool,
) -> Result<(), String> {
    let started_at = Timestamp::now();
    let session = Session::new();
    let mut robot = SimulatedRobot::new(realtime);
    let mut camera = ScriptedCamera::new();
    let mut runner = Runner::new(&mut robot, &session, config);

    for descriptor in descriptors {
        camera.show(descriptor);
        match runner.scan_and_run(&mut camera) {
            Ok(outcomes) => {
                for outcome in &outcomes {
                    println!("{}", format_outcome(outcome));
                }
            }
            Err(e) => eprintln!("Skipped `{descriptor}`: {e}"),
        }
    }

    let summary = session.summary();
    tracing::info!(
        shapes = summary.count(),
        total_ms = summary.total_ms(),
        actuations = robot.history().len(),
        "session finished"
    );

    let report = session.render();
    println!();
    print!("{report}");

    if no_report {
        return Ok(());
    }
    let path = config
        .report_path()
        .ok_or("could not determine home directory for the report log")?;
    let log = ReportLog::new(path).map_err(|e| format!("failed to open report log: {e}"))?;
    log.append_session(started_at, &report)
        .map_err(|e| format!("failed to write report log: {e}"))?;
    println!("{}", format_saved(log.path()));
    Ok(())
}

fn cmd_report(config: &Config) -> Result<(), String> {
    let path = config
        .report_path()
        .ok_or("could not determine home directory for the report log")?;
    let log = ReportLog::new(path).map_err(|e| format!("failed to open report log: {e}"))?;
    let contents = log
        .read()
        .map_err(|e| format!("failed to read report log: {e}"))?;

    if contents.is_empty() {
        println!("No sessions recorded");
    } else {
        print!("{contents}");
    }
    Ok(())
}
