//! Hardware seams: the camera and the robot body.
//!
//! The planner and session never touch hardware. Everything physical goes
//! through [`Camera`] and [`Robot`], so a board driver can be dropped in
//! without changing the core. [`ScriptedCamera`] and [`SimulatedRobot`] stand
//! in for hardware on a workstation and in tests.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

/// A captured camera frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub pixels: Vec<u8>,
}

/// Captures frames and decodes optical codes from them.
pub trait Camera {
    fn capture_frame(&mut self) -> Frame;

    /// The decoded payload, or `None` if no readable code is in view.
    fn decode(&mut self, frame: &Frame) -> Option<String>;
}

/// The robot's motors, settle timer, and underlights.
pub trait Robot {
    /// Runs the wheels at the given powers, blocking for `duration_ms`.
    fn drive(&mut self, left_power: i32, right_power: i32, duration_ms: u64);

    /// Waits with the motors idle.
    fn pause(&mut self, duration_ms: u64);

    fn set_indicator(&mut self, rgb: [u8; 3]);

    fn clear_indicator(&mut self);

    /// Milliseconds on the robot's clock. Only differences are meaningful.
    fn uptime_ms(&self) -> u64;
}

/// A camera that replays a fixed sequence of frames.
///
/// Each frame's pixels hold the code payload as UTF-8; an empty frame has no
/// readable code. Once the script runs out, every frame is empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCamera {
    frames: VecDeque<Frame>,
}

impl ScriptedCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame showing a code with `payload`.
    pub fn show(&mut self, payload: &str) {
        self.frames.push_back(Frame {
            pixels: payload.as_bytes().to_vec(),
        });
    }

    /// Queues a frame with nothing readable in view.
    #[cfg(test)]
    pub fn show_blank(&mut self) {
        self.frames.push_back(Frame::default());
    }
}

impl Camera for ScriptedCamera {
    fn capture_frame(&mut self) -> Frame {
        self.frames.pop_front().unwrap_or_default()
    }

    fn decode(&mut self, frame: &Frame) -> Option<String> {
        if frame.pixels.is_empty() {
            return None;
        }
        String::from_utf8(frame.pixels.clone()).ok()
    }
}

/// One call made on a [`SimulatedRobot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuation {
    Drive {
        left_power: i32,
        right_power: i32,
        duration_ms: u64,
    },
    Pause {
        duration_ms: u64,
    },
    SetIndicator([u8; 3]),
    ClearIndicator,
}

/// A robot that records every call instead of moving.
///
/// Time is virtual: drives and pauses advance the clock by their duration
/// immediately. With `realtime` set they also block for that long, which is
/// useful when watching a session unfold.
#[derive(Debug)]
pub struct SimulatedRobot {
    realtime: bool,
    clock_ms: u64,
    started: Instant,
    history: Vec<Actuation>,
}

impl SimulatedRobot {
    pub fn new(realtime: bool) -> Self {
        Self {
            realtime,
            clock_ms: 0,
            started: Instant::now(),
            history: Vec::new(),
        }
    }

    /// Every call made so far, oldest first.
    pub fn history(&self) -> &[Actuation] {
        &self.history
    }

    fn advance(&mut self, duration_ms: u64) {
        self.clock_ms += duration_ms;
        if self.realtime {
            thread::sleep(Duration::from_millis(duration_ms));
        }
    }
}

impl Robot for SimulatedRobot {
    fn drive(&mut self, left_power: i32, right_power: i32, duration_ms: u64) {
        tracing::debug!(left_power, right_power, duration_ms, "drive");
        self.history.push(Actuation::Drive {
            left_power,
            right_power,
            duration_ms,
        });
        self.advance(duration_ms);
    }

    fn pause(&mut self, duration_ms: u64) {
        self.history.push(Actuation::Pause { duration_ms });
        self.advance(duration_ms);
    }

    fn set_indicator(&mut self, rgb: [u8; 3]) {
        tracing::debug!(?rgb, "indicator on");
        self.history.push(Actuation::SetIndicator(rgb));
    }

    fn clear_indicator(&mut self) {
        tracing::debug!("indicator off");
        self.history.push(Actuation::ClearIndicator);
    }

    fn uptime_ms(&self) -> u64 {
        if self.realtime {
            self.started.elapsed().as_millis() as u64
        } else {
            self.clock_ms
        }
    }
}
