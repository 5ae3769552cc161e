//! Waiting for a readable code in front of the camera.

use std::thread;
use std::time::Instant;

use crate::config::ScanConfig;
use crate::robot::Camera;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("no code detected within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}

/// Polls `camera` until it decodes a non-empty payload or the timeout expires.
///
/// One frame is captured per poll. The first non-empty payload is returned.
pub fn scan_for_descriptor(camera: &mut impl Camera, config: &ScanConfig) -> Result<String, ScanError> {
    let deadline = Instant::now() + config.timeout();
    let mut attempts = 0u32;

    while Instant::now() < deadline {
        attempts += 1;
        let frame = camera.capture_frame();
        if let Some(payload) = camera.decode(&frame).filter(|p| !p.is_empty()) {
            tracing::info!(attempts, %payload, "code decoded");
            return Ok(payload);
        }
        tracing::info!(attempts, "no code in view; adjust the camera");
        thread::sleep(config.poll());
    }

    Err(ScanError::Timeout {
        timeout_ms: config.timeout_ms,
    })
}
