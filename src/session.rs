//! Session aggregation: running statistics over every drawn shape.
//!
//! A [`Session`] is owned by whoever drives the batch loop and passed down
//! explicitly. Recording and rendering go through one mutex, so a session can
//! be shared by reference with whichever thread finishes a shape.

use parking_lot::Mutex;

use crate::model::{ShapeKind, ShapeRecord};

/// Errors from mutating a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session has already been rendered; no more shapes can be recorded")]
    Closed,
}

/// Running totals for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    /// Every recorded shape, in completion order.
    records: Vec<ShapeRecord>,

    total_ms: u64,

    /// Occurrences per kind, in order of first appearance.
    frequency: Vec<(ShapeKind, u32)>,

    /// Index into `records` of the largest-area shape. Ties keep the earliest.
    largest: Option<usize>,

    closed: bool,
}

impl SessionSummary {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn largest(&self) -> Option<&ShapeRecord> {
        self.largest.map(|i| &self.records[i])
    }

    /// The most frequent kind and its count. Ties go to the kind seen first.
    pub fn most_frequent(&self) -> Option<(ShapeKind, u32)> {
        self.frequency
            .iter()
            .copied()
            .fold(None, |best, (kind, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((kind, count)),
            })
    }

    /// Mean duration in milliseconds, or `None` for an empty session.
    pub fn average_ms(&self) -> Option<f64> {
        if self.records.is_empty() {
            None
        } else {
            Some(self.total_ms as f64 / self.records.len() as f64)
        }
    }

    fn record(&mut self, record: ShapeRecord) {
        let kind = record.kind();
        match self.frequency.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, count)) => *count += 1,
            None => self.frequency.push((kind, 1)),
        }

        self.total_ms += record.duration_ms;

        let is_larger = self
            .largest()
            .is_none_or(|current| record.area > current.area);
        self.records.push(record);
        if is_larger {
            self.largest = Some(self.records.len() - 1);
        }
    }
}

/// Aggregates completed shapes and renders the session report.
#[derive(Debug, Default)]
pub struct Session {
    summary: Mutex<SessionSummary>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a finished shape to the running totals.
    ///
    /// Fails once the session has been rendered.
    pub fn record_shape(&self, record: ShapeRecord) -> Result<(), SessionError> {
        let mut summary = self.summary.lock();
        if summary.closed {
            return Err(SessionError::Closed);
        }
        tracing::info!(
            shape = %record.spec,
            area = record.area,
            duration_ms = record.duration_ms,
            "recorded shape"
        );
        summary.record(record);
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.summary.lock().closed
    }

    /// A copy of the current totals.
    pub fn summary(&self) -> SessionSummary {
        self.summary.lock().clone()
    }

    /// Closes the session and renders its report.
    ///
    /// Rendering again returns the same text.
    pub fn render(&self) -> String {
        let mut summary = self.summary.lock();
        summary.closed = true;
        render_summary(&summary)
    }
}

/// Renders the multi-line report for `summary`.
pub fn render_summary(summary: &SessionSummary) -> String {
    let (Some(largest), Some((frequent_kind, frequent_count)), Some(average_ms)) = (
        summary.largest(),
        summary.most_frequent(),
        summary.average_ms(),
    ) else {
        return "No shapes drawn.\n".to_string();
    };

    let entries: Vec<String> = summary.records.iter().map(format_entry).collect();

    format!(
        "Shapes drawn: {}\n\
         Largest shape: {}: {}\n\
         Most frequent shape: {frequent_kind}: {frequent_count} times\n\
         Average time: {:.2} seconds\n",
        entries.join(", "),
        largest.kind(),
        largest.spec.identifying_side(),
        average_ms / 1000.0
    )
}

fn format_entry(record: &ShapeRecord) -> String {
    let seconds = record.duration_ms as f64 / 1000.0;
    let sides = record
        .spec
        .sides()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    match record.exterior_angles {
        Some([a, b, c]) => format!(
            "{}: {sides} (angles: {a:.2}, {b:.2}, {c:.2}; time: {seconds:.2} seconds)",
            record.kind()
        ),
        None => format!("{}: {sides} (time: {seconds:.2} seconds)", record.kind()),
    }
}
