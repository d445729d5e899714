//! Per-step trace output.
//!
//! One line per time step:
//!
//! ```text
//! step true_location ["most_likely"] belief_0 ... belief_{N-1} observation moved sensed_correctly
//! ```
//!
//! The quoted most-likely set is only written when [`TraceFormat::report_prediction`] is set.
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::sim::StepRecord;

/// Most decimal places a trace line may print per belief entry. An `f64` carries 17
/// significant digits at most.
pub const MAX_PRECISION: usize = 17;

/// Layout options for trace lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceFormat {
    /// Include the quoted, comma-joined set of most likely cells.
    pub report_prediction: bool,
    /// Decimal places for each belief entry.
    pub precision: usize,
}
impl Default for TraceFormat {
    fn default() -> Self {
        TraceFormat {
            report_prediction: true,
            precision: 6,
        }
    }
}

/// Comma-joined list of indices, e.g. `1,4,7`.
pub fn format_location_set(locations: &[usize]) -> String {
    locations
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a single trace line (without a trailing newline).
pub fn format_step(record: &StepRecord, format: &TraceFormat) -> String {
    let mut line = format!("{} {}", record.step, record.true_location);
    if format.report_prediction {
        line.push_str(&format!(" \"{}\"", format_location_set(&record.most_likely)));
    }
    let precision = format.precision;
    for p in record.belief.probabilities() {
        line.push_str(&format!(" {p:.precision$}"));
    }
    line.push_str(&format!(
        " {} {} {}",
        record.observation, record.moved, record.sensed_correctly
    ));
    line
}

/// Writes trace lines to any sink, typically stdout.
pub struct TraceReporter<W: Write> {
    out: W,
    format: TraceFormat,
}
impl<W: Write> TraceReporter<W> {
    pub fn new(out: W, format: TraceFormat) -> TraceReporter<W> {
        TraceReporter { out, format }
    }
    pub fn report(&mut self, record: &StepRecord) -> io::Result<()> {
        writeln!(self.out, "{}", format_step(record, &self.format))
    }
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
    pub fn into_inner(self) -> W {
        self.out
    }
}
