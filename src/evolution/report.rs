//! # Reporting
//!
//! One [`GenerationReport`] is produced per generation. `record` renders it
//! as a row of an append-only table whose header is
//! [`GenerationReport::HEADER`]; writing the table is up to the caller.
//!
//! A [`GenerationObserver`] receives each report together with the best
//! individual, whose rendered canvas is already cached:
//!
//! ```rust
//! use evoimage::error::Result;
//! use evoimage::evolution::report::{GenerationObserver, GenerationReport};
//! use evoimage::individual::Individual;
//!
//! let mut rows = vec![GenerationReport::HEADER.map(String::from)];
//! let observer = |report: &GenerationReport, _best: &Individual| -> Result<()> {
//!     rows.push(report.record());
//!     Ok(())
//! };
//! # fn assert_observer<O: GenerationObserver>(_: &O) {}
//! # assert_observer(&observer);
//! ```

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::individual::Individual;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Statistics of one evaluated generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
    pub population_size: usize,
    pub stall_count: usize,
    pub tournament_size: usize,
    pub mutation_rate: f64,
    pub timestamp: DateTime<Local>,
}

impl GenerationReport {
    pub const HEADER: [&'static str; 5] = ["Gen", "Best", "Worst", "Avg", "Timestamp"];

    /// The table row for this generation, matching [`Self::HEADER`].
    pub fn record(&self) -> [String; 5] {
        [
            self.generation.to_string(),
            format!("{:.5}", self.best),
            format!("{:.5}", self.worst),
            format!("{:.5}", self.mean),
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }
}

/// Receives every generation that does not end the run.
///
/// Returning an error aborts the run with that error.
pub trait GenerationObserver {
    fn on_generation(&mut self, report: &GenerationReport, best: &Individual) -> Result<()>;
}

impl<F> GenerationObserver for F
where
    F: FnMut(&GenerationReport, &Individual) -> Result<()>,
{
    fn on_generation(&mut self, report: &GenerationReport, best: &Individual) -> Result<()> {
        self(report, best)
    }
}

/// Ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_generation(&mut self, _report: &GenerationReport, _best: &Individual) -> Result<()> {
        Ok(())
    }
}
