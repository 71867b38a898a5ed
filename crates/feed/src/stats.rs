//! Latency accumulators and summary statistics.

use std::fmt;
use std::time::Duration;

/// Append-only sequence of elapsed-time samples for one category.
#[derive(Debug, Default)]
pub struct LatencyRecorder {
    samples: Vec<Duration>,
}

impl LatencyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one elapsed-time sample.
    pub fn record(&mut self, elapsed: Duration) {
        self.samples.push(elapsed);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops all samples, starting a fresh reporting window.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Summarizes the current window; `None` when no samples were recorded.
    pub fn summary(&self) -> Option<LatencySummary> {
        if self.samples.is_empty() {
            return None;
        }

        let mut sorted = self.samples.clone();
        sorted.sort_unstable();

        let count = sorted.len();
        let total: Duration = sorted.iter().sum();
        // Sample at floor(0.99 * count), clamped into range.
        let p99_index = ((count as f64 * 0.99) as usize).min(count - 1);

        Some(LatencySummary {
            count,
            min: sorted[0],
            mean: total / count as u32,
            p99: sorted[p99_index],
            max: sorted[count - 1],
        })
    }
}

/// Summary over one reporting window of latency samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    pub count: usize,
    pub min: Duration,
    pub mean: Duration,
    pub p99: Duration,
    pub max: Duration,
}

impl fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count:     {}", self.count)?;
        writeln!(f, "min (ns):  {}", self.min.as_nanos())?;
        writeln!(f, "mean (ns): {}", self.mean.as_nanos())?;
        writeln!(f, "99% (ns):  {}", self.p99.as_nanos())?;
        write!(f, "max (ns):  {}", self.max.as_nanos())
    }
}

/// Per-instrument timing accumulators.
#[derive(Debug, Default)]
pub struct InstrumentStats {
    /// Elapsed time of each full snapshot build.
    pub snapshot_build: LatencyRecorder,
    /// Elapsed time of each individual level change applied to the book.
    pub update_apply: LatencyRecorder,
}

impl InstrumentStats {
    /// Starts a fresh, non-overlapping reporting window.
    pub fn reset(&mut self) {
        self.snapshot_build.reset();
        self.update_apply.reset();
    }
}
