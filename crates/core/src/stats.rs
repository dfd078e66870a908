//! Simulation results collection and reporting.
//!
//! This module tracks the counters a simulation run produces. It provides:
//! 1. **Counters:** Hits, misses, and evictions, updated only from probe outcomes.
//! 2. **Derived metrics:** Total accesses and hit rate.
//! 3. **Reporting:** The one-line summary, the results-file format, and JSON via serde.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::ProbeOutcome;

/// Hit/miss/eviction totals for one run.
///
/// All counters are monotonically non-decreasing. Every eviction is also a
/// miss, so `evictions <= misses` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    /// Probes that found their block resident, plus one per `Modify` store.
    pub hits: u64,
    /// Probes that did not find their block.
    pub misses: u64,
    /// Misses that displaced a valid line.
    #[serde(rename = "evictions")]
    pub evicts: u64,
}

impl Results {
    /// Accounts for one probe.
    pub const fn record(&mut self, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Hit { .. } => self.hits += 1,
            ProbeOutcome::Fill { .. } => self.misses += 1,
            ProbeOutcome::Evict { .. } => {
                self.misses += 1;
                self.evicts += 1;
            }
        }
    }

    /// Accounts for an access that is guaranteed to hit without probing.
    pub const fn record_implied_hit(&mut self) {
        self.hits += 1;
    }

    /// Hits plus misses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    /// Space-separated `hits misses evictions`, as written to a results file.
    pub fn to_record(&self) -> String {
        format!("{} {} {}", self.hits, self.misses, self.evicts)
    }

    /// Serializes the counters as a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Prints the summary line to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for Results {
    /// Formats as `hits:H misses:M evictions:E`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evicts
        )
    }
}
