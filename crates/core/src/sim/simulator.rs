//! Simulator: owns the cache and the running totals side-by-side.
//!
//! Each access event is translated into cache probes and the outcomes are
//! folded into [`Results`]. Nothing else mutates the counters.

use std::fmt;

use crate::cache::{Cache, ProbeOutcome};
use crate::common::error::{SimError, TraceError};
use crate::config::CacheParams;
use crate::stats::Results;
use crate::trace::{AccessEvent, Operation};

/// What a single access event did to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// The event that was replayed.
    pub event: AccessEvent,
    /// Outcome of the probe, or `None` for ignored operation kinds.
    pub probe: Option<ProbeOutcome>,
    /// Whether an extra hit was counted without probing (the store half of a `Modify`).
    pub implied_hit: bool,
}

impl StepReport {
    /// Whether the event left every counter unchanged.
    pub const fn is_ignored(&self) -> bool {
        self.probe.is_none() && !self.implied_hit
    }
}

impl fmt::Display for StepReport {
    /// Formats in the classic verbose form, e.g. `M 20,1 miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event)?;
        match self.probe {
            Some(ProbeOutcome::Hit { .. }) => write!(f, " hit")?,
            Some(ProbeOutcome::Fill { .. }) => write!(f, " miss")?,
            Some(ProbeOutcome::Evict { .. }) => write!(f, " miss eviction")?,
            None => {}
        }
        if self.implied_hit {
            write!(f, " hit")?;
        }
        Ok(())
    }
}

/// Top-level simulator: cache state plus accumulated results.
#[derive(Clone, Debug)]
pub struct Simulator {
    cache: Cache,
    results: Results,
}

impl Simulator {
    /// Creates a simulator with an empty cache of the given geometry.
    pub fn new(params: &CacheParams) -> Result<Self, SimError> {
        Ok(Self {
            cache: Cache::new(params)?,
            results: Results::default(),
        })
    }

    /// The modeled cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Totals so far.
    pub const fn results(&self) -> Results {
        self.results
    }

    /// Probes the cache once for `addr` and accounts for the outcome.
    pub fn access(&mut self, addr: u64) -> ProbeOutcome {
        let outcome = self.cache.probe(addr);
        self.results.record(outcome);
        tracing::debug!(
            addr = format_args!("{addr:#x}"),
            tag = format_args!("{:#x}", self.cache.decoder().tag(addr)),
            set = self.cache.decoder().set_index(addr),
            ?outcome,
            "probe"
        );
        outcome
    }

    /// Replays one access event.
    ///
    /// Loads and stores probe once. A modify probes once for its load and
    /// then counts one more hit for its store without probing again: the
    /// store targets the block the load just made resident. Other operation
    /// kinds change nothing.
    pub fn step(&mut self, event: &AccessEvent) -> StepReport {
        let (probe, implied_hit) = match event.op {
            Operation::Load | Operation::Store => (Some(self.access(event.address)), false),
            Operation::Modify => {
                let outcome = self.access(event.address);
                self.results.record_implied_hit();
                (Some(outcome), true)
            }
            Operation::Other(code) => {
                tracing::warn!(
                    op = %code,
                    addr = format_args!("{:#x}", event.address),
                    "ignoring unrecognized operation"
                );
                (None, false)
            }
        };
        StepReport {
            event: *event,
            probe,
            implied_hit,
        }
    }

    /// Replays already-parsed events and returns the totals.
    pub fn replay<I>(&mut self, events: I) -> Results
    where
        I: IntoIterator<Item = AccessEvent>,
    {
        for event in events {
            let _ = self.step(&event);
        }
        self.results
    }

    /// Replays a fallible event source to completion.
    ///
    /// Stops at the first trace error. Counters reflect every event processed
    /// before the error.
    pub fn run<I>(&mut self, events: I) -> Result<Results, SimError>
    where
        I: IntoIterator<Item = Result<AccessEvent, TraceError>>,
    {
        self.run_with(events, |_| {})
    }

    /// Like [`Self::run`], calling `observer` with every step's report.
    pub fn run_with<I, F>(&mut self, events: I, mut observer: F) -> Result<Results, SimError>
    where
        I: IntoIterator<Item = Result<AccessEvent, TraceError>>,
        F: FnMut(&StepReport),
    {
        for event in events {
            let report = self.step(&event?);
            observer(&report);
        }
        tracing::info!(
            hits = self.results.hits,
            misses = self.results.misses,
            evictions = self.results.evicts,
            "simulation complete"
        );
        Ok(self.results)
    }

    /// Consumes the simulator, returning the totals.
    pub fn into_results(self) -> Results {
        self.results
    }
}
