//! Cache set and the LRU probe.
//!
//! A probe is a single pass over the set's lines that does three jobs at
//! once: hit detection, empty-slot tracking, and LRU-victim tracking, with
//! aging of every valid line it passes folded in.
//!
//! # Performance
//!
//! - **Time Complexity:** O(E) per probe, where E is the associativity
//! - **Space Complexity:** O(E) per set; one tag and one counter per line

use super::line::CacheLine;
use crate::common::error::ConfigError;

/// Result of probing a set with one tag.
///
/// Every probe ends in exactly one of these three states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The tag was resident in `way`; its recency was reset.
    Hit {
        /// Way that matched.
        way: usize,
    },
    /// Miss; the tag was installed in the empty line at `way`.
    Fill {
        /// Way that was filled.
        way: usize,
    },
    /// Miss in a full set; the LRU line at `way` was replaced.
    Evict {
        /// Way that was replaced.
        way: usize,
        /// Tag that was displaced.
        victim: u64,
    },
}

impl ProbeOutcome {
    /// Whether the probe hit.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Whether the probe missed.
    pub const fn is_miss(&self) -> bool {
        !self.is_hit()
    }

    /// Whether the probe displaced a valid line.
    pub const fn evicted(&self) -> bool {
        matches!(self, Self::Evict { .. })
    }

    /// Way that now holds the probed tag.
    pub const fn way(&self) -> usize {
        match *self {
            Self::Hit { way } | Self::Fill { way } | Self::Evict { way, .. } => way,
        }
    }
}

/// A fixed group of `E` lines searched associatively.
///
/// Line position carries no LRU meaning; only the recency counters do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    pub(crate) const fn from_lines(lines: Vec<CacheLine>) -> Self {
        Self { lines }
    }

    /// Creates a set of `ways` invalid lines.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroAssociativity`] if `ways` is 0.
    pub fn new(ways: usize) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        Ok(Self {
            lines: vec![CacheLine::default(); ways],
        })
    }

    /// Number of lines (the associativity).
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// Read-only view of the lines in way order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Whether `tag` is resident. Does not touch recency.
    pub fn contains(&self, tag: u64) -> bool {
        self.lines.iter().any(|line| line.matches(tag))
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.is_valid()).count()
    }

    /// Looks up `tag`, updating recency and installing it on a miss.
    ///
    /// Lines are scanned in way order:
    ///
    /// 1. A valid line with a matching tag is a hit. Its recency becomes 1 and
    ///    the scan stops; lines after it are not aged.
    /// 2. An invalid line becomes the empty-slot candidate. A later invalid
    ///    line replaces an earlier one.
    /// 3. A valid line whose recency is `>=` the candidate's current recency
    ///    becomes the victim candidate. The candidate starts at way 0 and, once
    ///    passed, has already been aged, so it is compared at its aged value.
    /// 4. Every valid line passed is aged by one, including on probes that end
    ///    up filling an empty slot.
    ///
    /// On a miss the empty-slot candidate is filled if there is one; otherwise
    /// the victim candidate is overwritten.
    pub fn probe(&mut self, tag: u64) -> ProbeOutcome {
        let mut empty = None;
        let mut victim = 0;
        // Live recency of `lines[victim]`.
        let mut victim_recency = self.lines.first().map_or(0, CacheLine::recency);

        for (way, line) in self.lines.iter_mut().enumerate() {
            if line.matches(tag) {
                line.recency = CacheLine::MRU;
                return ProbeOutcome::Hit { way };
            }
            if !line.valid {
                empty = Some(way);
                continue;
            }
            if line.recency >= victim_recency {
                victim = way;
            }
            line.recency += 1;
            if victim == way {
                victim_recency = line.recency;
            }
        }

        if let Some(way) = empty {
            self.lines[way].fill(tag);
            return ProbeOutcome::Fill { way };
        }

        let line = &mut self.lines[victim];
        let displaced = line.tag;
        line.fill(tag);
        ProbeOutcome::Evict {
            way: victim,
            victim: displaced,
        }
    }
}
