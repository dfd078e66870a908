//! Set-Associative Cache Model.
//!
//! This module implements the cache that traces are replayed against. It
//! models only tag presence: there is no data, no dirty state, and no timing.
//! Each set runs an exact LRU policy driven by per-line recency counters (see
//! [`CacheSet::probe`]).

/// Cache line state.
pub mod line;

/// Cache set and the LRU probe.
pub mod set;

pub use self::line::CacheLine;
pub use self::set::{CacheSet, ProbeOutcome};

use crate::common::addr::{AddressDecoder, DecodedAddr};
use crate::common::error::{AllocationError, SimError};
use crate::config::CacheParams;

/// The modeled cache: `2^s` sets of `E` lines each.
///
/// The geometry is fixed at construction. All mutation goes through
/// [`Cache::probe`].
#[derive(Clone, Debug)]
pub struct Cache {
    params: CacheParams,
    decoder: AddressDecoder,
    sets: Vec<CacheSet>,
}

impl Cache {
    /// Creates an empty cache with the specified geometry.
    ///
    /// # Arguments
    ///
    /// * `params` - Cache geometry; validated before anything is allocated.
    ///
    /// # Returns
    ///
    /// A cache whose lines are all invalid, or a [`SimError`] if the geometry
    /// is invalid or its storage cannot be reserved.
    pub fn new(params: &CacheParams) -> Result<Self, SimError> {
        params.validate()?;
        let sets = allocate(params.num_sets(), params.e)?;
        tracing::info!(
            sets = params.num_sets(),
            ways = params.e,
            block_bytes = params.block_size(),
            capacity_bytes = params.capacity_bytes(),
            "cache initialized"
        );
        Ok(Self {
            params: *params,
            decoder: AddressDecoder::new(params),
            sets,
        })
    }

    /// Geometry this cache was built with.
    pub const fn params(&self) -> &CacheParams {
        &self.params
    }

    /// Address decoder for this geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Returns the set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Iterates over all sets in index order.
    pub fn sets(&self) -> impl Iterator<Item = &CacheSet> {
        self.sets.iter()
    }

    /// Whether the block holding `addr` is resident. Does not touch recency.
    pub fn contains(&self, addr: u64) -> bool {
        let DecodedAddr { tag, set_index, .. } = self.decoder.decode(addr);
        self.sets
            .get(set_index)
            .is_some_and(|set| set.contains(tag))
    }

    /// Probes the cache for `addr`, updating LRU state and installing the
    /// block on a miss.
    ///
    /// # Panics
    ///
    /// This function will not panic. The set index is masked to `s` bits and
    /// the cache always holds exactly `2^s` sets.
    pub fn probe(&mut self, addr: u64) -> ProbeOutcome {
        let DecodedAddr { tag, set_index, .. } = self.decoder.decode(addr);
        self.sets[set_index].probe(tag)
    }
}

/// Reserves `num_sets` sets of `ways` invalid lines each.
fn allocate(num_sets: usize, ways: usize) -> Result<Vec<CacheSet>, AllocationError> {
    let err = AllocationError {
        sets: num_sets,
        ways,
    };
    let mut sets = Vec::new();
    sets.try_reserve_exact(num_sets).map_err(|_| err.clone())?;
    for _ in 0..num_sets {
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(ways)
            .map_err(|_| err.clone())?;
        lines.resize(ways, CacheLine::default());
        sets.push(CacheSet::from_lines(lines));
    }
    Ok(sets)
}
