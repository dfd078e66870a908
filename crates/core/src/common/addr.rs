//! Address decomposition.
//!
//! A raw trace address is split into three fields, high to low:
//!
//! ```text
//!  63                     s+b        b          0
//! +------------------------+----------+----------+
//! |          tag           |   set    |  offset  |
//! +------------------------+----------+----------+
//! ```
//!
//! Only the tag and set index take part in the hit/miss logic; the block
//! offset is carried along for diagnostics.

use crate::config::CacheParams;

/// An address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// High-order bits identifying the memory block.
    pub tag: u64,
    /// Mid-order bits selecting the cache set.
    pub set_index: usize,
    /// Low-order bits addressing a byte within the block.
    pub offset: u64,
}

/// Splits addresses according to a fixed `(s, b)` geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    set_bits: u32,
    offset_bits: u32,
    set_mask: u64,
    offset_mask: u64,
}

/// Returns `2^bits - 1`, saturating to all-ones for `bits >= 64`.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    match 1u64.checked_shl(bits) {
        Some(v) => v - 1,
        None => u64::MAX,
    }
}

impl AddressDecoder {
    /// Creates a decoder for the given geometry.
    ///
    /// # Arguments
    ///
    /// * `params` - Cache geometry; only `s` and `b` are used.
    pub const fn new(params: &CacheParams) -> Self {
        Self {
            set_bits: params.s,
            offset_bits: params.b,
            set_mask: low_mask(params.s),
            offset_mask: low_mask(params.b),
        }
    }

    /// Returns the tag: `addr >> (s + b)`.
    ///
    /// Shifts of 64 or more yield 0 rather than overflowing.
    #[inline(always)]
    pub fn tag(&self, addr: u64) -> u64 {
        addr.checked_shr(self.set_bits.saturating_add(self.offset_bits))
            .unwrap_or(0)
    }

    /// Returns the set index: `(addr >> b) & (2^s - 1)`.
    #[inline(always)]
    pub fn set_index(&self, addr: u64) -> usize {
        (addr.checked_shr(self.offset_bits).unwrap_or(0) & self.set_mask) as usize
    }

    /// Returns the block offset: `addr & (2^b - 1)`.
    #[inline(always)]
    pub const fn offset(&self, addr: u64) -> u64 {
        addr & self.offset_mask
    }

    /// Splits `addr` into all three fields.
    pub fn decode(&self, addr: u64) -> DecodedAddr {
        DecodedAddr {
            tag: self.tag(addr),
            set_index: self.set_index(addr),
            offset: self.offset(addr),
        }
    }
}
