//! Cache geometry configuration.
//!
//! This module defines the parameters that shape the modeled cache. It provides:
//! 1. **Parameters:** [`CacheParams`], the immutable `(s, E, b)` triple for one run.
//! 2. **Overrides:** [`ParamOverrides`], a partially specified geometry that can be
//!    layered (config file first, then command-line flags) and resolved.
//! 3. **Validation:** Explicit rejection of geometries the address decoder cannot honour.
//!
//! Configuration is supplied as command-line flags or as a JSON document such as:
//!
//! ```json
//! { "s": 4, "E": 2, "b": 4 }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Address width modeled by the simulator, in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

/// Cache geometry for a single simulation run.
///
/// # Examples
///
/// ```
/// use csim_core::CacheParams;
///
/// let params = CacheParams::new(4, 2, 4).unwrap();
/// assert_eq!(params.num_sets(), 16);
/// assert_eq!(params.block_size(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheParams {
    /// Number of set-index bits; the cache has `2^s` sets.
    pub s: u32,
    /// Associativity: lines per set.
    #[serde(rename = "E")]
    pub e: usize,
    /// Number of block-offset bits; blocks are `2^b` bytes.
    pub b: u32,
}

impl CacheParams {
    /// Creates and validates a geometry.
    ///
    /// # Arguments
    ///
    /// * `s` - Set-index bits.
    /// * `e` - Lines per set.
    /// * `b` - Block-offset bits.
    ///
    /// # Returns
    ///
    /// The parameters, or the first [`ConfigError`] found by [`Self::validate`].
    pub fn new(s: u32, e: usize, b: u32) -> Result<Self, ConfigError> {
        let params = Self { s, e, b };
        params.validate()?;
        Ok(params)
    }

    /// Parses and validates a JSON geometry document.
    ///
    /// All three fields are required; a missing one is reported as
    /// [`ConfigError::Missing`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        ParamOverrides::from_json(json)?.resolve()
    }

    /// Checks that the geometry can be modeled.
    ///
    /// Rejects `E = 0`, `s + b >= 64`, and set counts that cannot be indexed
    /// with `usize`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.e == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if self.s.saturating_add(self.b) >= ADDRESS_BITS {
            return Err(ConfigError::AddressBitsOverflow {
                s: self.s,
                b: self.b,
            });
        }
        if self.s >= usize::BITS {
            return Err(ConfigError::TooManySets(self.s));
        }
        Ok(())
    }

    /// Number of sets, `S = 2^s`.
    ///
    /// Returns 0 when `2^s` does not fit in `usize`; such parameters fail
    /// [`Self::validate`].
    pub const fn num_sets(&self) -> usize {
        match 1usize.checked_shl(self.s) {
            Some(n) => n,
            None => 0,
        }
    }

    /// Block size in bytes, `B = 2^b`.
    pub const fn block_size(&self) -> u64 {
        match 1u64.checked_shl(self.b) {
            Some(n) => n,
            None => 0,
        }
    }

    /// Total data capacity in bytes, `S * E * B`, saturating on overflow.
    pub const fn capacity_bytes(&self) -> u64 {
        (self.num_sets() as u64)
            .saturating_mul(self.e as u64)
            .saturating_mul(self.block_size())
    }
}

impl fmt::Display for CacheParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s={} E={} b={} ({} sets, {}-way, {}-byte blocks)",
            self.s,
            self.e,
            self.b,
            self.num_sets(),
            self.e,
            self.block_size()
        )
    }
}

/// A partially specified geometry.
///
/// Sources are layered with [`Self::or`]: values already present win, so the
/// highest-priority source is applied first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamOverrides {
    /// Set-index bits, if given.
    #[serde(default)]
    pub s: Option<u32>,
    /// Lines per set, if given.
    #[serde(default, rename = "E")]
    pub e: Option<usize>,
    /// Block-offset bits, if given.
    #[serde(default)]
    pub b: Option<u32>,
}

impl ParamOverrides {
    /// Parses a (possibly partial) JSON geometry document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Fills every unset field from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            s: self.s.or(fallback.s),
            e: self.e.or(fallback.e),
            b: self.b.or(fallback.b),
        }
    }

    /// Produces validated parameters, naming the first missing field.
    pub fn resolve(self) -> Result<CacheParams, ConfigError> {
        let s = self.s.ok_or(ConfigError::Missing("s"))?;
        let e = self.e.ok_or(ConfigError::Missing("E"))?;
        let b = self.b.ok_or(ConfigError::Missing("b"))?;
        CacheParams::new(s, e, b)
    }
}
