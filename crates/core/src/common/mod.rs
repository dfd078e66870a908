//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides building blocks shared across all components:
//! 1. **Address Decoding:** Splitting raw addresses into tag and set-index fields.
//! 2. **Error Handling:** Configuration, allocation, and trace errors.

/// Address decomposition into tag / set index / block offset.
pub mod addr;

/// Error types for configuration, allocation, and trace parsing.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddr};
pub use error::{AllocationError, ConfigError, SimError, TraceError};
