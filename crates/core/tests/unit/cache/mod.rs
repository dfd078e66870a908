//! Tests for the cache model.



/// The `Cache` container: construction, set selection, isolation.
pub mod cache_sim;
