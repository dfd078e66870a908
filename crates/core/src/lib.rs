//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays Valgrind-style memory traces against a modeled cache with the following:
//! 1. **Cache:** Sets of lines addressed by `(tag, set index)`, probed with a single-pass LRU scan.
//! 2. **Configuration:** Geometry `(s, E, b)` with explicit validation and JSON loading.
//! 3. **Trace:** Lazy parsing of `L`/`S`/`M` access records, skipping instruction fetches.
//! 4. **Simulation:** Event dispatch, per-event verbose reports, and hit/miss/eviction totals.

/// Common types (address decoding, error taxonomy).
pub mod common;
/// Cache geometry parameters (defaults, validation, JSON loading).
pub mod config;
/// Cache model (lines, sets, probe with LRU replacement).
pub mod cache;
/// Trace records and the lazy trace reader.
pub mod trace;
/// Simulator driver and trace loading.
pub mod sim;
/// Hit/miss/eviction accounting and reporting.
pub mod stats;

/// Cache geometry; construct directly, via `CacheParams::new`, or from JSON.
pub use crate::config::CacheParams;
/// Modeled cache; construct with `Cache::new`.
pub use crate::cache::Cache;
/// Top-level simulator owning the cache and running totals.
pub use crate::sim::Simulator;
/// Final hit/miss/eviction counters.
pub use crate::stats::Results;
