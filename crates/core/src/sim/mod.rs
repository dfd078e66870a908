//! Simulation driver and input loading.
//!
//! Provides the [`Simulator`] that replays access events against the cache,
//! and the loader that opens trace and configuration files.

/// Trace and configuration file loading.
pub mod loader;

/// Event dispatch and result accumulation.
pub mod simulator;

pub use simulator::{Simulator, StepReport};
