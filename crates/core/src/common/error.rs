//! Error definitions.
//!
//! This module defines the error taxonomy for the simulator. It provides:
//! 1. **Configuration Errors:** Missing or out-of-range cache geometry.
//! 2. **Allocation Errors:** Backing storage for the cache could not be reserved.
//! 3. **Trace Errors:** I/O failures and malformed trace records.
//! 4. **Umbrella Error:** [`SimError`], which every fallible entry point returns.
//!
//! The probe itself has no error path; every error here is raised either
//! before the cache exists or while reading the event source.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or incomplete cache geometry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required parameter was supplied neither on the command line nor in a config file.
    #[error("missing cache parameter `{0}`")]
    Missing(&'static str),

    /// The associativity is zero, so no set could ever hold a line.
    #[error("associativity E must be at least 1")]
    ZeroAssociativity,

    /// `s + b` leaves no room for a tag in a 64-bit address.
    #[error("set bits ({s}) + block bits ({b}) must be less than 64")]
    AddressBitsOverflow {
        /// Set-index bits.
        s: u32,
        /// Block-offset bits.
        b: u32,
    },

    /// `2^s` sets cannot be indexed on this platform.
    #[error("set bits ({0}) exceed the platform index width")]
    TooManySets(u32),

    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {reason}")]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying OS error, rendered.
        reason: String,
    },

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Backing storage for the cache could not be reserved.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot allocate {sets} sets of {ways} lines")]
pub struct AllocationError {
    /// Number of sets requested.
    pub sets: usize,
    /// Lines per set requested.
    pub ways: usize,
}

/// Failure while reading or parsing the access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("cannot open trace '{}': {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A record did not match ` <op> <hex-addr>,<size>`.
    #[error("line {line}: malformed trace record `{text}`: {reason}")]
    Malformed {
        /// 1-based line number within the trace.
        line: usize,
        /// The offending line, without its terminator.
        text: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Any error a simulation run can end with.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid geometry.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Cache storage could not be allocated.
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// The trace could not be opened, read, or parsed.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
