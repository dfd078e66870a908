//! Memory-access trace records.
//!
//! Traces use the Valgrind `lackey` layout, one access per line:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! Instruction fetches (`I` in the first column) are dropped by the reader
//! and never reach the simulator.

/// Line parser and lazy trace reader.
pub mod reader;

pub use reader::{TraceReader, parse_line};

use std::fmt;

/// Kind of memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data load (`L`).
    Load,
    /// Data store (`S`).
    Store,
    /// Load followed by a store to the same address (`M`).
    Modify,
    /// Any other operation code; replayed as a no-op.
    Other(char),
}

impl Operation {
    /// Maps a trace operation code to an operation.
    pub const fn from_code(code: char) -> Self {
        match code {
            'L' => Self::Load,
            'S' => Self::Store,
            'M' => Self::Modify,
            other => Self::Other(other),
        }
    }

    /// Trace operation code for this operation.
    pub const fn code(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
            Self::Other(c) => c,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One parsed data access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessEvent {
    /// Access kind.
    pub op: Operation,
    /// Byte address.
    pub address: u64,
    /// Access size in bytes. Carried for reporting; the cache model ignores it.
    pub size: u32,
}

impl AccessEvent {
    /// Creates an access event.
    pub const fn new(op: Operation, address: u64, size: u32) -> Self {
        Self { op, address, size }
    }
}

impl fmt::Display for AccessEvent {
    /// Formats the event as it appears in a trace, without leading whitespace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op, self.address, self.size)
    }
}
