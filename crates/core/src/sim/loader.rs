//! Trace and configuration loading.
//!
//! This module turns file paths into simulator inputs. It performs:
//! 1. **Trace opening:** Wraps a trace file in a lazy [`TraceReader`].
//! 2. **Config loading:** Reads a JSON geometry document into [`ParamOverrides`].
//! 3. **Result saving:** Writes the `hits misses evictions` record to a file.
//!
//! Unlike the probe, every function here is fallible; errors carry the path
//! that failed so the CLI can report them without extra context.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use crate::common::error::{ConfigError, TraceError};
use crate::config::ParamOverrides;
use crate::stats::Results;
use crate::trace::TraceReader;

/// Opens a trace file for lazy reading.
///
/// # Arguments
///
/// * `path` - Path to a Valgrind-style trace.
///
/// # Returns
///
/// A reader yielding one event per data-access line, or
/// [`TraceError::Open`] if the file cannot be opened.
pub fn open_trace(path: impl AsRef<Path>) -> Result<TraceReader<BufReader<File>>, TraceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "opened trace");
    Ok(TraceReader::new(BufReader::new(file)))
}

/// Reads a (possibly partial) JSON geometry document.
pub fn load_params(path: impl AsRef<Path>) -> Result<ParamOverrides, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    ParamOverrides::from_json(&text)
}

/// Writes `hits misses evictions` followed by a newline to `path`.
pub fn save_results(path: impl AsRef<Path>, results: &Results) -> io::Result<()> {
    fs::write(path, format!("{}\n", results.to_record()))
}
