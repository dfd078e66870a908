//! Trace line parsing and lazy reading.

use std::io::BufRead;

use super::{AccessEvent, Operation};
use crate::common::error::TraceError;

/// Marker for instruction-fetch records, matched in the first column only.
const INSTRUCTION_FETCH: char = 'I';

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - The raw line, with or without its terminator.
/// * `line_no` - 1-based line number used in error reports.
///
/// # Returns
///
/// `Ok(None)` for instruction fetches, blank lines, and non-record text such
/// as Valgrind's `==pid==` banners. `Ok(Some(event))` for records of the form
/// ` <op> <hex-addr>,<size>`; the address may carry a `0x` prefix. A load,
/// store, or modify whose operands do not parse is a
/// [`TraceError::Malformed`].
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<AccessEvent>, TraceError> {
    if line.starts_with(INSTRUCTION_FETCH) {
        return Ok(None);
    }
    let record = line.trim();
    let Some(code) = record.chars().next() else {
        return Ok(None);
    };
    let op = Operation::from_code(code);

    match parse_operands(record[code.len_utf8()..].trim_start()) {
        Ok((address, size)) => Ok(Some(AccessEvent::new(op, address, size))),
        Err(reason) if matches!(op, Operation::Other(_)) => {
            tracing::debug!(line = line_no, reason, "skipping non-record line");
            Ok(None)
        }
        Err(reason) => Err(TraceError::Malformed {
            line: line_no,
            text: line.trim_end_matches(['\r', '\n']).to_owned(),
            reason,
        }),
    }
}

/// Splits `<hex-addr>,<size>` into its values.
fn parse_operands(operands: &str) -> Result<(u64, u32), &'static str> {
    if operands.is_empty() {
        return Err("missing address");
    }
    let (addr, size) = operands.split_once(',').ok_or("missing `,<size>`")?;

    let addr = addr.trim_end();
    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let address = u64::from_str_radix(digits, 16).map_err(|_| "address is not hexadecimal")?;
    let size = size
        .trim()
        .parse::<u32>()
        .map_err(|_| "size is not a decimal integer")?;
    Ok((address, size))
}

/// Lazy iterator over the data accesses of a trace.
///
/// Lines are read one at a time. Instruction fetches and blank lines are
/// skipped. After the first error the iterator is exhausted.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    buf: String,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub const fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    match parse_line(&self.buf, self.line_no) {
                        Ok(Some(event)) => return Some(Ok(event)),
                        Ok(None) => {}
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}
