//! Reading branch traces.
//!
//! A trace is a text file with one record per line: `<address> <outcome>`.
//! The address is a decimal (or `0x`-prefixed hexadecimal) integer, and the
//! outcome is `T` for "taken". Any other token means "not-taken". A blank
//! line ends the trace.

pub mod synth;

use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::Path;

use log::{ debug, info };

use crate::branch::*;
use crate::error::TraceError;

/// Parse a single line of a trace.
pub fn parse_record(line: &str, lineno: usize)
    -> Result<BranchRecord, TraceError>
{
    let malformed = |reason| TraceError::Malformed {
        line: lineno,
        text: line.to_string(),
        reason,
    };

    let mut fields = line.split_whitespace();
    let addr = fields.next().ok_or_else(|| malformed("empty record"))?;
    let outcome = fields.next().ok_or_else(|| malformed("missing outcome"))?;
    if fields.next().is_some() {
        return Err(malformed("too many fields"));
    }

    let addr = match addr.strip_prefix("0x").or(addr.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => addr.parse::<u64>(),
    }.map_err(|_| malformed("address is not an unsigned integer"))?;

    Ok(BranchRecord::new(addr, outcome == "T"))
}

/// Iterator over the records in some trace.
///
/// Iteration stops at the first blank line or at the end of input.
pub struct TraceReader<R: BufRead> {
    inner: R,
    lineno: usize,
    done: bool,
    buf: Vec<u8>,
}
impl<R: BufRead> TraceReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, lineno: 0, done: false, buf: Vec::new() }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            },
            Ok(0) => {
                self.done = true;
                None
            },
            Ok(_) => {
                self.lineno += 1;
                let line = match std::str::from_utf8(&self.buf) {
                    Ok(line) => line.trim_end(),
                    Err(_) => {
                        return Some(Err(TraceError::Malformed {
                            line: self.lineno,
                            text: String::from_utf8_lossy(&self.buf)
                                .trim_end().to_string(),
                            reason: "not valid UTF-8",
                        }));
                    },
                };
                if line.is_empty() {
                    self.done = true;
                    return None;
                }
                Some(parse_record(line, self.lineno))
            },
        }
    }
}

/// A trace loaded into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub name: String,
    pub records: Vec<BranchRecord>,
}
impl Trace {
    pub fn new(name: impl ToString, records: Vec<BranchRecord>) -> Self {
        Self { name: name.to_string(), records }
    }

    /// Read every record from some reader. The first malformed record
    /// aborts the read.
    pub fn from_reader(name: impl ToString, reader: impl BufRead)
        -> Result<Self, TraceError>
    {
        let records = TraceReader::new(reader)
            .collect::<Result<Vec<_>, _>>()?;
        let name = name.to_string();
        debug!("Read {} records from '{}'", records.len(), name);
        Ok(Self { name, records })
    }

    /// Create a [Trace] from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let f = File::open(path)?;
        let trace = Self::from_reader(name, BufReader::new(f))?;
        info!("Loaded {} records from {}", trace.len(), path.display());
        Ok(trace)
    }

    /// Return the number of records
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn name(&self) -> &str { &self.name }
    pub fn as_slice(&self) -> &[BranchRecord] { &self.records }
}
