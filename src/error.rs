//! Error types.

use thiserror::Error;

/// Largest supported index width; tables are capped at 2^24 entries
/// (one byte each).
pub const MAX_INDEX_BITS: usize = 24;

/// Largest supported global history width.
pub const MAX_HISTORY_BITS: usize = 64;

/// Largest supported saturating counter width.
pub const MAX_COUNTER_BITS: u8 = 8;

/// A predictor was configured with parameters that cannot describe a table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{param} must be at least 1 bit wide")]
    ZeroWidth { param: &'static str },

    #[error("{param} is {bits} bits wide, but at most {max} bits are supported")]
    TooWide { param: &'static str, bits: usize, max: usize },

    #[error("initial counter value {init} does not fit in {bits} bits")]
    CounterInit { init: u8, bits: u8 },

    #[error("unknown predictor '{0}'")]
    UnknownPredictor(String),
}

impl ConfigError {
    /// Check that some width parameter is nonzero and no larger than `max`.
    pub fn check_width(param: &'static str, bits: usize, max: usize)
        -> Result<usize, Self>
    {
        if bits == 0 {
            Err(Self::ZeroWidth { param })
        } else if bits > max {
            Err(Self::TooWide { param, bits, max })
        } else {
            Ok(bits)
        }
    }
}

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed record '{text}': {reason}")]
    Malformed { line: usize, text: String, reason: &'static str },
}
