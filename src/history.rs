//! Global history registers.

use bitvec::prelude::*;

use crate::branch::Outcome;
use crate::error::*;

/// A fixed-width shift register recording the most recent branch outcomes.
///
/// Bit 0 holds the newest outcome. Shifting in a new outcome discards the
/// oldest one, so the register never holds more than `len` bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        let len = ConfigError::check_width("history_bits", len,
            MAX_HISTORY_BITS)?;
        Ok(Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        })
    }

    pub fn len(&self) -> usize { self.len }

    /// Mask covering every bit in the register.
    pub fn mask(&self) -> u64 {
        u64::MAX >> (64 - self.len)
    }

    /// Return the contents of the register as an integer.
    pub fn value(&self) -> u64 {
        self.data.load_le::<u64>()
    }

    /// Shift the register by one bit and insert an outcome at bit 0.
    /// The oldest bit is discarded.
    pub fn push(&mut self, outcome: Outcome) {
        self.data.shift_end(1);
        self.data.set(0, outcome.is_taken());
    }
}
