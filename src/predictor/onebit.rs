//! A table of single "last outcome" bits indexed by the branch address.

use bitvec::prelude::*;
use log::debug;

use crate::branch::Outcome;
use crate::error::*;
use crate::predictor::table::low_bits_mask;
use crate::predictor::BranchPredictor;
use crate::stats::PerformanceTracker;

/// Configuration for a [`OneBitPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OneBitConfig {
    /// Number of low address bits used to index the table
    pub index_bits: usize,
}
impl OneBitConfig {
    pub fn storage_bits(&self) -> usize { 1 << self.index_bits }

    pub fn build(self) -> Result<OneBitPredictor, ConfigError> {
        ConfigError::check_width("index_bits", self.index_bits,
            MAX_INDEX_BITS)?;
        debug!("OneBit: {} entries", 1usize << self.index_bits);
        Ok(OneBitPredictor {
            table: bitvec![usize, Lsb0; 0; 1 << self.index_bits],
            mask: low_bits_mask(self.index_bits),
            cfg: self,
            tracker: PerformanceTracker::new(),
        })
    }
}

/// Predicts that a branch will do whatever it did last time.
///
/// There is no hysteresis: a single misprediction flips the entry, so the
/// exit branch of a loop is mispredicted on every exit and again on the
/// next entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneBitPredictor {
    cfg: OneBitConfig,
    table: BitVec<usize, Lsb0>,
    mask: u64,
    tracker: PerformanceTracker,
}
impl OneBitPredictor {
    pub fn new(index_bits: usize) -> Result<Self, ConfigError> {
        OneBitConfig { index_bits }.build()
    }

    pub fn index(&self, addr: u64) -> usize {
        (addr & self.mask) as usize
    }

    /// Returns the table contents.
    pub fn table(&self) -> &BitSlice<usize, Lsb0> { &self.table }
}

impl BranchPredictor for OneBitPredictor {
    fn name(&self) -> &'static str { "OneBit" }
    fn describe(&self) -> String { format!("k={}", self.cfg.index_bits) }

    fn predict(&self, addr: u64) -> Outcome {
        Outcome::from(self.table[self.index(addr)])
    }

    fn train(&mut self, addr: u64, actual: Outcome) {
        let idx = self.index(addr);
        self.table.set(idx, actual.is_taken());
    }

    fn tracker(&self) -> &PerformanceTracker { &self.tracker }
    fn tracker_mut(&mut self) -> &mut PerformanceTracker { &mut self.tracker }
    fn storage_bits(&self) -> usize { self.cfg.storage_bits() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flips_after_one_miss() {
        let mut p = OneBitPredictor::new(4).unwrap();
        assert_eq!(p.predict(0x40), Outcome::N);
        p.update(0x40, Outcome::T, Outcome::N);
        assert_eq!(p.predict(0x40), Outcome::T);
        p.update(0x40, Outcome::N, Outcome::T);
        assert_eq!(p.predict(0x40), Outcome::N);
    }

    #[test]
    fn aliases_on_low_bits() {
        let mut p = OneBitPredictor::new(4).unwrap();
        p.train(0x13, Outcome::T);
        assert_eq!(p.predict(0x03), Outcome::T);
        assert_eq!(p.predict(0x04), Outcome::N);
        assert_eq!(p.table().count_ones(), 1);
        assert_eq!(p.storage_bits(), 16);
    }

    #[test]
    fn rejects_zero_width() {
        assert_eq!(OneBitPredictor::new(0).unwrap_err(),
            ConfigError::ZeroWidth { param: "index_bits" });
    }
}
