//! GShare branch predictor.
//!
//! GShare correlates global branch history with the branch address using an
//! XOR hash. A single flat table is shared by all history contexts, so this
//! reaches history depths similar to a [CorrelatingPredictor] with a much
//! smaller table, at the cost of some aliasing.
//!
//! [CorrelatingPredictor]: crate::predictor::CorrelatingPredictor

use log::debug;

use crate::branch::Outcome;
use crate::error::*;
use crate::history::*;
use crate::predictor::*;
use crate::stats::PerformanceTracker;

/// Configuration for a [`GSharePredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GShareConfig {
    /// Number of global history bits
    pub history_bits: usize,

    /// Number of index bits (the table has `2^n` entries)
    pub index_bits: usize,
}
impl GShareConfig {
    pub const COUNTER: SaturatingCounterConfig =
        SaturatingCounterConfig::two_bit(TwoBitState::StronglyNotTaken);

    pub fn storage_bits(&self) -> usize {
        (Self::COUNTER.storage_bits() << self.index_bits) + self.history_bits
    }

    pub fn build(self) -> Result<GSharePredictor, ConfigError> {
        let ghr = HistoryRegister::new(self.history_bits)?;
        let pht = CounterTable::new(self.index_bits, Self::COUNTER)?;
        debug!("GShare: {} entries, {} history bits", pht.size(), ghr.len());
        Ok(GSharePredictor {
            cfg: self,
            ghr,
            pht,
            tracker: PerformanceTracker::new(),
        })
    }
}

/// GShare predictor: one global history register and one table of 2-bit
/// counters indexed by `(addr ^ history) & (2^n - 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GSharePredictor {
    cfg: GShareConfig,
    /// Global History Register storing recent branch outcomes.
    ghr: HistoryRegister,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: CounterTable,
    tracker: PerformanceTracker,
}
impl GSharePredictor {
    pub fn new(history_bits: usize, index_bits: usize)
        -> Result<Self, ConfigError>
    {
        GShareConfig { history_bits, index_bits }.build()
    }

    /// Calculates the index into the Pattern History Table.
    pub fn index(&self, addr: u64) -> usize {
        self.pht.index(addr ^ self.ghr.value())
    }

    pub fn history(&self) -> &HistoryRegister { &self.ghr }
    pub fn pht(&self) -> &CounterTable { &self.pht }
}

impl BranchPredictor for GSharePredictor {
    fn name(&self) -> &'static str { "GShare" }
    fn describe(&self) -> String {
        format!("m={} n={}", self.cfg.history_bits, self.cfg.index_bits)
    }

    fn predict(&self, addr: u64) -> Outcome {
        self.pht.counter(self.index(addr)).predict()
    }

    fn train(&mut self, addr: u64, actual: Outcome) {
        let idx = self.index(addr);
        self.pht.bump(idx, actual);
        self.ghr.push(actual);
    }

    fn tracker(&self) -> &PerformanceTracker { &self.tracker }
    fn tracker_mut(&mut self) -> &mut PerformanceTracker { &mut self.tracker }
    fn storage_bits(&self) -> usize { self.cfg.storage_bits() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn index_xors_history() {
        let mut p = GSharePredictor::new(3, 4).unwrap();
        assert_eq!(p.index(0b1010), 0b1010);
        p.train(0, Outcome::T);
        p.train(0, Outcome::N);
        p.train(0, Outcome::T);
        assert_eq!(p.history().value(), 0b101);
        assert_eq!(p.index(0b1010), 0b1111);
        assert_eq!(p.index(0b1_0000), 0b0101);
    }

    #[test]
    fn history_wider_than_index() {
        let mut p = GSharePredictor::new(8, 2).unwrap();
        for _ in 0..8 {
            p.train(0, Outcome::T);
        }
        assert_eq!(p.history().value(), 0xff);
        assert!(p.index(0) < 4);
    }

    #[test]
    fn learns_taken() {
        let mut p = GSharePredictor::new(4, 6).unwrap();
        for _ in 0..20 {
            let predicted = p.predict(0x1000);
            p.update(0x1000, Outcome::T, predicted);
        }
        assert_eq!(p.predict(0x1000), Outcome::T);
        assert_eq!(p.tracker().total(), 20);
    }
}
