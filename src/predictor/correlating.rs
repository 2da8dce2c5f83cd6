//! A two-level correlating predictor.

use log::debug;

use crate::branch::Outcome;
use crate::error::*;
use crate::history::*;
use crate::predictor::*;
use crate::stats::PerformanceTracker;

/// Configuration for a [`CorrelatingPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorrelatingConfig {
    /// Number of global history bits (selects one of `2^m` rows)
    pub history_bits: usize,

    /// Number of low address bits (selects one of `2^n` columns)
    pub index_bits: usize,
}
impl CorrelatingConfig {
    pub const COUNTER: SaturatingCounterConfig =
        SaturatingCounterConfig::two_bit(TwoBitState::StronglyNotTaken);

    pub fn storage_bits(&self) -> usize {
        (Self::COUNTER.storage_bits() << (self.history_bits + self.index_bits))
            + self.history_bits
    }

    pub fn build(self) -> Result<CorrelatingPredictor, ConfigError> {
        let pht = CounterMatrix::new(self.history_bits, self.index_bits,
            Self::COUNTER)?;
        let ghr = HistoryRegister::new(self.history_bits)?;
        debug!("Correlating: {}x{} entries", pht.rows(), pht.cols());
        Ok(CorrelatingPredictor {
            cfg: self,
            ghr,
            pht,
            tracker: PerformanceTracker::new(),
        })
    }
}

/// An `(m, n)` predictor: the last `m` outcomes of *any* branch select a
/// table of `2^n` counters, which is then indexed by the branch address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrelatingPredictor {
    cfg: CorrelatingConfig,
    ghr: HistoryRegister,
    pht: CounterMatrix,
    tracker: PerformanceTracker,
}
impl CorrelatingPredictor {
    pub fn new(history_bits: usize, index_bits: usize)
        -> Result<Self, ConfigError>
    {
        CorrelatingConfig { history_bits, index_bits }.build()
    }

    fn index(&self, addr: u64) -> (usize, usize) {
        self.pht.index(self.ghr.value(), addr)
    }

    pub fn history(&self) -> &HistoryRegister { &self.ghr }
    pub fn pht(&self) -> &CounterMatrix { &self.pht }
}

impl BranchPredictor for CorrelatingPredictor {
    fn name(&self) -> &'static str { "Correlating" }
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
    fn history_selects_row() {
        let mut p = CorrelatingPredictor::new(2, 2).unwrap();
        // Row 0 (empty history), column 1
        p.train(1, Outcome::T);
        assert_eq!(p.history().value(), 0b01);
        assert_eq!(p.pht().counter((0, 1)).value(), 1);

        // Row 1 (last outcome taken), column 1
        p.train(1, Outcome::T);
        assert_eq!(p.pht().counter((1, 1)).value(), 1);
        assert_eq!(p.history().value(), 0b11);

        p.train(5, Outcome::N);
        assert_eq!(p.pht().counter((3, 1)).value(), 0);
        assert_eq!(p.history().value(), 0b10);
    }

    #[test]
    fn learns_alternation() {
        let mut p = CorrelatingPredictor::new(2, 1).unwrap();
        let mut hits = 0;
        for i in 0..200 {
            let actual = Outcome::from(i % 2 == 0);
            let predicted = p.predict(0);
            if i >= 100 && predicted == actual { hits += 1; }
            p.update(0, actual, predicted);
        }
        assert_eq!(hits, 100);
    }

    #[test]
    fn storage_includes_history() {
        let p = CorrelatingPredictor::new(6, 7).unwrap();
        assert_eq!(p.storage_bits(), 2 * (1 << 13) + 6);
        assert!(CorrelatingPredictor::new(0, 7).is_err());
    }
}
