//! A bimodal predictor: a table of 2-bit counters indexed by the branch
//! address.

use log::debug;

use crate::branch::Outcome;
use crate::error::*;
use crate::predictor::*;
use crate::stats::PerformanceTracker;

/// Configuration for a [`TwoBitPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwoBitConfig {
    /// Number of low address bits used to index the table
    pub index_bits: usize,
}
impl TwoBitConfig {
    /// Counters start out strongly biased toward 'not-taken'.
    pub const COUNTER: SaturatingCounterConfig =
        SaturatingCounterConfig::two_bit(TwoBitState::StronglyNotTaken);

    pub fn storage_bits(&self) -> usize {
        Self::COUNTER.storage_bits() << self.index_bits
    }

    pub fn build(self) -> Result<TwoBitPredictor, ConfigError> {
        let pht = CounterTable::new(self.index_bits, Self::COUNTER)?;
        debug!("TwoBit: {} entries", pht.size());
        Ok(TwoBitPredictor {
            cfg: self,
            pht,
            tracker: PerformanceTracker::new(),
        })
    }
}

/// Predicts with a saturating counter selected by the low address bits.
///
/// Once a counter is saturated, it takes two contrary outcomes in a row to
/// change the predicted direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoBitPredictor {
    cfg: TwoBitConfig,
    pht: CounterTable,
    tracker: PerformanceTracker,
}
impl TwoBitPredictor {
    pub fn new(index_bits: usize) -> Result<Self, ConfigError> {
        TwoBitConfig { index_bits }.build()
    }

    /// Returns the counter used to predict the branch at `addr`.
    pub fn counter(&self, addr: u64) -> SaturatingCounter {
        self.pht.counter(self.pht.index(addr))
    }

    pub fn pht(&self) -> &CounterTable { &self.pht }
}

impl BranchPredictor for TwoBitPredictor {
    fn name(&self) -> &'static str { "TwoBit" }
    fn describe(&self) -> String { format!("k={}", self.cfg.index_bits) }

    fn predict(&self, addr: u64) -> Outcome {
        self.counter(addr).predict()
    }

    fn train(&mut self, addr: u64, actual: Outcome) {
        let idx = self.pht.index(addr);
        self.pht.bump(idx, actual);
    }

    fn tracker(&self) -> &PerformanceTracker { &self.tracker }
    fn tracker_mut(&mut self) -> &mut PerformanceTracker { &mut self.tracker }
    fn storage_bits(&self) -> usize { self.pht.storage_bits() }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::predictor::counter::TwoBitState::*;

    #[test]
    fn hysteresis_after_saturation() {
        let mut p = TwoBitPredictor::new(1).unwrap();
        let outcomes = [Outcome::T, Outcome::T, Outcome::T,
            Outcome::N, Outcome::N, Outcome::N];
        let mut predictions = Vec::new();
        for actual in outcomes {
            let predicted = p.predict(0);
            predictions.push(predicted);
            p.update(0, actual, predicted);
        }
        assert_eq!(predictions, [Outcome::N, Outcome::N, Outcome::T,
            Outcome::T, Outcome::T, Outcome::N]);
        assert_eq!(p.counter(0).state(), Some(StronglyNotTaken));
    }

    #[test]
    fn entries_are_per_address() {
        let mut p = TwoBitPredictor::new(2).unwrap();
        p.train(1, Outcome::T);
        p.train(1, Outcome::T);
        assert_eq!(p.counter(1).state(), Some(WeaklyTaken));
        assert_eq!(p.counter(5).state(), Some(WeaklyTaken));
        assert_eq!(p.counter(2).state(), Some(StronglyNotTaken));
        assert_eq!(p.storage_bits(), 8);
    }
}
