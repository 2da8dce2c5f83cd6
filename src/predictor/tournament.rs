//! Tournament branch predictor.
//!
//! A hybrid predictor that employs a meta-predictor (the chooser) to select
//! between a global predictor ([GSharePredictor]) and a local predictor
//! ([TwoBitPredictor]). Both components are always trained, regardless of
//! which one provided the final prediction.

use log::debug;

use crate::branch::Outcome;
use crate::error::*;
use crate::predictor::*;
use crate::report::Report;
use crate::stats::PerformanceTracker;

/// Identifies a component in a [`TournamentPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentProvider {
    /// The local (bimodal) component
    TwoBit,
    /// The global (gshare) component
    GShare,
}

/// Configuration for a [`TournamentPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Number of global history bits in the gshare component
    pub history_bits: usize,

    /// Number of index bits in both the gshare and two-bit components
    pub index_bits: usize,

    /// Number of low address bits used to index the chooser
    pub chooser_bits: usize,
}
impl TournamentConfig {
    /// Chooser counters start out trusting the two-bit component, one
    /// step away from switching.
    pub const CHOOSER: SaturatingCounterConfig =
        SaturatingCounterConfig::two_bit(TwoBitState::WeaklyNotTaken);

    pub fn gshare(&self) -> GShareConfig {
        GShareConfig {
            history_bits: self.history_bits,
            index_bits: self.index_bits,
        }
    }

    pub fn twobit(&self) -> TwoBitConfig {
        TwoBitConfig { index_bits: self.index_bits }
    }

    pub fn storage_bits(&self) -> usize {
        self.gshare().storage_bits()
            + self.twobit().storage_bits()
            + (Self::CHOOSER.storage_bits() << self.chooser_bits)
    }

    pub fn build(self) -> Result<TournamentPredictor, ConfigError> {
        let chooser = CounterTable::new(self.chooser_bits, Self::CHOOSER)
            .map_err(|e| match e {
                ConfigError::ZeroWidth { .. } =>
                    ConfigError::ZeroWidth { param: "chooser_bits" },
                ConfigError::TooWide { bits, max, .. } =>
                    ConfigError::TooWide { param: "chooser_bits", bits, max },
                e => e,
            })?;
        let gshare = self.gshare().build()?;
        let twobit = self.twobit().build()?;
        debug!("Tournament: {} chooser entries", chooser.size());
        Ok(TournamentPredictor {
            cfg: self,
            gshare,
            twobit,
            chooser,
            tracker: PerformanceTracker::new(),
        })
    }
}

/// Tournament predictor: a chooser table of 2-bit counters selects between
/// a gshare component (upper half) and a two-bit component (lower half).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentPredictor {
    cfg: TournamentConfig,
    gshare: GSharePredictor,
    twobit: TwoBitPredictor,
    /// Counters choosing which component to trust for each branch.
    chooser: CounterTable,
    tracker: PerformanceTracker,
}
impl TournamentPredictor {
    pub fn new(history_bits: usize, index_bits: usize, chooser_bits: usize)
        -> Result<Self, ConfigError>
    {
        TournamentConfig { history_bits, index_bits, chooser_bits }.build()
    }

    /// Returns the chooser counter for the branch at `addr`.
    pub fn choice(&self, addr: u64) -> SaturatingCounter {
        self.chooser.counter(self.chooser.index(addr))
    }

    /// Returns the component trusted for the branch at `addr`.
    pub fn provider(&self, addr: u64) -> TournamentProvider {
        if self.choice(addr).value() <= TwoBitState::WeaklyNotTaken.value() {
            TournamentProvider::TwoBit
        } else {
            TournamentProvider::GShare
        }
    }

    pub fn gshare(&self) -> &GSharePredictor { &self.gshare }
    pub fn twobit(&self) -> &TwoBitPredictor { &self.twobit }
    pub fn chooser(&self) -> &CounterTable { &self.chooser }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str { "Tournament" }
    fn describe(&self) -> String {
        format!("m={} n={} t={}", self.cfg.history_bits, self.cfg.index_bits,
            self.cfg.chooser_bits)
    }

    fn predict(&self, addr: u64) -> Outcome {
        match self.provider(addr) {
            TournamentProvider::TwoBit => self.twobit.predict(addr),
            TournamentProvider::GShare => self.gshare.predict(addr),
        }
    }

    fn train(&mut self, addr: u64, actual: Outcome) {
        // Both verdicts must be taken before either component changes.
        let g_pred = self.gshare.predict(addr);
        let t_pred = self.twobit.predict(addr);

        self.gshare.update(addr, actual, g_pred);
        self.twobit.update(addr, actual, t_pred);

        let g_correct = g_pred == actual;
        let t_correct = t_pred == actual;
        if g_correct != t_correct {
            let idx = self.chooser.index(addr);
            let toward = if g_correct { Outcome::T } else { Outcome::N };
            self.chooser.bump(idx, toward);
        }
    }

    fn tracker(&self) -> &PerformanceTracker { &self.tracker }
    fn tracker_mut(&mut self) -> &mut PerformanceTracker { &mut self.tracker }
    fn storage_bits(&self) -> usize { self.cfg.storage_bits() }

    fn report(&self) -> Report {
        Report::new(self.name(), self.describe(),
            self.tracker(), self.storage_bits())
            .with_components(vec![self.gshare.report(), self.twobit.report()])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_with_twobit() {
        let p = TournamentPredictor::new(4, 4, 4).unwrap();
        assert_eq!(p.provider(0x10), TournamentProvider::TwoBit);
        assert_eq!(p.choice(0x10).state(), Some(TwoBitState::WeaklyNotTaken));
    }

    #[test]
    fn chooser_moves_toward_twobit() {
        let mut p = TournamentPredictor::new(2, 4, 4).unwrap();
        let mut choices = Vec::new();
        for _ in 0..4 {
            let predicted = p.predict(3);
            p.update(3, Outcome::T, predicted);
            choices.push(p.choice(3).value());
        }
        // Both components miss on the first two records, then only the
        // two-bit component is right.
        assert_eq!(choices, [1, 1, 0, 0]);
        assert_eq!(p.provider(3), TournamentProvider::TwoBit);
    }

    #[test]
    fn chooser_learns_gshare_on_alternation() {
        let mut p = TournamentPredictor::new(2, 4, 4).unwrap();
        let mut late_hits = 0;
        for i in 0..100 {
            let actual = Outcome::from(i % 2 == 0);
            let predicted = p.predict(3);
            if i >= 50 && predicted == actual { late_hits += 1; }
            p.update(3, actual, predicted);
        }
        assert_eq!(p.provider(3), TournamentProvider::GShare);
        assert_eq!(p.choice(3).state(), Some(TwoBitState::StronglyTaken));
        assert_eq!(late_hits, 50);
    }

    #[test]
    fn chooser_width_errors_are_named() {
        assert_eq!(TournamentPredictor::new(4, 4, 0).unwrap_err(),
            ConfigError::ZeroWidth { param: "chooser_bits" });
        assert_eq!(TournamentPredictor::new(0, 4, 4).unwrap_err(),
            ConfigError::ZeroWidth { param: "history_bits" });
    }

    #[test]
    fn report_has_components() {
        let mut p = TournamentPredictor::new(2, 2, 2).unwrap();
        let predicted = p.predict(1);
        p.update(1, Outcome::T, predicted);
        let r = p.report();
        assert_eq!(r.components.len(), 2);
        assert_eq!(r.components[0].name, "GShare");
        assert_eq!(r.components[1].total(), 1);
        assert_eq!(r.storage_bits, (2 << 2) + 2 + (2 << 2) + (2 << 2));
    }
}
