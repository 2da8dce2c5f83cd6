//! Predictors with no state.

use crate::branch::Outcome;
use crate::predictor::BranchPredictor;
use crate::stats::PerformanceTracker;

/// Always predicts the same outcome, regardless of the branch address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticPredictor {
    outcome: Outcome,
    tracker: PerformanceTracker,
}
impl StaticPredictor {
    pub fn new(outcome: Outcome) -> Self {
        Self { outcome, tracker: PerformanceTracker::new() }
    }

    /// A predictor which always guesses 'taken'.
    pub fn taken() -> Self { Self::new(Outcome::T) }

    /// A predictor which always guesses 'not-taken'.
    pub fn not_taken() -> Self { Self::new(Outcome::N) }
}

impl BranchPredictor for StaticPredictor {
    fn name(&self) -> &'static str {
        match self.outcome {
            Outcome::T => "AlwaysTaken",
            Outcome::N => "AlwaysNotTaken",
        }
    }
    fn describe(&self) -> String { format!("always {}", self.outcome) }
    fn predict(&self, _addr: u64) -> Outcome { self.outcome }
    fn train(&mut self, _addr: u64, _actual: Outcome) {}
    fn tracker(&self) -> &PerformanceTracker { &self.tracker }
    fn tracker_mut(&mut self) -> &mut PerformanceTracker { &mut self.tracker }
    fn storage_bits(&self) -> usize { 0 }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ignores_training() {
        let mut p = StaticPredictor::taken();
        for addr in 0..16 {
            let predicted = p.predict(addr);
            assert_eq!(predicted, Outcome::T);
            p.update(addr, Outcome::N, predicted);
        }
        assert_eq!(p.predict(3), Outcome::T);
        assert_eq!(p.tracker().incorrect(), 16);
        assert_eq!(p.report().accuracy_percent, Some(0.0));
        assert_eq!(StaticPredictor::not_taken().name(), "AlwaysNotTaken");
    }
}
