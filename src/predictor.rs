//! Implementations of different branch predictors.

pub mod table;
pub mod counter;
pub mod simple;
pub mod onebit;
pub mod twobit;
pub mod correlating;
pub mod gshare;
pub mod tournament;

pub use table::*;
pub use counter::*;
pub use simple::*;
pub use onebit::*;
pub use twobit::*;
pub use correlating::*;
pub use gshare::*;
pub use tournament::*;

use crate::branch::Outcome;
use crate::report::Report;
use crate::stats::PerformanceTracker;

/// Interface to a predictor with some internal state which is only subject to
/// change by the correct branch outcome.
pub trait StatefulPredictor {
    /// Return the current predicted outcome.
    fn predict(&self) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, outcome: Outcome);
}

/// Interface to a predictor that guesses the outcome of a branch at some
/// address, and then learns from the actual outcome.
///
/// Every implementation owns a [PerformanceTracker]; [`update`] is the only
/// place where it is mutated.
///
/// [`update`]: BranchPredictor::update
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Human-readable summary of the parameters used to build the predictor.
    fn describe(&self) -> String;

    /// Predict the outcome of the branch at `addr`.
    fn predict(&self, addr: u64) -> Outcome;

    /// Move the internal state of the predictor toward the actual outcome
    /// of the branch at `addr`. This does not touch the tracker.
    fn train(&mut self, addr: u64, actual: Outcome);

    fn tracker(&self) -> &PerformanceTracker;
    fn tracker_mut(&mut self) -> &mut PerformanceTracker;

    /// Number of bits of state used to make predictions.
    fn storage_bits(&self) -> usize;

    /// Train the predictor and record whether `predicted` was correct.
    fn update(&mut self, addr: u64, actual: Outcome, predicted: Outcome) {
        self.train(addr, actual);
        self.tracker_mut().record(predicted, actual);
    }

    /// Summarize the performance of this predictor so far.
    fn report(&self) -> Report {
        Report::new(self.name(), self.describe(), self.tracker(),
            self.storage_bits())
    }
}

/// Enum wrapper for static dispatch over the supported predictors.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyPredictor {
    Static(StaticPredictor),
    OneBit(OneBitPredictor),
    TwoBit(TwoBitPredictor),
    Correlating(CorrelatingPredictor),
    GShare(GSharePredictor),
    Tournament(TournamentPredictor),
}

macro_rules! dispatch {
    ($self:ident, $bp:ident => $e:expr) => {
        match $self {
            AnyPredictor::Static($bp) => $e,
            AnyPredictor::OneBit($bp) => $e,
            AnyPredictor::TwoBit($bp) => $e,
            AnyPredictor::Correlating($bp) => $e,
            AnyPredictor::GShare($bp) => $e,
            AnyPredictor::Tournament($bp) => $e,
        }
    };
}

impl BranchPredictor for AnyPredictor {
    fn name(&self) -> &'static str { dispatch!(self, bp => bp.name()) }
    fn describe(&self) -> String { dispatch!(self, bp => bp.describe()) }
    fn predict(&self, addr: u64) -> Outcome {
        dispatch!(self, bp => bp.predict(addr))
    }
    fn train(&mut self, addr: u64, actual: Outcome) {
        dispatch!(self, bp => bp.train(addr, actual))
    }
    fn tracker(&self) -> &PerformanceTracker {
        dispatch!(self, bp => bp.tracker())
    }
    fn tracker_mut(&mut self) -> &mut PerformanceTracker {
        dispatch!(self, bp => bp.tracker_mut())
    }
    fn storage_bits(&self) -> usize {
        dispatch!(self, bp => bp.storage_bits())
    }
    fn update(&mut self, addr: u64, actual: Outcome, predicted: Outcome) {
        dispatch!(self, bp => bp.update(addr, actual, predicted))
    }
    fn report(&self) -> Report { dispatch!(self, bp => bp.report()) }
}
