//! Shared helpers for the integration tests.

#![allow(dead_code)]

use bpsim::*;
use bpsim::trace::synth::*;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Replay some records and return every prediction that was made.
pub fn predictions<P>(bp: &mut P, records: &[BranchRecord]) -> Vec<Outcome>
    where P: BranchPredictor + ?Sized
{
    records.iter().map(|r| bpsim::sim::step(bp, r)).collect()
}

/// A single branch alternating between 'taken' and 'not-taken'.
pub fn alternating(addr: u64, len: usize) -> Vec<BranchRecord> {
    single(addr, BranchPattern::Alternating, len)
}

/// A few branches with different behavior, interleaved.
pub fn mixed(len: usize) -> Vec<BranchRecord> {
    TraceSynthesizer::new(7)
        .branch(0x4000, BranchPattern::Loop(6))
        .branch(0x4010, BranchPattern::Alternating)
        .branch(0x4024, BranchPattern::Random(0.3))
        .branch(0x4ff0, BranchPattern::Pattern(
            vec![Outcome::T, Outcome::T, Outcome::N, Outcome::N, Outcome::T]))
        .generate(len)
}

/// Small configurations for every predictor kind.
pub fn small_configs() -> Vec<PredictorConfig> {
    vec![
        PredictorConfig::Static { outcome: Outcome::T },
        PredictorConfig::Static { outcome: Outcome::N },
        PredictorConfig::OneBit { index_bits: 4 },
        PredictorConfig::TwoBit { index_bits: 4 },
        PredictorConfig::Correlating { history_bits: 3, index_bits: 4 },
        PredictorConfig::GShare { history_bits: 6, index_bits: 5 },
        PredictorConfig::Tournament {
            history_bits: 6, index_bits: 5, chooser_bits: 4
        },
    ]
}
