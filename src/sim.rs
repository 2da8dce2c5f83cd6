//! Replaying traces against predictors.

use log::{ info, warn };

use crate::branch::*;
use crate::config::*;
use crate::error::*;
use crate::predictor::*;
use crate::report::Report;
use crate::stats::BranchStats;

/// Feed one record to a predictor: predict, then update with the outcome.
/// Returns the prediction.
pub fn step<P>(bp: &mut P, record: &BranchRecord) -> Outcome
    where P: BranchPredictor + ?Sized
{
    let predicted = bp.predict(record.addr);
    bp.update(record.addr, record.outcome, predicted);
    predicted
}

/// Replay every record (in order) against a predictor and return the final
/// report.
pub fn run<P>(bp: &mut P, records: &[BranchRecord]) -> Report
    where P: BranchPredictor + ?Sized
{
    for record in records {
        step(bp, record);
    }
    bp.report()
}

/// Like [run], but also collect per-branch statistics.
pub fn profile<P>(bp: &mut P, records: &[BranchRecord]) -> (Report, BranchStats)
    where P: BranchPredictor + ?Sized
{
    let mut stats = BranchStats::new();
    for record in records {
        let predicted = step(bp, record);
        stats.update(record, predicted);
    }
    (bp.report(), stats)
}

/// The result of evaluating one configured predictor.
#[derive(Debug)]
pub struct Evaluation {
    pub config: PredictorConfig,
    pub result: Result<(Report, BranchStats), ConfigError>,
}

/// Evaluate every configured predictor over the same records.
///
/// Each predictor is built and run on its own. A predictor which cannot be
/// built is reported as an error and does not affect the others.
pub fn evaluate(cfg: &EvaluationConfig, records: &[BranchRecord])
    -> Vec<Evaluation>
{
    cfg.predictors.iter().map(|pcfg| {
        let result = pcfg.build().map(|mut bp| {
            let (report, stats) = profile(&mut bp, records);
            info!("{} ({}): {}/{} correct", report.name, report.config,
                report.correct, report.total());
            (report, stats)
        });
        if let Err(e) = &result {
            warn!("Skipping {:?}: {}", pcfg, e);
        }
        Evaluation { config: *pcfg, result }
    }).collect()
}
