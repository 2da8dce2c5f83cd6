//! Structured results produced at the end of a run.

use itertools::*;
use serde::Serialize;

use crate::stats::PerformanceTracker;

/// Final performance numbers for one predictor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Name of the predictor
    pub name: String,

    /// Human-readable summary of the predictor parameters
    pub config: String,

    pub correct: u64,
    pub incorrect: u64,

    /// `None` when no records were processed.
    pub accuracy_percent: Option<f64>,

    /// `None` when no records were processed.
    pub misprediction_rate_percent: Option<f64>,

    /// Approximate number of storage bits used by the predictor's tables
    pub storage_bits: usize,

    /// Reports for sub-predictors (only used by composite predictors)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Report>,
}
impl Report {
    pub fn new(name: impl ToString, config: impl ToString,
        tracker: &PerformanceTracker, storage_bits: usize) -> Self
    {
        Self {
            name: name.to_string(),
            config: config.to_string(),
            correct: tracker.correct(),
            incorrect: tracker.incorrect(),
            accuracy_percent: tracker.accuracy(),
            misprediction_rate_percent: tracker.misprediction_rate(),
            storage_bits,
            components: Vec::new(),
        }
    }

    pub fn with_components(mut self, components: Vec<Report>) -> Self {
        self.components = components;
        self
    }

    pub fn total(&self) -> u64 { self.correct + self.incorrect }
}

fn percent(x: Option<f64>) -> String {
    match x {
        Some(x) => format!("{:.2}%", x),
        None => "undefined".to_string(),
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.write_indented(f, 0)
    }
}

impl Report {
    fn write_indented(&self, f: &mut std::fmt::Formatter, depth: usize)
        -> std::fmt::Result
    {
        let pad = "  ".repeat(depth);
        writeln!(f, "{}{} ({})", pad, self.name, self.config)?;
        writeln!(f, "{}  correct predictions:   {}", pad, self.correct)?;
        writeln!(f, "{}  incorrect predictions: {}", pad, self.incorrect)?;
        writeln!(f, "{}  accuracy:              {}", pad,
            percent(self.accuracy_percent))?;
        writeln!(f, "{}  misprediction rate:    {}", pad,
            percent(self.misprediction_rate_percent))?;
        writeln!(f, "{}  storage:               {} bits", pad,
            self.storage_bits)?;
        for c in self.components.iter() {
            c.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Render a compact table with one line per report.
pub fn render_summary(reports: &[Report]) -> String {
    let width = reports.iter().map(|r| r.name.len()).max()
        .unwrap_or(0).max("predictor".len());
    let header = format!("{:<width$} | {:>10} | {:>10} | {:>9} | {:>12}",
        "predictor", "correct", "incorrect", "accuracy", "storage bits");
    let rule = "-".repeat(header.len());
    let rows = reports.iter().map(|r| {
        format!("{:<width$} | {:>10} | {:>10} | {:>9} | {:>12}",
            r.name, r.correct, r.incorrect,
            percent(r.accuracy_percent), r.storage_bits)
    });
    [header, rule].into_iter().chain(rows).join("\n")
}
