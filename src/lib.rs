//! Trace-driven evaluation of branch predictors.
//!
//! A trace of `(address, outcome)` records is replayed against one or more
//! predictors. Each predictor guesses an outcome, is told the real outcome,
//! and counts how often it was right.

pub mod branch;
pub mod config;
pub mod error;
pub mod history;
pub mod predictor;
pub mod report;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use config::*;
pub use error::*;
pub use history::*;
pub use predictor::*;
pub use report::*;
pub use stats::*;
pub use trace::*;
