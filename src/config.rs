//! Configuration for an evaluation session.
//!
//! A session is a list of [PredictorConfig]s. Each one is resolved into an
//! [AnyPredictor] once, before any records are replayed. Sessions can be
//! loaded from JSON:
//!
//! ```json
//! { "predictors": [
//!     { "kind": "static", "outcome": "taken" },
//!     { "kind": "gshare", "history_bits": 13, "index_bits": 13 }
//! ] }
//! ```

use serde::Deserialize;

use crate::branch::Outcome;
use crate::error::ConfigError;
use crate::predictor::*;

/// Parameters used by the reference sweep over all predictor kinds.
mod defaults {
    pub const ONE_BIT_INDEX_BITS: usize = 14;
    pub const TWO_BIT_INDEX_BITS: usize = 13;

    pub const CORRELATING_HISTORY_BITS: usize = 6;
    pub const CORRELATING_INDEX_BITS: usize = 7;

    pub const GSHARE_HISTORY_BITS: usize = 13;
    pub const GSHARE_INDEX_BITS: usize = 13;

    pub const TOURNAMENT_HISTORY_BITS: usize = 11;
    pub const TOURNAMENT_INDEX_BITS: usize = 11;
    pub const TOURNAMENT_CHOOSER_BITS: usize = 12;
}

/// Parameters for one predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum PredictorConfig {
    Static { outcome: Outcome },
    OneBit { index_bits: usize },
    TwoBit { index_bits: usize },
    Correlating { history_bits: usize, index_bits: usize },
    #[serde(rename = "gshare")]
    GShare { history_bits: usize, index_bits: usize },
    Tournament { history_bits: usize, index_bits: usize, chooser_bits: usize },
}

impl PredictorConfig {
    /// Names accepted by [`PredictorConfig::from_name`].
    pub const NAMES: [&'static str; 7] = [
        "taken", "not-taken", "one-bit", "two-bit",
        "correlating", "gshare", "tournament",
    ];

    /// Resolve a predictor name into its default configuration.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        use defaults::*;
        let cfg = match name.to_ascii_lowercase().as_str() {
            "taken" | "always-taken" => Self::Static { outcome: Outcome::T },
            "not-taken" | "always-not-taken" =>
                Self::Static { outcome: Outcome::N },
            "one-bit" | "onebit" =>
                Self::OneBit { index_bits: ONE_BIT_INDEX_BITS },
            "two-bit" | "twobit" | "bimodal" =>
                Self::TwoBit { index_bits: TWO_BIT_INDEX_BITS },
            "correlating" => Self::Correlating {
                history_bits: CORRELATING_HISTORY_BITS,
                index_bits: CORRELATING_INDEX_BITS,
            },
            "gshare" => Self::GShare {
                history_bits: GSHARE_HISTORY_BITS,
                index_bits: GSHARE_INDEX_BITS,
            },
            "tournament" => Self::Tournament {
                history_bits: TOURNAMENT_HISTORY_BITS,
                index_bits: TOURNAMENT_INDEX_BITS,
                chooser_bits: TOURNAMENT_CHOOSER_BITS,
            },
            _ => return Err(ConfigError::UnknownPredictor(name.to_string())),
        };
        Ok(cfg)
    }

    /// Validate the parameters and create the predictor.
    pub fn build(&self) -> Result<AnyPredictor, ConfigError> {
        let bp = match *self {
            Self::Static { outcome } =>
                AnyPredictor::Static(StaticPredictor::new(outcome)),
            Self::OneBit { index_bits } =>
                AnyPredictor::OneBit(OneBitConfig { index_bits }.build()?),
            Self::TwoBit { index_bits } =>
                AnyPredictor::TwoBit(TwoBitConfig { index_bits }.build()?),
            Self::Correlating { history_bits, index_bits } =>
                AnyPredictor::Correlating(CorrelatingConfig {
                    history_bits, index_bits
                }.build()?),
            Self::GShare { history_bits, index_bits } =>
                AnyPredictor::GShare(GShareConfig {
                    history_bits, index_bits
                }.build()?),
            Self::Tournament { history_bits, index_bits, chooser_bits } =>
                AnyPredictor::Tournament(TournamentConfig {
                    history_bits, index_bits, chooser_bits
                }.build()?),
        };
        Ok(bp)
    }
}

/// The set of predictors to evaluate over a trace.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationConfig {
    pub predictors: Vec<PredictorConfig>,
}

impl Default for EvaluationConfig {
    /// Every predictor kind, with the reference parameters.
    fn default() -> Self {
        let predictors = PredictorConfig::NAMES.iter()
            .filter_map(|name| PredictorConfig::from_name(name).ok())
            .collect();
        Self { predictors }
    }
}

impl EvaluationConfig {
    /// Select predictors by name, using their default parameters.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        let predictors = names.iter()
            .map(|n| PredictorConfig::from_name(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { predictors })
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
