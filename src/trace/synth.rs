//! Generating synthetic traces from per-branch outcome patterns.

use std::str::FromStr;

use rand::prelude::*;

use crate::branch::*;

/// A pre-determined pattern of outcomes associated with a conditional branch.
#[derive(Clone, Debug, PartialEq)]
pub enum BranchPattern {
    /// A branch whose outcome is always 'taken'.
    AlwaysTaken,

    /// A branch whose outcome is always 'not-taken'.
    NeverTaken,

    /// A branch which alternates between 'taken' and 'not-taken',
    /// starting with 'taken'.
    Alternating,

    /// The backward branch of a loop with the given trip count: 'taken'
    /// on every iteration except the last.
    Loop(usize),

    /// A branch whose outcome is only periodically "taken".
    /// Otherwise, the branch is "not-taken" by default.
    TakenPeriodic(usize),

    /// A branch with an arbitrary repeating pattern of outcomes.
    Pattern(Vec<Outcome>),

    /// A branch which is 'taken' with the given probability.
    Random(f64),
}
impl BranchPattern {
    /// Generate the outcome for the `ctr`-th execution of this branch.
    pub fn outcome(&self, ctr: usize, rng: &mut impl Rng) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::NeverTaken => Outcome::N,
            Self::Alternating => Outcome::from(ctr % 2 == 0),
            Self::Loop(trip) => {
                let trip = (*trip).max(1);
                Outcome::from(ctr % trip != trip - 1)
            },
            Self::TakenPeriodic(p) => {
                let p = (*p).max(1);
                Outcome::from(ctr % p == p - 1)
            },
            Self::Pattern(p) if p.is_empty() => Outcome::N,
            Self::Pattern(p) => p[ctr % p.len()],
            Self::Random(prob) => Outcome::from(rng.gen_bool(prob.clamp(0.0, 1.0))),
        }
    }
}

/// Parses `always-taken`, `never-taken`, `alternating`, `loop:<trip>`,
/// `periodic:<period>`, `pattern:<T|N...>` and `random:<probability>`.
impl FromStr for BranchPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        let arg = || arg.ok_or_else(|| format!("'{}' needs an argument", kind));
        let count = |x: &str| x.parse::<usize>().ok().filter(|n| *n > 0)
            .ok_or_else(|| format!("invalid count '{}'", x));
        match kind {
            "always-taken" => Ok(Self::AlwaysTaken),
            "never-taken" => Ok(Self::NeverTaken),
            "alternating" => Ok(Self::Alternating),
            "loop" => Ok(Self::Loop(count(arg()?)?)),
            "periodic" => Ok(Self::TakenPeriodic(count(arg()?)?)),
            "pattern" => {
                let p = arg()?.chars().map(|c| match c {
                    'T' | 't' => Ok(Outcome::T),
                    'N' | 'n' => Ok(Outcome::N),
                    _ => Err(format!("invalid outcome '{}'", c)),
                }).collect::<Result<Vec<_>, _>>()?;
                if p.is_empty() {
                    return Err("empty pattern".to_string());
                }
                Ok(Self::Pattern(p))
            },
            "random" => {
                let arg = arg()?;
                arg.parse::<f64>().ok()
                    .filter(|p| (0.0..=1.0).contains(p))
                    .map(Self::Random)
                    .ok_or_else(|| format!("invalid probability '{}'", arg))
            },
            _ => Err(format!("unknown pattern '{}'", s)),
        }
    }
}

/// Builds a trace by executing a set of branches in round-robin order.
#[derive(Clone, Debug)]
pub struct TraceSynthesizer {
    branches: Vec<(u64, BranchPattern)>,
    seed: u64,
}
impl TraceSynthesizer {
    pub fn new(seed: u64) -> Self {
        Self { branches: Vec::new(), seed }
    }

    /// Add a branch at `addr` following some pattern.
    pub fn branch(mut self, addr: u64, pattern: BranchPattern) -> Self {
        self.branches.push((addr, pattern));
        self
    }

    /// Generate `len` records. The same seed always produces the same trace.
    pub fn generate(&self, len: usize) -> Vec<BranchRecord> {
        if self.branches.is_empty() {
            return Vec::new();
        }
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ctrs = vec![0usize; self.branches.len()];
        (0..len).map(|i| {
            let slot = i % self.branches.len();
            let (addr, pattern) = &self.branches[slot];
            let outcome = pattern.outcome(ctrs[slot], &mut rng);
            ctrs[slot] += 1;
            BranchRecord::new(*addr, outcome)
        }).collect()
    }
}

/// A single branch following `pattern`, repeated `len` times.
pub fn single(addr: u64, pattern: BranchPattern, len: usize)
    -> Vec<BranchRecord>
{
    TraceSynthesizer::new(0).branch(addr, pattern).generate(len)
}
