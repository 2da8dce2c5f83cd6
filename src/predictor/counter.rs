//! Implementation of a saturating counter.

use crate::branch::Outcome;
use crate::error::*;
use crate::predictor::StatefulPredictor;

/// Named states of a 2-bit (4-state) saturating counter, in increasing order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TwoBitState {
    StronglyNotTaken = 0,
    WeaklyNotTaken = 1,
    WeaklyTaken = 2,
    StronglyTaken = 3,
}
impl TwoBitState {
    pub fn value(self) -> u8 { self as u8 }

    pub fn from_value(x: u8) -> Option<Self> {
        match x {
            0 => Some(Self::StronglyNotTaken),
            1 => Some(Self::WeaklyNotTaken),
            2 => Some(Self::WeaklyTaken),
            3 => Some(Self::StronglyTaken),
            _ => None,
        }
    }
}

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounterConfig {
    /// Width of the counter in bits
    pub bits: u8,

    /// Initial value of the counter
    pub init: u8,
}
impl SaturatingCounterConfig {
    /// A 2-state counter (one bit), initially not-taken.
    pub const ONE_BIT: Self = Self { bits: 1, init: 0 };

    /// A 4-state counter (two bits) starting in the given state.
    pub const fn two_bit(init: TwoBitState) -> Self {
        Self { bits: 2, init: init as u8 }
    }

    pub fn storage_bits(&self) -> usize {
        self.bits as usize
    }

    /// Largest value representable in `bits` bits.
    pub fn max(&self) -> u8 {
        ((1u16 << self.bits.min(MAX_COUNTER_BITS)) - 1) as u8
    }

    pub fn build(self) -> Result<SaturatingCounter, ConfigError> {
        ConfigError::check_width("counter_bits", self.bits as usize,
            MAX_COUNTER_BITS as usize)?;
        if self.init > self.max() {
            return Err(ConfigError::CounterInit {
                init: self.init, bits: self.bits
            });
        }
        Ok(self.load(self.init))
    }

    /// View a stored counter value through this configuration.
    /// Values above the maximum are clamped.
    pub(crate) fn load(&self, ctr: u8) -> SaturatingCounter {
        let max = self.max();
        SaturatingCounter { ctr: ctr.min(max), max }
    }
}

/// An N-bit saturating counter used to follow the behavior of a branch.
///
/// The value ranges over `[0, 2^N - 1]`. The upper half of the range
/// predicts "taken" and the lower half predicts "not-taken". Moving past
/// either end of the range has no effect.
///
/// Tables store only the value of each counter (see [`CounterTable`]);
/// a [SaturatingCounter] is the value paired with its upper bound.
///
/// [`CounterTable`]: crate::predictor::CounterTable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    ctr: u8,
    max: u8,
}
impl SaturatingCounter {
    pub fn value(&self) -> u8 { self.ctr }
    pub fn max(&self) -> u8 { self.max }

    /// The smallest value predicting "taken".
    pub fn threshold(&self) -> u8 { (self.max >> 1) + 1 }

    /// Returns the named state when this is a 2-bit counter.
    pub fn state(&self) -> Option<TwoBitState> {
        if self.max == 3 { TwoBitState::from_value(self.ctr) } else { None }
    }

    /// Returns 'true' when the counter cannot move further toward `outcome`.
    pub fn is_saturated(&self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::T => self.ctr == self.max,
            Outcome::N => self.ctr == 0,
        }
    }

    pub fn increment(&mut self) {
        if self.ctr < self.max { self.ctr += 1; }
    }

    pub fn decrement(&mut self) {
        self.ctr = self.ctr.saturating_sub(1);
    }

    /// Move one step toward `outcome`.
    pub fn bump(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.increment(),
            Outcome::N => self.decrement(),
        }
    }
}

impl StatefulPredictor for SaturatingCounter {
    fn predict(&self) -> Outcome {
        Outcome::from(self.ctr >= self.threshold())
    }
    fn update(&mut self, outcome: Outcome) {
        self.bump(outcome);
    }
}
