//! Types for implementing a table of predictors.

use crate::branch::Outcome;
use crate::error::*;
use crate::predictor::counter::*;
use crate::predictor::StatefulPredictor;

/// Interface to a table of predictors.
pub trait PredictorTable: Sized {
    /// The type of an index into the table.
    type Index;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: Self::Index) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: Self::Index) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        debug_assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// Mask selecting the low `bits` bits of a value.
pub fn low_bits_mask(bits: usize) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

/// A flat table of `2^index_bits` [SaturatingCounter]s.
///
/// Only the value of each counter is stored; the counter configuration is
/// shared by every entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterTable {
    /// Saturating counter configuration
    cfg: SaturatingCounterConfig,

    /// Counter values
    data: Vec<u8>,

    /// Number of index bits
    index_bits: usize,
}
impl CounterTable {
    pub fn new(index_bits: usize, cfg: SaturatingCounterConfig)
        -> Result<Self, ConfigError>
    {
        let index_bits = ConfigError::check_width("index_bits", index_bits,
            MAX_INDEX_BITS)?;
        let init = cfg.build()?.value();
        let data = vec![init; 1 << index_bits];
        Ok(Self { cfg, data, index_bits })
    }

    pub fn index_bits(&self) -> usize { self.index_bits }

    /// Reduce some value to an index into the table.
    pub fn index(&self, x: u64) -> usize {
        (x & low_bits_mask(self.index_bits)) as usize
    }

    /// Returns the counter at some index.
    pub fn counter(&self, idx: usize) -> SaturatingCounter {
        self.cfg.load(*self.get_entry(idx))
    }

    /// Move the counter at some index one step toward `outcome`.
    pub fn bump(&mut self, idx: usize, outcome: Outcome) {
        let mut ctr = self.counter(idx);
        ctr.update(outcome);
        *self.get_entry_mut(idx) = ctr.value();
    }

    /// Total number of storage bits used by all counters.
    pub fn storage_bits(&self) -> usize {
        self.cfg.storage_bits() * self.size()
    }

    pub fn iter(&self) -> impl Iterator<Item = SaturatingCounter> + '_ {
        self.data.iter().map(|x| self.cfg.load(*x))
    }
}

impl PredictorTable for CounterTable {
    type Index = usize;
    type Entry = u8;

    fn size(&self) -> usize { self.data.len() }

    fn get_entry(&self, idx: usize) -> &u8 {
        &self.data[idx & self.index_mask()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut u8 {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}

/// A two-dimensional table of [SaturatingCounter]s with `2^row_bits` rows
/// and `2^col_bits` columns, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterMatrix {
    cfg: SaturatingCounterConfig,
    data: Vec<u8>,
    row_bits: usize,
    col_bits: usize,
}
impl CounterMatrix {
    pub fn new(row_bits: usize, col_bits: usize,
        cfg: SaturatingCounterConfig) -> Result<Self, ConfigError>
    {
        let row_bits = ConfigError::check_width("history_bits", row_bits,
            MAX_INDEX_BITS)?;
        let col_bits = ConfigError::check_width("index_bits", col_bits,
            MAX_INDEX_BITS)?;
        ConfigError::check_width("history_bits + index_bits",
            row_bits + col_bits, MAX_INDEX_BITS)?;
        let init = cfg.build()?.value();
        let data = vec![init; 1 << (row_bits + col_bits)];
        Ok(Self { cfg, data, row_bits, col_bits })
    }

    pub fn rows(&self) -> usize { 1 << self.row_bits }
    pub fn cols(&self) -> usize { 1 << self.col_bits }

    /// Reduce a (row, column) pair of values to an index into the matrix.
    pub fn index(&self, row: u64, col: u64) -> (usize, usize) {
        ((row & low_bits_mask(self.row_bits)) as usize,
         (col & low_bits_mask(self.col_bits)) as usize)
    }

    /// Returns the counter at some (row, column).
    pub fn counter(&self, idx: (usize, usize)) -> SaturatingCounter {
        self.cfg.load(*self.get_entry(idx))
    }

    /// Move the counter at some (row, column) one step toward `outcome`.
    pub fn bump(&mut self, idx: (usize, usize), outcome: Outcome) {
        let mut ctr = self.counter(idx);
        ctr.update(outcome);
        *self.get_entry_mut(idx) = ctr.value();
    }

    pub fn storage_bits(&self) -> usize {
        self.cfg.storage_bits() * self.size()
    }

    fn flat(&self, (row, col): (usize, usize)) -> usize {
        let row = row & (self.rows() - 1);
        let col = col & (self.cols() - 1);
        (row << self.col_bits) | col
    }
}

impl PredictorTable for CounterMatrix {
    type Index = (usize, usize);
    type Entry = u8;

    fn size(&self) -> usize { self.data.len() }

    fn get_entry(&self, idx: (usize, usize)) -> &u8 {
        &self.data[self.flat(idx)]
    }

    fn get_entry_mut(&mut self, idx: (usize, usize)) -> &mut u8 {
        let index = self.flat(idx);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CTR: SaturatingCounterConfig =
        SaturatingCounterConfig::two_bit(TwoBitState::StronglyNotTaken);

    #[test]
    fn table_index_is_masked() {
        let mut t = CounterTable::new(3, CTR).unwrap();
        assert_eq!(t.size(), 8);
        assert_eq!(t.index(0b1_1101), 0b101);
        t.bump(13, Outcome::T);
        assert_eq!(t.counter(5).value(), 1);
        assert_eq!(*t.get_entry(5), 1);
        assert_eq!(t.storage_bits(), 16);
    }

    #[test]
    fn matrix_rows_are_independent() {
        let mut m = CounterMatrix::new(2, 3, CTR).unwrap();
        assert_eq!((m.rows(), m.cols(), m.size()), (4, 8, 32));
        let idx = m.index(0b110, 0b1111);
        assert_eq!(idx, (0b10, 0b111));
        m.bump(idx, Outcome::T);
        assert_eq!(m.counter((2, 7)).value(), 1);
        assert_eq!(m.counter((1, 7)).value(), 0);
        assert_eq!(*m.get_entry((2, 7)), 1);
    }

    #[test]
    fn rejects_bad_widths() {
        assert_eq!(CounterTable::new(0, CTR).unwrap_err(),
            ConfigError::ZeroWidth { param: "index_bits" });
        assert!(CounterTable::new(MAX_INDEX_BITS + 1, CTR).is_err());
        assert!(CounterMatrix::new(20, 20, CTR).is_err());
        assert!(CounterMatrix::new(0, 4, CTR).is_err());
    }

    #[test]
    fn saturates_in_place() {
        let mut t = CounterTable::new(2, CTR).unwrap();
        for _ in 0..5 {
            t.bump(1, Outcome::T);
        }
        assert_eq!(t.counter(1).state(), Some(TwoBitState::StronglyTaken));
        t.bump(0, Outcome::N);
        assert_eq!(t.counter(0).state(), Some(TwoBitState::StronglyNotTaken));
    }

    #[test]
    fn one_byte_per_entry_at_max_width() {
        let t = CounterTable::new(MAX_INDEX_BITS, CTR).unwrap();
        assert_eq!(t.size(), 1 << MAX_INDEX_BITS);
        assert_eq!(std::mem::size_of::<<CounterTable as PredictorTable>::Entry>(), 1);
        let m = CounterMatrix::new(MAX_INDEX_BITS - 4, 4, CTR).unwrap();
        assert_eq!(m.size(), 1 << MAX_INDEX_BITS);
    }
}
