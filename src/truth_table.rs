// SPDX-License-Identifier: Apache-2.0

//! Dense truth tables, used as an alternate way to specify a cover node.
//!
//! Bit `i` of a table over `k` variables holds the function value for the
//! assignment whose MSB-first encoding is `i`; variable 0 (the first fanin of
//! the node the table is attached to) is the most significant bit. This is the
//! same encoding `CoverNetwork::compute` uses to fold input values into a
//! pattern, so a table round-trips through a cover node unchanged.

use bitvec::vec::BitVec;

use crate::cube::{Cover, Cube};
use crate::error::CoverError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    num_vars: usize,
    bits: BitVec,
}

impl TruthTable {
    /// Largest table we are willing to materialize.
    pub const MAX_VARS: usize = 16;

    /// Returns the all-zeros table over `num_vars` variables.
    pub fn new(num_vars: usize) -> Self {
        assert!(
            num_vars <= Self::MAX_VARS,
            "truth table over {} variables exceeds maximum of {}",
            num_vars,
            Self::MAX_VARS
        );
        Self {
            num_vars,
            bits: BitVec::repeat(false, 1 << num_vars),
        }
    }

    /// Builds a table by evaluating `f` on every minterm index.
    pub fn from_fn<F>(num_vars: usize, mut f: F) -> Self
    where
        F: FnMut(u32) -> bool,
    {
        let mut table = Self::new(num_vars);
        for i in 0..table.num_bits() {
            table.bits.set(i, f(i as u32));
        }
        table
    }

    /// Parses a table written most significant minterm first, the way truth
    /// tables are usually printed; e.g. AND over two variables is `"1000"`.
    pub fn from_binary_str(text: &str) -> Result<Self, CoverError> {
        let len = text.chars().count();
        if len == 0 || !len.is_power_of_two() {
            return Err(CoverError::TruthTableLength { len });
        }
        let num_vars = len.trailing_zeros() as usize;
        if num_vars > Self::MAX_VARS {
            return Err(CoverError::TruthTableTooWide { num_vars });
        }
        let mut table = Self::new(num_vars);
        for (i, c) in text.chars().enumerate() {
            let value = match c {
                '0' => false,
                '1' => true,
                other => {
                    return Err(CoverError::InvalidTruthTableChar {
                        text: text.to_string(),
                        c: other,
                    });
                }
            };
            table.bits.set(len - i - 1, value);
        }
        Ok(table)
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn num_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn get_bit(&self, index: usize) -> bool {
        assert!(
            index < self.num_bits(),
            "truth table index {} out of bounds for {} bits",
            index,
            self.num_bits()
        );
        self.bits[index]
    }

    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(
            index < self.num_bits(),
            "truth table index {} out of bounds for {} bits",
            index,
            self.num_bits()
        );
        self.bits.set(index, value);
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn count_zeros(&self) -> usize {
        self.bits.count_zeros()
    }

    pub fn is_const0(&self) -> bool {
        self.bits.not_any()
    }

    /// Converts the table into a cover of fully specified cubes.
    ///
    /// The ON-set is listed iff it is no larger than the OFF-set (ties favor
    /// the ON-set). Cubes are emitted in ascending minterm order and never
    /// merged.
    pub fn to_cover(&self) -> Cover {
        let polarity = self.count_ones() <= self.count_zeros();
        let cubes = self
            .bits
            .iter()
            .by_vals()
            .enumerate()
            .filter(|(_, value)| *value == polarity)
            .map(|(i, _)| Cube::minterm(i as u32, self.num_vars))
            .collect();
        Cover::new(cubes, polarity)
    }

    /// Renders the table most significant minterm first; inverse of
    /// `from_binary_str`.
    pub fn to_binary_string(&self) -> String {
        (0..self.num_bits())
            .rev()
            .map(|i| if self.bits[i] { '1' } else { '0' })
            .collect()
    }
}
