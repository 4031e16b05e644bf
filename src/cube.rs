// SPDX-License-Identifier: Apache-2.0

//! Cubes and covers: the two-level representation of a node's function.
//!
//! A `Cube` is a partial assignment over at most `MAX_FANIN` inputs, encoded
//! as a bit pattern plus a care mask. A `Cover` is a list of cubes together
//! with a polarity that says whether the list enumerates the ON-set or the
//! OFF-set of the function.
//!
//! Bit positions are ordered so that the *first* input of a node is the most
//! significant bit of the pattern; i.e. for a 3-input node the cube string
//! `"1-0"` cares about input 0 (bit 2, must be 1) and input 2 (bit 0, must be
//! 0).

use std::fmt;

use crate::error::CoverError;

/// Maximum number of fanins a cover node (and thus a cube) can have.
pub const MAX_FANIN: usize = 32;

/// Returns a mask with the low `width` bits set.
pub fn mask_for_width(width: usize) -> u32 {
    assert!(
        width <= MAX_FANIN,
        "mask width {} exceeds maximum fanin {}",
        width,
        MAX_FANIN
    );
    if width == MAX_FANIN {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
pub struct Cube {
    pub bits: u32,
    pub mask: u32,
}

impl Cube {
    pub fn new(bits: u32, mask: u32) -> Self {
        Self {
            bits: bits & mask,
            mask,
        }
    }

    /// The cube that cares about nothing and so matches every assignment.
    pub fn wildcard() -> Self {
        Self { bits: 0, mask: 0 }
    }

    /// A fully specified cube over `width` inputs, i.e. a single minterm.
    pub fn minterm(pattern: u32, width: usize) -> Self {
        Self::new(pattern, mask_for_width(width))
    }

    /// Parses a cube from its textual form, one character per input, first
    /// input first: `'1'`, `'0'` or `'-'` (don't care).
    pub fn parse(text: &str) -> Result<Self, CoverError> {
        let width = text.chars().count();
        if width > MAX_FANIN {
            return Err(CoverError::CubeTooWide { width });
        }
        let mut bits = 0u32;
        let mut mask = 0u32;
        for (i, c) in text.chars().enumerate() {
            let position = width - i - 1;
            match c {
                '1' => {
                    bits |= 1 << position;
                    mask |= 1 << position;
                }
                '0' => {
                    mask |= 1 << position;
                }
                '-' => {}
                other => {
                    return Err(CoverError::InvalidCubeChar {
                        text: text.to_string(),
                        c: other,
                    });
                }
            }
        }
        Ok(Self { bits, mask })
    }

    /// Returns true iff this cube agrees with `pattern` on all of its care
    /// bits.
    #[inline]
    pub fn matches(&self, pattern: u32) -> bool {
        (pattern & self.mask) == (self.bits & self.mask)
    }

    pub fn num_literals(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Renders the cube over `width` inputs, first input first.
    pub fn to_string_with_width(&self, width: usize) -> String {
        assert!(
            width <= MAX_FANIN,
            "cube width {} exceeds maximum fanin {}",
            width,
            MAX_FANIN
        );
        (0..width)
            .rev()
            .map(|position| {
                let bit = 1u32 << position;
                if self.mask & bit == 0 {
                    '-'
                } else if self.bits & bit != 0 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }
}

/// A list of cubes plus a polarity.
///
/// With `polarity == true` the cubes enumerate the ON-set, otherwise the
/// OFF-set. An assignment no cube matches takes the complementary value, so
/// evaluation is total.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Cover {
    pub cubes: Vec<Cube>,
    pub polarity: bool,
}

impl Cover {
    pub fn new(cubes: Vec<Cube>, polarity: bool) -> Self {
        Self { cubes, polarity }
    }

    pub fn on_set(cubes: Vec<Cube>) -> Self {
        Self::new(cubes, true)
    }

    pub fn off_set(cubes: Vec<Cube>) -> Self {
        Self::new(cubes, false)
    }

    /// The cover of a constant: a single wildcard cube, so the cover always
    /// evaluates to `value`.
    pub fn constant(value: bool) -> Self {
        Self::new(vec![Cube::wildcard()], value)
    }

    /// Builds a cover from textual cubes, e.g. `Cover::parse(&["11-", "0-1"],
    /// true)`.
    pub fn parse(cubes: &[&str], polarity: bool) -> Result<Self, CoverError> {
        let cubes = cubes
            .iter()
            .map(|text| Cube::parse(text))
            .collect::<Result<Vec<Cube>, CoverError>>()?;
        Ok(Self::new(cubes, polarity))
    }

    pub fn is_on_set(&self) -> bool {
        self.polarity
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Renders the cover with every cube over `width` positions, e.g.
    /// `on[11- 0-1]`.
    pub fn to_string_with_width(&self, width: usize) -> String {
        let cubes = self
            .cubes
            .iter()
            .map(|cube| cube.to_string_with_width(width))
            .collect::<Vec<String>>()
            .join(" ");
        format!("{}[{}]", if self.polarity { "on" } else { "off" }, cubes)
    }

    /// Evaluates the cover on `pattern`: the polarity if any cube matches,
    /// otherwise its complement.
    pub fn evaluate(&self, pattern: u32) -> bool {
        for (i, cube) in self.cubes.iter().enumerate() {
            if cube.matches(pattern) {
                log::trace!(
                    "Cover::evaluate; pattern {:#b} matched cube {} ({:?})",
                    pattern,
                    i,
                    cube
                );
                return self.polarity;
            }
        }
        !self.polarity
    }
}

/// A cover does not know its own width, so `Display` renders up to the
/// highest care position of any cube. Leading don't-care positions are lost:
/// `on[-1]` prints as `on[1]`. Use `to_string_with_width` (as the network
/// dump does, with the node's fanin count) for an exact rendering.
impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cubes
            .iter()
            .map(|cube| (u32::BITS - cube.mask.leading_zeros()) as usize)
            .max()
            .unwrap_or(0);
        write!(f, "{}", self.to_string_with_width(width))
    }
}
