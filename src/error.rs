// SPDX-License-Identifier: Apache-2.0

/// Errors from building cubes and truth tables out of text.
///
/// Everything else in this crate treats bad input as a caller bug and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverError {
    InvalidCubeChar { text: String, c: char },
    CubeTooWide { width: usize },
    InvalidTruthTableChar { text: String, c: char },
    TruthTableLength { len: usize },
    TruthTableTooWide { num_vars: usize },
}

impl std::fmt::Display for CoverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverError::InvalidCubeChar { text, c } => {
                write!(f, "cover error: invalid character {:?} in cube {:?}", c, text)
            }
            CoverError::CubeTooWide { width } => write!(
                f,
                "cover error: cube has {} positions; at most {} are supported",
                width,
                crate::cube::MAX_FANIN
            ),
            CoverError::InvalidTruthTableChar { text, c } => write!(
                f,
                "cover error: invalid character {:?} in truth table {:?}",
                c, text
            ),
            CoverError::TruthTableLength { len } => write!(
                f,
                "cover error: truth table length {} is not a power of two",
                len
            ),
            CoverError::TruthTableTooWide { num_vars } => write!(
                f,
                "cover error: truth table has {} variables; at most {} are supported",
                num_vars,
                crate::truth_table::TruthTable::MAX_VARS
            ),
        }
    }
}

impl std::error::Error for CoverError {}
