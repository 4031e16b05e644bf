// SPDX-License-Identifier: Apache-2.0

//! Simulation of cover nodes and whole networks.
//!
//! Node-level evaluation folds the fanin values into a pattern with the first
//! fanin as the most significant bit (`index = index * 2 + bit`) and evaluates
//! the node's cover on it. The vectorized and word-parallel modes apply the
//! same rule independently at every bit position.

use bitvec::vec::BitVec;

use crate::cube::{Cube, MAX_FANIN, mask_for_width};
use crate::network::CoverNetwork;
use crate::storage::NodeRef;
use crate::topo::postorder_from_outputs;

/// Folds `values` MSB-first into a cube pattern.
fn fold_pattern(values: impl Iterator<Item = bool>) -> u32 {
    let mut index = 0u32;
    for value in values {
        index = (index << 1) | u32::from(value);
    }
    index
}

/// Lanes of `values` on which `cube` matches; `values[j]` is the word of
/// fanin `j`.
fn cube_match_lanes(cube: &Cube, values: &[u64]) -> u64 {
    let width = values.len();
    // Positions above the fanin width read as 0 in the folded pattern.
    if cube.bits & cube.mask & !mask_for_width(width) != 0 {
        return 0;
    }
    let mut lanes = u64::MAX;
    for (j, word) in values.iter().enumerate() {
        let position = 1u32 << (width - 1 - j);
        if cube.mask & position == 0 {
            continue;
        }
        lanes &= if cube.bits & position != 0 { *word } else { !*word };
    }
    lanes
}

impl CoverNetwork {
    /// Evaluates the cover of `n` on one assignment of its fanins.
    pub fn compute(&self, n: NodeRef, values: &[bool]) -> bool {
        assert!(
            values.len() <= MAX_FANIN,
            "compute: {} values exceeds maximum fanin {}",
            values.len(),
            MAX_FANIN
        );
        debug_assert!(
            !self.is_function(n) || values.len() == self.fanin_size(n),
            "compute: {:?} has {} fanins but got {} values",
            n,
            self.fanin_size(n),
            values.len()
        );
        let pattern = fold_pattern(values.iter().copied());
        self.node_cover(n).evaluate(pattern)
    }

    /// Evaluates `n` bit-wise over equal-width vectors, one per fanin. Bit `p`
    /// of the result is `compute` on bit `p` of every fanin vector.
    pub fn compute_vectors(&self, n: NodeRef, values: &[BitVec]) -> BitVec {
        let fanin = self.fanin_size(n);
        assert!(fanin != 0, "compute_vectors: {:?} has no fanins", n);
        assert_eq!(
            values.len(),
            fanin,
            "compute_vectors: {:?} has {} fanins but got {} vectors",
            n,
            fanin,
            values.len()
        );
        let width = values[0].len();
        for (j, value) in values.iter().enumerate() {
            assert_eq!(
                value.len(),
                width,
                "compute_vectors: fanin {} vector has width {}, expected {}",
                j,
                value.len(),
                width
            );
        }

        let cover = self.node_cover(n);
        let mut result = BitVec::repeat(false, width);
        for p in 0..width {
            let pattern = fold_pattern(values.iter().map(|v| v[p]));
            result.set(p, cover.evaluate(pattern));
        }
        result
    }

    /// 64-lane form of `compute_vectors`: lane `p` of `values[j]` is fanin
    /// `j`'s value in pattern `p`.
    pub fn compute_words(&self, n: NodeRef, values: &[u64]) -> u64 {
        let fanin = self.fanin_size(n);
        assert_eq!(
            values.len(),
            fanin,
            "compute_words: {:?} has {} fanins but got {} words",
            n,
            fanin,
            values.len()
        );
        let cover = self.node_cover(n);
        let mut matched = 0u64;
        for cube in cover.cubes.iter() {
            matched |= cube_match_lanes(cube, values);
            if matched == u64::MAX {
                break;
            }
        }
        if cover.polarity { matched } else { !matched }
    }
}

/// Evaluates every combinational output (POs, then RIs) given one value per
/// combinational input (PIs, then ROs).
pub fn eval(net: &CoverNetwork, ci_values: &[bool]) -> Vec<bool> {
    assert_eq!(
        ci_values.len(),
        net.num_cis(),
        "eval: got {} input values for {} combinational inputs",
        ci_values.len(),
        net.num_cis()
    );
    let mut env = vec![false; net.size()];
    let mut fanin_values: Vec<bool> = Vec::new();
    for n in postorder_from_outputs(net) {
        env[n.id] = if net.is_constant(n) {
            net.constant_value(n)
        } else if net.is_ci(n) {
            ci_values[net.ci_index(n)]
        } else {
            fanin_values.clear();
            fanin_values.extend(net.fanins(n).map(|f| env[f.id]));
            net.compute(n, &fanin_values)
        };
    }
    net.cos().map(|o| env[o.id]).collect()
}

/// Word-parallel `eval`: each input word carries 64 independent patterns and
/// each output word holds the corresponding 64 results.
pub fn eval_words(net: &CoverNetwork, ci_words: &[u64]) -> Vec<u64> {
    assert_eq!(
        ci_words.len(),
        net.num_cis(),
        "eval_words: got {} input words for {} combinational inputs",
        ci_words.len(),
        net.num_cis()
    );
    let mut env = vec![0u64; net.size()];
    let mut fanin_words: Vec<u64> = Vec::new();
    for n in postorder_from_outputs(net) {
        env[n.id] = if net.is_constant(n) {
            if net.constant_value(n) { u64::MAX } else { 0 }
        } else if net.is_ci(n) {
            ci_words[net.ci_index(n)]
        } else {
            fanin_words.clear();
            fanin_words.extend(net.fanins(n).map(|f| env[f.id]));
            net.compute_words(n, &fanin_words)
        };
    }
    net.cos().map(|o| env[o.id]).collect()
}
