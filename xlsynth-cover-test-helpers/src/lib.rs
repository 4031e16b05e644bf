// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for the cover network tests and benchmarks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every assignment to `k` variables, in ascending order of their MSB-first
/// encoding: the first value of each assignment is the most significant bit.
pub fn assignments(k: usize) -> impl Iterator<Item = Vec<bool>> {
    assert!(k < 32, "assignments: {} variables is too many to enumerate", k);
    (0..1u32 << k).map(move |index| (0..k).map(|j| (index >> (k - 1 - j)) & 1 == 1).collect())
}

/// Deterministic pseudo-random bits for reproducible tests.
pub fn random_bits(seed: u64, count: usize) -> Vec<bool> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    (0..count).map(|_| rng.gen::<bool>()).collect()
}

/// Deterministic pseudo-random 64-bit words, e.g. 64 packed patterns per
/// input.
pub fn random_words(seed: u64, count: usize) -> Vec<u64> {
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    (0..count).map(|_| rng.gen::<u64>()).collect()
}

/// `count` distinct indices below `bound`, sorted; for sparse tables too
/// large to fill densely.
pub fn random_sparse_indices(seed: u64, bound: usize, count: usize) -> Vec<usize> {
    assert!(
        count <= bound,
        "random_sparse_indices: cannot pick {} distinct values below {}",
        count,
        bound
    );
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    let mut picked = std::collections::BTreeSet::new();
    while picked.len() < count {
        picked.insert(rng.gen_range(0..bound));
    }
    log::debug!("random_sparse_indices; seed {} picked {:?}", seed, picked);
    picked.into_iter().collect()
}
