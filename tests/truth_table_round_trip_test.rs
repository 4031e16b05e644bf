// SPDX-License-Identifier: Apache-2.0

//! A truth table turned into a cover node simulates back to the same table.

use test_case::test_case;
use xlsynth_cover::{CoverNetwork, Signal, TruthTable};
use xlsynth_cover_test_helpers::{assignments, init_logger, random_bits, random_sparse_indices};

fn check_round_trip(table: &TruthTable) {
    let k = table.num_vars();
    let mut net = CoverNetwork::new();
    let inputs: Vec<Signal> = (0..k).map(|_| net.create_pi()).collect();
    let node = net.create_cover_node_from_truth_table(&inputs, table);
    assert_eq!(net.fanin_size(node), k);
    for (index, values) in assignments(k).enumerate() {
        assert_eq!(
            net.compute(node, &values),
            table.get_bit(index),
            "k={} index={}",
            k,
            index
        );
    }
}

#[test_case(1)]
#[test_case(2)]
#[test_case(3)]
#[test_case(4)]
#[test_case(5)]
#[test_case(6)]
#[test_case(7)]
#[test_case(8)]
#[test_case(9)]
#[test_case(10)]
fn test_dense_random_round_trip(k: usize) {
    init_logger();
    for seed in 0..3u64 {
        let bits = random_bits(seed * 100 + k as u64, 1 << k);
        let table = TruthTable::from_fn(k, |i| bits[i as usize]);
        check_round_trip(&table);
    }
}

#[test_case(11)]
#[test_case(12)]
#[test_case(13)]
#[test_case(14)]
#[test_case(15)]
#[test_case(16)]
fn test_sparse_random_round_trip(k: usize) {
    init_logger();
    let ones = random_sparse_indices(k as u64, 1 << k, 24);
    let mut table = TruthTable::new(k);
    for index in ones.iter() {
        table.set_bit(*index, true);
    }
    check_round_trip(&table);

    // The complement exercises the OFF-set form.
    let complement = TruthTable::from_fn(k, |i| !table.get_bit(i as usize));
    let cover = complement.to_cover();
    assert!(!cover.polarity);
    assert_eq!(cover.len(), ones.len());
    check_round_trip(&complement);
}

#[test]
fn test_constant_tables() {
    init_logger();
    for k in [1, 4, 9] {
        check_round_trip(&TruthTable::new(k));
        check_round_trip(&TruthTable::from_fn(k, |_| true));
    }
}
