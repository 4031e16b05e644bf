// SPDX-License-Identifier: Apache-2.0

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use xlsynth_cover::{CoverNetwork, Signal, TruthTable, sim};
use xlsynth_cover_test_helpers::{random_bits, random_words};

/// Builds a ripple-carry adder of `width` bits out of XOR3/MAJ gates, plus one
/// random 6-input cover node per output bit to exercise wide covers.
fn build_adder(width: usize) -> CoverNetwork {
    let mut net = CoverNetwork::new();
    let a: Vec<Signal> = (0..width).map(|_| net.create_pi()).collect();
    let b: Vec<Signal> = (0..width).map(|_| net.create_pi()).collect();
    let mut carry = net.get_constant(false);
    let mut sums = Vec::with_capacity(width);
    for i in 0..width {
        sums.push(net.create_xor3(a[i], b[i], carry));
        carry = net.create_maj(a[i], b[i], carry);
    }
    let bits = random_bits(0xc0ffee, 64);
    let table = TruthTable::from_fn(6, |i| bits[i as usize]);
    for i in 0..width {
        let children = [
            sums[i],
            a[i],
            b[i],
            sums[(i + 1) % width],
            a[(i + 2) % width],
            carry,
        ];
        let mixed = net.create_cover_node_from_truth_table(&children, &table);
        net.create_po(mixed);
    }
    net
}

fn sim_benchmark(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("cover_sim");
    for width in [8usize, 32] {
        let net = build_adder(width);
        let single_inputs = random_bits(width as u64, net.num_cis());
        let word_inputs = random_words(width as u64, net.num_cis());

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("eval", width), &width, |b, _| {
            b.iter(|| black_box(sim::eval(&net, black_box(&single_inputs))));
        });
        group.throughput(Throughput::Elements(64));
        group.bench_with_input(BenchmarkId::new("eval_words", width), &width, |b, _| {
            b.iter(|| black_box(sim::eval_words(&net, black_box(&word_inputs))));
        });
    }
    group.finish();
}

criterion_group!(benches, sim_benchmark);
criterion_main!(benches);
