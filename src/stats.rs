// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use serde::Serialize;

use crate::network::CoverNetwork;
use crate::storage::NodeRef;
use crate::topo::postorder_from_outputs;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SummaryStats {
    /// Arena size, dead nodes included.
    pub nodes: usize,
    pub gates: usize,
    /// Gates some combinational output depends on.
    pub live_gates: usize,
    /// Cubes summed over the covers of live gates.
    pub total_cubes: usize,
    pub max_fanin: usize,
    /// Number of gates on the longest input-to-output path.
    pub deepest_path: usize,
}

/// Returns the gate depth of every node reachable from the outputs, keyed by
/// node; constants and combinational inputs are at depth 0.
pub fn get_gate_depth(net: &CoverNetwork) -> HashMap<NodeRef, usize> {
    let mut depths: HashMap<NodeRef, usize> = HashMap::new();
    for n in postorder_from_outputs(net) {
        let depth = if net.is_function(n) {
            1 + net.fanins(n).map(|f| depths[&f]).max().unwrap_or(0)
        } else {
            0
        };
        depths.insert(n, depth);
    }
    depths
}

pub fn get_summary_stats(net: &CoverNetwork) -> SummaryStats {
    let depths = get_gate_depth(net);
    let mut live_gates = 0;
    let mut total_cubes = 0;
    let mut max_fanin = 0;
    for n in depths.keys() {
        if !net.is_function(*n) {
            continue;
        }
        live_gates += 1;
        total_cubes += net.node_cover(*n).len();
        max_fanin = max_fanin.max(net.fanin_size(*n));
    }
    let deepest_path = net.cos().map(|o| depths[&o]).max().unwrap_or(0);
    log::info!(
        "get_summary_stats; {} live gates of {}, deepest path {}",
        live_gates,
        net.num_gates(),
        deepest_path
    );
    SummaryStats {
        nodes: net.size(),
        gates: net.num_gates(),
        live_gates,
        total_cubes,
        max_fanin,
        deepest_path,
    }
}

/// Histogram `{fanout: number of nodes}` over combinational inputs and gates.
/// Constants are left out.
pub fn fanout_histogram(net: &CoverNetwork) -> HashMap<u32, usize> {
    let mut histogram: HashMap<u32, usize> = HashMap::new();
    for n in net.nodes().filter(|n| !net.is_constant(*n)) {
        *histogram.entry(net.fanout_size(n)).or_insert(0) += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_stats() {
        let mut net = CoverNetwork::new();
        let a = net.create_pi();
        let b = net.create_pi();
        let c = net.create_pi();
        let x = net.create_xor(a, b);
        let y = net.create_ite(x, b, c);
        let _dead = net.create_maj(a, b, c);
        net.create_po(y);
        net.create_po(a);

        let stats = get_summary_stats(&net);
        assert_eq!(
            stats,
            SummaryStats {
                nodes: 8,
                gates: 3,
                live_gates: 2,
                // XOR has two cubes, ITE two.
                total_cubes: 4,
                max_fanin: 3,
                deepest_path: 2,
            }
        );
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["live_gates"], 2);
        assert_eq!(json["deepest_path"], 2);
    }

    #[test]
    fn test_summary_stats_empty() {
        let net = CoverNetwork::new();
        let stats = get_summary_stats(&net);
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.live_gates, 0);
        assert_eq!(stats.deepest_path, 0);
    }

    #[test]
    fn test_fanout_histogram() {
        let mut net = CoverNetwork::new();
        let a = net.create_pi();
        let b = net.create_pi();
        let x = net.create_and(a, b);
        let y = net.create_or(a, x);
        net.create_po(y);
        let hist = fanout_histogram(&net);
        // a: 2, b: 1, x: 1, y: 1 (the output).
        let mut want = HashMap::new();
        want.insert(2, 1);
        want.insert(1, 3);
        assert_eq!(hist, want);
    }
}
