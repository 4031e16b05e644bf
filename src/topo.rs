// SPDX-License-Identifier: Apache-2.0

//! Topological orders over a `CoverNetwork`.
//!
//! Arena order is not necessarily topological: `substitute_node` may rewire a
//! gate to a replacement with a higher id. Passes that need fanins before
//! fanouts go through a post-order from here instead.

use crate::network::CoverNetwork;
use crate::storage::{NodeRef, Signal};

/// Returns a postorder of every node reachable from `starts` (dedup by node),
/// fanins before the nodes that use them. Constants and combinational inputs
/// are included when reached.
///
/// Marks nodes via the network's traversal id, so it bumps `trav_id`.
pub fn postorder_for_signals(net: &CoverNetwork, starts: &[Signal]) -> Vec<NodeRef> {
    net.incr_trav_id();
    let pass = net.trav_id();
    let mut worklist: Vec<NodeRef> = Vec::new();
    let mut postorder = Vec::new();
    for start in starts.iter().rev() {
        net.validate_ref(*start);
        worklist.push(*start);
    }
    while let Some(current) = worklist.pop() {
        if net.visited(current) == pass {
            continue;
        }
        let mut all_deps_visited = true;
        for dep in net.children(current) {
            if net.visited(*dep) != pass {
                worklist.push(current); // Revisit after dependencies
                worklist.push(*dep);
                all_deps_visited = false;
                break;
            }
        }
        if all_deps_visited {
            net.set_visited(current, pass);
            postorder.push(current);
        }
    }
    log::trace!(
        "postorder_for_signals; {} starts -> {} nodes",
        starts.len(),
        postorder.len()
    );
    postorder
}

/// Postorder of everything that feeds a combinational output.
pub fn postorder_from_outputs(net: &CoverNetwork) -> Vec<NodeRef> {
    let outputs: Vec<Signal> = net.cos().collect();
    postorder_for_signals(net, &outputs)
}

/// Nodes that some combinational output depends on.
pub fn reachable_from_outputs(net: &CoverNetwork) -> Vec<bool> {
    let mut live = vec![false; net.size()];
    for n in postorder_from_outputs(net) {
        live[n.id] = true;
    }
    live
}
