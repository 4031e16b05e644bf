// SPDX-License-Identifier: Apache-2.0

//! Opt-in garbage collection for a `CoverNetwork`.
//!
//! The arena never frees nodes, so after substitutions a network accumulates
//! dead gates. `compact` rebuilds a copy holding only what the outputs depend
//! on, and reports where every surviving node went.

use std::collections::HashMap;

use crate::network::CoverNetwork;
use crate::storage::{CoverRef, NodeRef};
use crate::topo::postorder_from_outputs;

/// Returns a copy of `net` with only the gates reachable from its
/// combinational outputs, and the map from old node ids to new ones.
///
/// Constants and all combinational inputs are kept, in their original order,
/// as are output order and register reset values. Gates that shared a cover
/// slot keep sharing one. Event subscriptions are not carried over.
pub fn compact(net: &CoverNetwork) -> (CoverNetwork, HashMap<NodeRef, NodeRef>) {
    let mut result = CoverNetwork::with_options(net.options);
    let mut old_to_new: HashMap<NodeRef, NodeRef> = HashMap::new();
    for value in [false, true] {
        old_to_new.insert(net.get_constant(value), result.get_constant(value));
    }
    for pi in net.pis() {
        old_to_new.insert(pi, result.create_pi());
    }
    for ro in net.ros() {
        old_to_new.insert(ro, result.create_ro());
    }

    let mut cover_map: HashMap<CoverRef, CoverRef> = HashMap::new();
    for n in postorder_from_outputs(net) {
        if !net.is_function(n) {
            continue;
        }
        let children: Vec<NodeRef> = net
            .fanins(n)
            .map(|child| {
                *old_to_new.get(&child).unwrap_or_else(|| {
                    panic!(
                        "compact: child {:?} of {:?} was not mapped before its parent",
                        child, n
                    )
                })
            })
            .collect();
        let old_cover = net.node_cover_ref(n);
        let new_cover = match cover_map.get(&old_cover) {
            Some(cover) => *cover,
            None => {
                let cover = result.insert_cover(net.cover(old_cover).clone());
                cover_map.insert(old_cover, cover);
                cover
            }
        };
        let new_node = result.get_or_create_node(&children, new_cover);
        old_to_new.insert(n, new_node);
    }

    // Primitive builders on the result must land on the same cover slots the
    // copied gates use.
    for (gate, old_cover) in net.primitive_covers.iter() {
        if let Some(new_cover) = cover_map.get(old_cover) {
            result.primitive_covers.insert(*gate, *new_cover);
        }
    }

    for po in net.pos() {
        result.create_po(old_to_new[&po]);
    }
    for (i, ri) in net.ris().enumerate() {
        result.create_ri(old_to_new[&ri], net.latch_reset(i));
    }

    log::info!(
        "compact; {} nodes -> {} nodes, {} covers -> {} covers",
        net.size(),
        result.size(),
        net.num_covers(),
        result.num_covers()
    );
    result.check_invariants_with_debug_assert();
    (result, old_to_new)
}
