// SPDX-License-Identifier: Apache-2.0

use crate::network::CoverNetwork;
use crate::storage::{NodeRef, Signal};

impl CoverNetwork {
    /// Returns true iff `old` is in the transitive fanin of `node` (or is
    /// `node` itself).
    pub fn depends_on(&self, node: NodeRef, old: NodeRef) -> bool {
        let mut seen = vec![false; self.storage.nodes.len()];
        let mut worklist = vec![node];
        while let Some(current) = worklist.pop() {
            if current == old {
                return true;
            }
            if std::mem::replace(&mut seen[current.id], true) {
                continue;
            }
            worklist.extend(self.children(current).iter().copied());
        }
        false
    }

    /// Redirects every use of `old` (as a child or as a combinational output)
    /// to `new`.
    ///
    /// Each rewritten parent fires one "modified" event carrying its children
    /// as they were before the rewrite. `new` gains one fanout per redirected
    /// reference and `old` ends with a fanout of zero. `old` itself stays in
    /// the arena and in the hashing table.
    ///
    /// Parents are *not* re-keyed in the hashing table: a later request for
    /// `(children-with-old, cover)` still returns the rewritten parent. Passes
    /// that rely on hashing after substitution should build fresh nodes
    /// instead.
    ///
    /// `new` must not depend on `old`, otherwise the rewrite closes a cycle.
    pub fn substitute_node(&mut self, old: NodeRef, new: Signal) {
        self.validate_ref(old);
        self.validate_ref(new);
        assert_ne!(
            old, new,
            "substitute_node: cannot substitute {:?} by itself",
            old
        );
        assert!(
            !self.depends_on(new, old),
            "substitute_node: {:?} depends on {:?}; substitution would create a cycle",
            new,
            old
        );

        let mut rewritten_parents = 0usize;
        let mut rewritten_refs = 0u32;
        for i in 0..self.storage.nodes.len() {
            let node = &mut self.storage.nodes[i];
            if !node.children.contains(&old) {
                continue;
            }
            let snapshot: Vec<Signal> = node.children.clone();
            let mut count = 0u32;
            for child in node.children.iter_mut() {
                if *child == old {
                    *child = new;
                    count += 1;
                }
            }
            self.storage.node_mut(new).fanout += count;
            rewritten_parents += 1;
            rewritten_refs += count;
            self.events.notify_modified(NodeRef { id: i }, &snapshot);
        }

        let mut rewritten_outputs = 0u32;
        for output in self.storage.outputs.iter_mut() {
            if *output == old {
                *output = new;
                rewritten_outputs += 1;
            }
        }
        self.storage.node_mut(new).fanout += rewritten_outputs;
        self.storage.node_mut(old).fanout = 0;

        log::info!(
            "substitute_node; {} -> {}: {} parents ({} references), {} outputs",
            old,
            new,
            rewritten_parents,
            rewritten_refs,
            rewritten_outputs
        );
        if self.options.check_invariants {
            self.check_invariants_with_debug_assert();
        }
    }
}
