// SPDX-License-Identifier: Apache-2.0

//! `CoverNetwork` is a logic network where every node's function is given as
//! a cover (a list of cubes plus an ON/OFF-set polarity) over an arbitrary
//! number of fanins.
//!
//! Node 0 is constant false and node 1 constant true. Combinational inputs
//! (primary inputs, then register outputs) and gates follow in creation order.
//! Construction goes through structural hashing so identical (children,
//! cover-reference) requests yield the same node.
//!
//! Basic example usage:
//! ```
//! use xlsynth_cover::{Cover, CoverNetwork, sim};
//!
//! let mut net = CoverNetwork::new();
//! let a = net.create_pi();
//! let b = net.create_pi();
//! let c = net.create_pi();
//! let nand = Cover::parse(&["11"], false).unwrap();
//! let n1 = net.create_cover_node(&[a, b], nand);
//! let y = net.create_and(n1, c);
//! net.create_po(y);
//! assert_eq!(sim::eval(&net, &[true, true, true]), vec![false]);
//! assert_eq!(sim::eval(&net, &[false, true, true]), vec![true]);
//! ```

use std::collections::HashMap;

use crate::cube::{Cover, Cube, MAX_FANIN};
use crate::events::NetworkEvents;
use crate::gate_builder::PrimitiveGate;
use crate::storage::{CoverNode, CoverRef, CoverStorage, NodeRef, ResetValue, Signal};
use crate::strash::StrashKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverNetworkOptions {
    /// Consult and maintain the structural hashing table on construction.
    pub hash: bool,
    /// Run `check_invariants_with_debug_assert` after every substitution.
    pub check_invariants: bool,
}

impl CoverNetworkOptions {
    /// Returns the default options: structural hashing on.
    pub fn opt() -> Self {
        Self {
            hash: true,
            check_invariants: false,
        }
    }

    /// Every construction appends a fresh node; handy for testing the arena
    /// in isolation from hashing.
    pub fn no_opt() -> Self {
        Self {
            hash: false,
            check_invariants: false,
        }
    }
}

impl Default for CoverNetworkOptions {
    fn default() -> Self {
        Self::opt()
    }
}

#[derive(Debug)]
pub struct CoverNetwork {
    pub(crate) storage: CoverStorage,
    pub(crate) events: NetworkEvents,
    pub options: CoverNetworkOptions,
    /// Cover slot registered for each primitive gate kind, on first use.
    pub(crate) primitive_covers: HashMap<PrimitiveGate, CoverRef>,
}

impl Default for CoverNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverNetwork {
    pub fn new() -> Self {
        Self::with_options(CoverNetworkOptions::opt())
    }

    pub fn with_options(options: CoverNetworkOptions) -> Self {
        let mut net = Self {
            storage: CoverStorage::default(),
            events: NetworkEvents::default(),
            options,
            primitive_covers: HashMap::new(),
        };
        for value in [false, true] {
            let cover = net.storage.insert_cover(Cover::constant(value));
            let node = net.storage.push_node(CoverNode::new(Vec::new(), cover));
            net.storage.strash.insert(StrashKey::new(&[], cover), node);
        }
        net
    }

    pub fn storage(&self) -> &CoverStorage {
        &self.storage
    }

    pub fn events(&self) -> &NetworkEvents {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut NetworkEvents {
        &mut self.events
    }

    // -- Primary I/O and constants

    pub fn get_constant(&self, value: bool) -> Signal {
        NodeRef {
            id: if value { 1 } else { 0 },
        }
    }

    fn create_ci(&mut self) -> NodeRef {
        // Each combinational input gets its own identity cover so that its
        // hashing key is unique.
        let cover = self
            .storage
            .insert_cover(Cover::on_set(vec![Cube::minterm(1, 1)]));
        let node = self.storage.push_node(CoverNode::new(Vec::new(), cover));
        if self.options.hash {
            self.storage.strash.insert(StrashKey::new(&[], cover), node);
        }
        self.storage
            .ci_positions
            .insert(node, self.storage.inputs.len());
        self.storage.inputs.push(node);
        node
    }

    pub fn create_pi(&mut self) -> Signal {
        assert_eq!(
            self.storage.inputs.len(),
            self.storage.num_pis,
            "create_pi: primary inputs must be created before register outputs"
        );
        let node = self.create_ci();
        self.storage.num_pis += 1;
        log::debug!("create_pi; {} is primary input {}", node, self.storage.num_pis - 1);
        node
    }

    /// Adds `f` as a primary output; returns its output index.
    pub fn create_po(&mut self, f: Signal) -> usize {
        self.validate_ref(f);
        assert_eq!(
            self.storage.outputs.len(),
            self.storage.num_pos,
            "create_po: primary outputs must be created before register inputs"
        );
        self.storage.bump_fanout(f);
        let index = self.storage.outputs.len();
        self.storage.outputs.push(f);
        self.storage.num_pos += 1;
        index
    }

    /// Adds a register output, i.e. the current-state value of a latch.
    pub fn create_ro(&mut self) -> Signal {
        let node = self.create_ci();
        log::debug!(
            "create_ro; {} is register output {}",
            node,
            self.storage.inputs.len() - self.storage.num_pis - 1
        );
        node
    }

    /// Adds `f` as the next-state input of the next register; returns its
    /// combinational output index. The register inputs pair up with register
    /// outputs by creation order, so there can never be more of them.
    pub fn create_ri(&mut self, f: Signal, reset: ResetValue) -> usize {
        self.validate_ref(f);
        let num_ros = self.storage.inputs.len() - self.storage.num_pis;
        assert!(
            self.storage.latches.len() < num_ros,
            "create_ri: register input {} has no matching register output ({} register outputs)",
            self.storage.latches.len(),
            num_ros
        );
        self.storage.bump_fanout(f);
        let index = self.storage.outputs.len();
        self.storage.outputs.push(f);
        self.storage.latches.push(reset);
        index
    }

    pub fn latch_reset(&self, index: usize) -> ResetValue {
        assert!(
            index < self.storage.latches.len(),
            "latch index {} out of bounds ({} latches)",
            index,
            self.storage.latches.len()
        );
        self.storage.latches[index]
    }

    pub fn is_combinational(&self) -> bool {
        self.storage.inputs.len() == self.storage.num_pis
            && self.storage.outputs.len() == self.storage.num_pos
    }

    pub fn is_constant(&self, n: NodeRef) -> bool {
        n.id <= 1
    }

    pub fn constant_value(&self, n: NodeRef) -> bool {
        n.id == 1
    }

    pub fn is_ci(&self, n: NodeRef) -> bool {
        self.storage.ci_positions.contains_key(&n)
    }

    pub fn is_pi(&self, n: NodeRef) -> bool {
        self.storage
            .ci_positions
            .get(&n)
            .is_some_and(|&pos| pos < self.storage.num_pis)
    }

    pub fn is_ro(&self, n: NodeRef) -> bool {
        self.storage
            .ci_positions
            .get(&n)
            .is_some_and(|&pos| pos >= self.storage.num_pis)
    }

    /// True for gates: neither a constant nor a combinational input.
    pub fn is_function(&self, n: NodeRef) -> bool {
        n.id > 1 && !self.is_ci(n)
    }

    // -- Structural properties

    /// Number of nodes in the arena, dead ones included.
    pub fn size(&self) -> usize {
        self.storage.nodes.len()
    }

    pub fn num_cis(&self) -> usize {
        self.storage.inputs.len()
    }

    pub fn num_cos(&self) -> usize {
        self.storage.outputs.len()
    }

    pub fn num_pis(&self) -> usize {
        self.storage.num_pis
    }

    pub fn num_pos(&self) -> usize {
        self.storage.num_pos
    }

    pub fn num_latches(&self) -> usize {
        self.storage.latches.len()
    }

    pub fn num_registers(&self) -> usize {
        let num_ros = self.storage.inputs.len() - self.storage.num_pis;
        let num_ris = self.storage.outputs.len() - self.storage.num_pos;
        assert_eq!(
            num_ros, num_ris,
            "register output count {} does not match register input count {}",
            num_ros, num_ris
        );
        num_ros
    }

    pub fn num_gates(&self) -> usize {
        self.storage.nodes.len() - self.storage.inputs.len() - 2
    }

    pub fn num_covers(&self) -> usize {
        self.storage.covers.len()
    }

    pub fn fanin_size(&self, n: NodeRef) -> usize {
        self.storage.node(n).children.len()
    }

    pub fn fanout_size(&self, n: NodeRef) -> u32 {
        self.storage.node(n).fanout
    }

    // -- Functional properties

    pub fn node_cover(&self, n: NodeRef) -> &Cover {
        self.storage.cover(self.storage.node(n).cover)
    }

    pub fn node_cover_ref(&self, n: NodeRef) -> CoverRef {
        self.storage.node(n).cover
    }

    pub fn cover(&self, cover_ref: CoverRef) -> &Cover {
        self.storage.cover(cover_ref)
    }

    /// Ordered fanins of `n`. Empty for constants and combinational inputs.
    pub fn children(&self, n: NodeRef) -> &[Signal] {
        &self.storage.node(n).children
    }

    // -- Nodes and signals

    pub fn get_node(&self, f: Signal) -> NodeRef {
        f
    }

    pub fn make_signal(&self, n: NodeRef) -> Signal {
        n
    }

    /// Signals in a cover network are never complemented.
    pub fn is_complemented(&self, _f: Signal) -> bool {
        false
    }

    pub fn node_to_index(&self, n: NodeRef) -> usize {
        n.id
    }

    pub fn index_to_node(&self, index: usize) -> NodeRef {
        NodeRef { id: index }
    }

    pub fn ci_at(&self, index: usize) -> NodeRef {
        assert!(
            index < self.storage.inputs.len(),
            "ci index {} out of bounds ({} combinational inputs)",
            index,
            self.storage.inputs.len()
        );
        self.storage.inputs[index]
    }

    pub fn co_at(&self, index: usize) -> Signal {
        assert!(
            index < self.storage.outputs.len(),
            "co index {} out of bounds ({} combinational outputs)",
            index,
            self.storage.outputs.len()
        );
        self.storage.outputs[index]
    }

    pub fn pi_at(&self, index: usize) -> NodeRef {
        assert!(
            index < self.storage.num_pis,
            "pi index {} out of bounds ({} primary inputs)",
            index,
            self.storage.num_pis
        );
        self.storage.inputs[index]
    }

    pub fn po_at(&self, index: usize) -> Signal {
        assert!(
            index < self.storage.num_pos,
            "po index {} out of bounds ({} primary outputs)",
            index,
            self.storage.num_pos
        );
        self.storage.outputs[index]
    }

    pub fn ro_at(&self, index: usize) -> NodeRef {
        let num_ros = self.storage.inputs.len() - self.storage.num_pis;
        assert!(
            index < num_ros,
            "ro index {} out of bounds ({} register outputs)",
            index,
            num_ros
        );
        self.storage.inputs[self.storage.num_pis + index]
    }

    pub fn ri_at(&self, index: usize) -> Signal {
        let num_ris = self.storage.outputs.len() - self.storage.num_pos;
        assert!(
            index < num_ris,
            "ri index {} out of bounds ({} register inputs)",
            index,
            num_ris
        );
        self.storage.outputs[self.storage.num_pos + index]
    }

    /// Position of combinational input `n` among all combinational inputs.
    pub fn ci_index(&self, n: NodeRef) -> usize {
        match self.storage.ci_positions.get(&n) {
            Some(&pos) => pos,
            None => panic!("ci_index: {:?} is not a combinational input", n),
        }
    }

    pub fn pi_index(&self, n: NodeRef) -> usize {
        let pos = self.ci_index(n);
        assert!(
            pos < self.storage.num_pis,
            "pi_index: {:?} is not a primary input",
            n
        );
        pos
    }

    pub fn ro_index(&self, n: NodeRef) -> usize {
        let pos = self.ci_index(n);
        assert!(
            pos >= self.storage.num_pis,
            "ro_index: {:?} is not a register output",
            n
        );
        pos - self.storage.num_pis
    }

    /// Index of the first combinational output driven by `s`, if any.
    pub fn co_index(&self, s: Signal) -> Option<usize> {
        self.storage.outputs.iter().position(|&o| o == s)
    }

    pub fn po_index(&self, s: Signal) -> Option<usize> {
        self.storage.outputs[..self.storage.num_pos]
            .iter()
            .position(|&o| o == s)
    }

    pub fn ri_index(&self, s: Signal) -> Option<usize> {
        self.storage.outputs[self.storage.num_pos..]
            .iter()
            .position(|&o| o == s)
    }

    /// Next-state signal of the register whose output is `ro`.
    pub fn ro_to_ri(&self, ro: NodeRef) -> Signal {
        self.ri_at(self.ro_index(ro))
    }

    /// Register output of the first register whose next-state input is `s`.
    pub fn ri_to_ro(&self, s: Signal) -> NodeRef {
        match self.ri_index(s) {
            Some(index) => self.ro_at(index),
            None => panic!("ri_to_ro: {:?} does not drive a register input", s),
        }
    }

    // -- Node creation

    /// Appends `cover` to the cover table. No deduplication takes place: two
    /// insertions of identical covers produce two distinct references, which
    /// hash as distinct keys in `get_or_create_node`.
    pub fn insert_cover(&mut self, cover: Cover) -> CoverRef {
        for cube in cover.cubes.iter() {
            debug_assert_eq!(
                cube.bits & !cube.mask,
                0,
                "insert_cover: cube {:?} has pattern bits outside its mask",
                cube
            );
        }
        self.storage.insert_cover(cover)
    }

    /// Returns the node with exactly these `children` and this `cover`,
    /// creating it if it does not exist yet.
    ///
    /// A new node bumps the fanout of each child once per occurrence and
    /// fires the "added" event. A request with no children returns the
    /// constant matching the cover's polarity.
    pub fn get_or_create_node(&mut self, children: &[Signal], cover: CoverRef) -> Signal {
        let polarity = self.storage.cover(cover).polarity;
        if children.is_empty() {
            return self.get_constant(polarity);
        }
        assert!(
            children.len() <= MAX_FANIN,
            "get_or_create_node: {} children exceeds maximum fanin {}",
            children.len(),
            MAX_FANIN
        );
        for child in children {
            self.validate_ref(*child);
        }

        let key = StrashKey::new(children, cover);
        if self.options.hash {
            if let Some(existing) = self.storage.strash.get(&key) {
                log::debug!(
                    "get_or_create_node; hashing hit for {:?} -> {}",
                    key,
                    existing
                );
                return existing;
            }
        }

        let node = self
            .storage
            .push_node(CoverNode::new(children.to_vec(), cover));
        for child in children {
            self.storage.bump_fanout(*child);
        }
        self.storage.node(node).value.set(0);
        if self.options.hash {
            self.storage.strash.insert(key, node);
        }
        log::debug!(
            "get_or_create_node; created {} with {} children, cover {}",
            node,
            children.len(),
            cover.id
        );
        self.events.notify_add(node);
        node
    }

    // -- Validation

    /// Checks that the given NodeRef is in-bounds for this network.
    pub fn validate_ref(&self, node: NodeRef) {
        let count = self.storage.nodes.len();
        assert!(
            node.id < count,
            "NodeRef out of bounds: {:?} (nodes.len() = {})",
            node,
            count
        );
    }

    /// Checks internal invariants of the network, panicking if any are
    /// violated:
    /// - every node's cover reference and children are in bounds;
    /// - every combinational output is in bounds;
    /// - there is one reset value per register input and no more register
    ///   inputs than register outputs;
    /// - each node's fanout equals its number of uses as a child or output.
    pub fn check_invariants_with_debug_assert(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let node_count = self.storage.nodes.len();
        let mut uses = vec![0u32; node_count];
        for (i, node) in self.storage.nodes.iter().enumerate() {
            assert!(
                node.cover.id < self.storage.covers.len(),
                "Node %{}: cover reference {:?} out of bounds (covers.len() = {})",
                i,
                node.cover,
                self.storage.covers.len()
            );
            for child in node.children.iter() {
                assert!(
                    child.id < node_count,
                    "Node %{}: child {:?} out of bounds (nodes.len() = {})",
                    i,
                    child,
                    node_count
                );
                uses[child.id] += 1;
            }
        }
        for output in self.storage.outputs.iter() {
            assert!(
                output.id < node_count,
                "Output {:?} out of bounds (nodes.len() = {})",
                output,
                node_count
            );
            uses[output.id] += 1;
        }

        let num_ris = self.storage.outputs.len() - self.storage.num_pos;
        let num_ros = self.storage.inputs.len() - self.storage.num_pis;
        assert_eq!(
            num_ris,
            self.storage.latches.len(),
            "register input count does not match latch reset count"
        );
        assert!(
            num_ris <= num_ros,
            "{} register inputs but only {} register outputs",
            num_ris,
            num_ros
        );

        for (i, node) in self.storage.nodes.iter().enumerate() {
            assert_eq!(
                node.fanout, uses[i],
                "Node %{}: fanout {} does not match use count {}",
                i, node.fanout, uses[i]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        let net = CoverNetwork::new();
        assert_eq!(net.get_constant(false), NodeRef { id: 0 });
        assert_eq!(net.get_constant(true), NodeRef { id: 1 });
        assert_eq!(net.size(), 2);
        assert_eq!(net.num_gates(), 0);
        assert!(net.is_constant(NodeRef { id: 0 }));
        assert!(net.is_constant(NodeRef { id: 1 }));
        assert!(!net.constant_value(NodeRef { id: 0 }));
        assert!(net.constant_value(NodeRef { id: 1 }));
        assert_eq!(*net.node_cover(NodeRef { id: 0 }), Cover::constant(false));
        assert_eq!(*net.node_cover(NodeRef { id: 1 }), Cover::constant(true));
        net.check_invariants_with_debug_assert();
    }

    #[test]
    fn test_primary_io() {
        let mut net = CoverNetwork::new();
        let a = net.create_pi();
        let b = net.create_pi();
        assert_eq!(a, NodeRef { id: 2 });
        assert_eq!(b, NodeRef { id: 3 });
        assert!(net.is_pi(a) && net.is_ci(a) && !net.is_ro(a));
        assert!(!net.is_function(a));
        assert_eq!(net.pi_index(b), 1);
        assert_eq!(net.pi_at(0), a);

        let y = net.create_and(a, b);
        assert!(net.is_function(y));
        assert_eq!(net.create_po(y), 0);
        assert_eq!(net.create_po(a), 1);
        assert_eq!(net.po_at(1), a);
        assert_eq!(net.po_index(y), Some(0));
        assert_eq!(net.co_index(b), None);
        assert_eq!(net.fanout_size(a), 2);
        assert_eq!(net.fanout_size(y), 1);
        assert!(net.is_combinational());
        assert_eq!(net.num_registers(), 0);
        assert_eq!(net.num_gates(), 1);
        net.check_invariants_with_debug_assert();
    }

    #[test]
    fn test_registers() {
        let mut net = CoverNetwork::new();
        let a = net.create_pi();
        let r0 = net.create_ro();
        let r1 = net.create_ro();
        let next0 = net.create_xor(a, r0);
        net.create_po(r1);
        assert_eq!(net.create_ri(next0, ResetValue::One), 1);
        assert_eq!(net.create_ri(r0, ResetValue::DontCare), 2);

        assert!(!net.is_combinational());
        assert_eq!(net.num_registers(), 2);
        assert_eq!(net.num_cis() - net.num_pis(), 2);
        assert_eq!(net.num_cos() - net.num_pos(), 2);
        assert_eq!(net.num_latches(), 2);
        assert_eq!(net.latch_reset(0), ResetValue::One);
        assert_eq!(net.latch_reset(1), ResetValue::DontCare);

        assert!(net.is_ro(r1) && !net.is_pi(r1));
        assert_eq!(net.ro_index(r1), 1);
        assert_eq!(net.ci_index(r1), 2);
        assert_eq!(net.ro_at(0), r0);
        assert_eq!(net.ri_at(0), next0);
        assert_eq!(net.ro_to_ri(r0), next0);
        assert_eq!(net.ro_to_ri(r1), r0);
        assert_eq!(net.ri_to_ro(next0), r0);
        assert_eq!(net.ri_index(r0), Some(1));
        net.check_invariants_with_debug_assert();
    }

    #[test]
    #[should_panic(expected = "has no matching register output")]
    fn test_ri_without_ro_is_rejected() {
        let mut net = CoverNetwork::new();
        let a = net.create_pi();
        net.create_ri(a, ResetValue::Zero);
    }

    #[test]
    #[should_panic(expected = "does not match register input count")]
    fn test_num_registers_mismatch_is_rejected() {
        let mut net = CoverNetwork::new();
        net.create_pi();
        net.create_ro();
        net.num_registers();
    }

    #[test]
    #[should_panic(expected = "primary inputs must be created before register outputs")]
    fn test_pi_after_ro_is_rejected() {
        let mut net = CoverNetwork::new();
        net.create_ro();
        net.create_pi();
    }

    #[test]
    #[should_panic(expected = "pi index 1 out of bounds")]
    fn test_pi_at_out_of_bounds() {
        let mut net = CoverNetwork::new();
        net.create_pi();
        net.pi_at(1);
    }

    #[test]
    fn test_get_or_create_node_dedups_by_cover_ref() {
        let mut net = CoverNetwork::new();
        let a = net.create_pi();
        let b = net.create_pi();
        let cover = Cover::parse(&["11"], true).unwrap();
        let first_ref = net.insert_cover(cover.clone());
        let second_ref = net.insert_cover(cover);
        assert_ne!(first_ref, second_ref);

        let n1 = net.get_or_create_node(&[a, b], first_ref);
        let n2 = net.get_or_create_node(&[a, b], first_ref);
        let n3 = net.get_or_create_node(&[a, b], second_ref);
        assert_eq!(n1, n2);
        assert_ne!(n1, n3);
        assert_eq!(net.fanout_size(a), 2);
        net.check_invariants_with_debug_assert();
    }

    #[test]
    fn test_no_opt_never_dedups() {
        let mut net = CoverNetwork::with_options(CoverNetworkOptions::no_opt());
        let a = net.create_pi();
        let b = net.create_pi();
        let n1 = net.create_and(a, b);
        let n2 = net.create_and(a, b);
        assert_ne!(n1, n2);
        assert_eq!(net.num_gates(), 2);
        net.check_invariants_with_debug_assert();
    }

    #[test]
    fn test_get_or_create_node_without_children_is_constant() {
        let mut net = CoverNetwork::new();
        let on = net.insert_cover(Cover::on_set(vec![]));
        let off = net.insert_cover(Cover::off_set(vec![]));
        assert_eq!(net.get_or_create_node(&[], on), net.get_constant(true));
        assert_eq!(net.get_or_create_node(&[], off), net.get_constant(false));
        assert_eq!(net.size(), 2);
    }
}
