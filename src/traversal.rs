// SPDX-License-Identifier: Apache-2.0

//! Iteration over a network's nodes, inputs, outputs and fanins.
//!
//! Every collection is exposed two ways: a lazy iterator (`nodes()`,
//! `pis()`, ...) that composes with the standard adapters, and a `foreach_*`
//! visitor whose callback gets the item plus its position and may stop early
//! by returning `ControlFlow::Break(())`.

use std::ops::ControlFlow;

use crate::network::CoverNetwork;
use crate::storage::{NodeRef, Signal};

fn visit<T, I, F>(items: I, mut f: F) -> ControlFlow<()>
where
    I: Iterator<Item = T>,
    F: FnMut(T, usize) -> ControlFlow<()>,
{
    for (i, item) in items.enumerate() {
        f(item, i)?;
    }
    ControlFlow::Continue(())
}

impl CoverNetwork {
    /// All nodes in arena order, constants and dead nodes included.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        (0..self.storage.nodes.len()).map(|id| NodeRef { id })
    }

    /// Gates in arena order; constants and combinational inputs are skipped.
    pub fn gates(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes().filter(move |n| self.is_function(*n))
    }

    pub fn cis(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.storage.inputs.iter().copied()
    }

    pub fn pis(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.storage.inputs[..self.storage.num_pis].iter().copied()
    }

    pub fn ros(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.storage.inputs[self.storage.num_pis..].iter().copied()
    }

    pub fn cos(&self) -> impl Iterator<Item = Signal> + '_ {
        self.storage.outputs.iter().copied()
    }

    pub fn pos(&self) -> impl Iterator<Item = Signal> + '_ {
        self.storage.outputs[..self.storage.num_pos].iter().copied()
    }

    pub fn ris(&self) -> impl Iterator<Item = Signal> + '_ {
        self.storage.outputs[self.storage.num_pos..].iter().copied()
    }

    /// `(register input, register output)` pairs in register order. Panics if
    /// the register inputs and outputs are not balanced.
    pub fn registers(&self) -> impl Iterator<Item = (Signal, NodeRef)> + '_ {
        self.num_registers();
        self.ris().zip(self.ros())
    }

    /// Ordered fanins of `n`; nothing for constants and combinational inputs.
    pub fn fanins(&self, n: NodeRef) -> impl Iterator<Item = Signal> + '_ {
        self.children(n).iter().copied()
    }

    pub fn foreach_node<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(NodeRef, usize) -> ControlFlow<()>,
    {
        visit(self.nodes(), f)
    }

    pub fn foreach_gate<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(NodeRef, usize) -> ControlFlow<()>,
    {
        visit(self.gates(), f)
    }

    pub fn foreach_ci<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(NodeRef, usize) -> ControlFlow<()>,
    {
        visit(self.cis(), f)
    }

    pub fn foreach_pi<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(NodeRef, usize) -> ControlFlow<()>,
    {
        visit(self.pis(), f)
    }

    pub fn foreach_ro<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(NodeRef, usize) -> ControlFlow<()>,
    {
        visit(self.ros(), f)
    }

    pub fn foreach_co<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Signal, usize) -> ControlFlow<()>,
    {
        visit(self.cos(), f)
    }

    pub fn foreach_po<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Signal, usize) -> ControlFlow<()>,
    {
        visit(self.pos(), f)
    }

    pub fn foreach_ri<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(Signal, usize) -> ControlFlow<()>,
    {
        visit(self.ris(), f)
    }

    pub fn foreach_register<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut((Signal, NodeRef), usize) -> ControlFlow<()>,
    {
        visit(self.registers(), f)
    }

    pub fn foreach_fanin<F>(&self, n: NodeRef, f: F) -> ControlFlow<()>
    where
        F: FnMut(Signal, usize) -> ControlFlow<()>,
    {
        visit(self.fanins(n), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ResetValue;

    fn sample() -> (CoverNetwork, Vec<NodeRef>) {
        let mut net = CoverNetwork::new();
        let a = net.create_pi();
        let b = net.create_pi();
        let r = net.create_ro();
        let x = net.create_xor(a, b);
        let y = net.create_and(x, r);
        net.create_po(y);
        net.create_po(a);
        net.create_ri(x, ResetValue::Zero);
        (net, vec![a, b, r, x, y])
    }

    #[test]
    fn test_iterators() {
        let (net, ids) = sample();
        let [a, b, r, x, y] = ids[..] else {
            unreachable!()
        };
        assert_eq!(net.nodes().count(), 7);
        assert_eq!(net.gates().collect::<Vec<_>>(), vec![x, y]);
        assert_eq!(net.cis().collect::<Vec<_>>(), vec![a, b, r]);
        assert_eq!(net.pis().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(net.ros().collect::<Vec<_>>(), vec![r]);
        assert_eq!(net.cos().collect::<Vec<_>>(), vec![y, a, x]);
        assert_eq!(net.pos().collect::<Vec<_>>(), vec![y, a]);
        assert_eq!(net.ris().collect::<Vec<_>>(), vec![x]);
        assert_eq!(net.registers().collect::<Vec<_>>(), vec![(x, r)]);
        assert_eq!(net.fanins(y).collect::<Vec<_>>(), vec![x, r]);
        assert_eq!(net.fanins(a).count(), 0);
        assert_eq!(net.fanins(net.get_constant(true)).count(), 0);
    }

    #[test]
    fn test_foreach_indices() {
        let (net, _) = sample();
        let mut seen = Vec::new();
        let flow = net.foreach_ci(|n, i| {
            seen.push((n.id, i));
            ControlFlow::Continue(())
        });
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(seen, vec![(2, 0), (3, 1), (4, 2)]);
    }

    #[test]
    fn test_foreach_early_exit() {
        let (net, _) = sample();
        let mut visited = 0;
        let flow = net.foreach_node(|n, _| {
            visited += 1;
            if net.is_function(n) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        // Two constants, three inputs, then the first gate.
        assert_eq!(visited, 6);
    }

    #[test]
    fn test_foreach_fanin_and_register() {
        let (net, ids) = sample();
        let mut fanins = Vec::new();
        let _ = net.foreach_fanin(ids[4], |s, i| {
            fanins.push((s, i));
            ControlFlow::Continue(())
        });
        assert_eq!(fanins, vec![(ids[3], 0), (ids[2], 1)]);

        let mut registers = Vec::new();
        let _ = net.foreach_register(|pair, i| {
            registers.push((pair, i));
            ControlFlow::Continue(())
        });
        assert_eq!(registers, vec![((ids[3], ids[2]), 0)]);
    }

    #[test]
    #[should_panic(expected = "does not match register input count")]
    fn test_registers_requires_balance() {
        let mut net = CoverNetwork::new();
        net.create_ro();
        let _ = net.registers();
    }
}
