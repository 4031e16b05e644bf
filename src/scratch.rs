// SPDX-License-Identifier: Apache-2.0

//! Per-node scratch fields for algorithms running over a network.
//!
//! Each node carries a general-purpose `value` counter and a `visited` mark.
//! Neither is part of the network's function, so both can be updated through a
//! shared borrow while other code is reading the network.
//!
//! The usual marking idiom is to bump the traversal id once per pass and then
//! compare `visited(n) == trav_id()` instead of clearing every mark.

use crate::network::CoverNetwork;
use crate::storage::NodeRef;

impl CoverNetwork {
    pub fn clear_values(&self) {
        for node in self.storage.nodes.iter() {
            node.value.set(0);
        }
    }

    pub fn value(&self, n: NodeRef) -> u32 {
        self.storage.node(n).value.get()
    }

    pub fn set_value(&self, n: NodeRef, value: u32) {
        self.storage.node(n).value.set(value);
    }

    /// Increments the value of `n` and returns the value it had before.
    pub fn incr_value(&self, n: NodeRef) -> u32 {
        let cell = &self.storage.node(n).value;
        let old = cell.get();
        cell.set(old.wrapping_add(1));
        old
    }

    /// Decrements the value of `n` and returns the new value.
    pub fn decr_value(&self, n: NodeRef) -> u32 {
        let cell = &self.storage.node(n).value;
        let new = cell.get().wrapping_sub(1);
        cell.set(new);
        new
    }

    pub fn clear_visited(&self) {
        for node in self.storage.nodes.iter() {
            node.visited.set(0);
        }
    }

    pub fn visited(&self, n: NodeRef) -> u32 {
        self.storage.node(n).visited.get()
    }

    pub fn set_visited(&self, n: NodeRef, visited: u32) {
        self.storage.node(n).visited.set(visited);
    }

    pub fn trav_id(&self) -> u32 {
        self.storage.trav_id.get()
    }

    pub fn incr_trav_id(&self) {
        self.storage.trav_id.set(self.storage.trav_id.get() + 1);
    }
}
