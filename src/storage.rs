// SPDX-License-Identifier: Apache-2.0

//! The arena behind a `CoverNetwork`.
//!
//! Nodes and covers live in append-only vectors and are addressed by index.
//! Nothing is ever removed: a node that becomes unreachable (e.g. after
//! `substitute_node`) keeps its slot, its cover and its identity, so indices
//! held by external data structures stay valid for the life of the network.

use std::cell::Cell;
use std::collections::HashMap;

use crate::cube::Cover;
use crate::strash::StrashTable;

/// Index of a node in the arena.
///
/// Signals carry no complement bit in a cover network, so a signal is just a
/// reference to the node that drives it.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeRef {
    pub id: usize,
}

pub type Signal = NodeRef;

impl From<usize> for NodeRef {
    fn from(id: usize) -> Self {
        NodeRef { id }
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.id)
    }
}

/// Index of a cover in the cover table.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CoverRef {
    pub id: usize,
}

/// Initial (reset) value of a register.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
pub enum ResetValue {
    #[default]
    Zero,
    One,
    DontCare,
    Unknown,
}

impl From<bool> for ResetValue {
    fn from(value: bool) -> Self {
        if value {
            ResetValue::One
        } else {
            ResetValue::Zero
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoverNode {
    pub children: Vec<Signal>,
    pub(crate) fanout: u32,
    pub(crate) value: Cell<u32>,
    pub cover: CoverRef,
    pub(crate) visited: Cell<u32>,
}

impl CoverNode {
    pub(crate) fn new(children: Vec<Signal>, cover: CoverRef) -> Self {
        Self {
            children,
            fanout: 0,
            value: Cell::new(0),
            cover,
            visited: Cell::new(0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoverStorage {
    pub nodes: Vec<CoverNode>,
    pub covers: Vec<Cover>,
    /// Primary inputs first, then register outputs.
    pub inputs: Vec<NodeRef>,
    /// Primary outputs first, then register inputs.
    pub outputs: Vec<Signal>,
    pub num_pis: usize,
    pub num_pos: usize,
    /// Reset values, parallel to the register-input suffix of `outputs`.
    pub latches: Vec<ResetValue>,
    pub(crate) trav_id: Cell<u32>,
    pub(crate) strash: StrashTable,
    /// Position of each combinational input in `inputs`.
    pub(crate) ci_positions: HashMap<NodeRef, usize>,
}

impl CoverStorage {
    /// Appends `cover` to the cover table. Covers are never deduplicated, even
    /// when their contents are identical.
    pub fn insert_cover(&mut self, cover: Cover) -> CoverRef {
        let cover_ref = CoverRef {
            id: self.covers.len(),
        };
        self.covers.push(cover);
        cover_ref
    }

    pub fn node(&self, node: NodeRef) -> &CoverNode {
        assert!(
            node.id < self.nodes.len(),
            "NodeRef out of bounds: {:?} (nodes.len() = {})",
            node,
            self.nodes.len()
        );
        &self.nodes[node.id]
    }

    pub fn node_mut(&mut self, node: NodeRef) -> &mut CoverNode {
        assert!(
            node.id < self.nodes.len(),
            "NodeRef out of bounds: {:?} (nodes.len() = {})",
            node,
            self.nodes.len()
        );
        &mut self.nodes[node.id]
    }

    pub fn cover(&self, cover_ref: CoverRef) -> &Cover {
        assert!(
            cover_ref.id < self.covers.len(),
            "CoverRef out of bounds: {:?} (covers.len() = {})",
            cover_ref,
            self.covers.len()
        );
        &self.covers[cover_ref.id]
    }

    /// Appends a node without consulting or updating the hashing table.
    pub(crate) fn push_node(&mut self, node: CoverNode) -> NodeRef {
        let node_ref = NodeRef {
            id: self.nodes.len(),
        };
        self.nodes.push(node);
        node_ref
    }

    pub(crate) fn bump_fanout(&mut self, node: NodeRef) {
        self.node_mut(node).fanout += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Cube;

    #[test]
    fn test_insert_cover_never_dedups() {
        let mut storage = CoverStorage::default();
        let cover = Cover::on_set(vec![Cube::minterm(0b11, 2)]);
        let first = storage.insert_cover(cover.clone());
        let second = storage.insert_cover(cover.clone());
        assert_ne!(first, second);
        assert_eq!(storage.cover(first), storage.cover(second));
        assert_eq!(storage.covers.len(), 2);
    }

    #[test]
    #[should_panic(expected = "NodeRef out of bounds")]
    fn test_node_out_of_bounds() {
        let storage = CoverStorage::default();
        storage.node(NodeRef { id: 3 });
    }

    #[test]
    fn test_reset_value_from_bool() {
        assert_eq!(ResetValue::from(true), ResetValue::One);
        assert_eq!(ResetValue::from(false), ResetValue::Zero);
        assert_eq!(ResetValue::default(), ResetValue::Zero);
    }
}
