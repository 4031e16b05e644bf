// SPDX-License-Identifier: Apache-2.0

//! Structural hashing ("strash") of cover nodes.
//!
//! Two constructions are the same node iff they have the same ordered child
//! list and the same *cover reference*. The key does not look at
//! cube contents: two covers inserted separately occupy distinct cover-table
//! slots and therefore never collide, even when their cubes are identical.

use std::collections::HashMap;

use crate::storage::{CoverRef, NodeRef, Signal};

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct StrashKey {
    pub children: Vec<Signal>,
    pub cover: CoverRef,
}

impl StrashKey {
    pub fn new(children: &[Signal], cover: CoverRef) -> Self {
        Self {
            children: children.to_vec(),
            cover,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StrashTable {
    key_to_node: HashMap<StrashKey, NodeRef>,
}

impl StrashTable {
    pub fn get(&self, key: &StrashKey) -> Option<NodeRef> {
        self.key_to_node.get(key).copied()
    }

    /// Records `node` as the canonical node for `key`; returns the node
    /// previously registered for it, if any.
    pub fn insert(&mut self, key: StrashKey, node: NodeRef) -> Option<NodeRef> {
        self.key_to_node.insert(key, node)
    }

    pub fn len(&self) -> usize {
        self.key_to_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_node.is_empty()
    }
}
