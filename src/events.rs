// SPDX-License-Identifier: Apache-2.0

//! Observer registry for network mutations.
//!
//! Optimization passes subscribe here to maintain derived indexes
//! incrementally. Listeners run synchronously, in registration order, inside
//! the mutation that triggers them.

use crate::storage::{NodeRef, Signal};

pub type AddListener = Box<dyn FnMut(NodeRef)>;
pub type ModifiedListener = Box<dyn FnMut(NodeRef, &[Signal])>;

/// Handle returned by the `subscribe_*` methods; pass it to `unsubscribe` to
/// remove the listener.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct NetworkEvents {
    next_id: u64,
    on_add: Vec<(SubscriptionId, AddListener)>,
    on_modified: Vec<(SubscriptionId, ModifiedListener)>,
}

impl NetworkEvents {
    fn fresh_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers `f` to be called with the id of every newly created node.
    pub fn subscribe_add<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(NodeRef) + 'static,
    {
        let id = self.fresh_id();
        self.on_add.push((id, Box::new(f)));
        id
    }

    /// Registers `f` to be called with `(node, children before the change)`
    /// whenever a node's fanins are rewritten.
    pub fn subscribe_modified<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(NodeRef, &[Signal]) + 'static,
    {
        let id = self.fresh_id();
        self.on_modified.push((id, Box::new(f)));
        id
    }

    /// Removes the listener registered under `id`. Returns whether one was
    /// found.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.on_add.len() + self.on_modified.len();
        self.on_add.retain(|(sub, _)| *sub != id);
        self.on_modified.retain(|(sub, _)| *sub != id);
        before != self.on_add.len() + self.on_modified.len()
    }

    pub fn num_listeners(&self) -> usize {
        self.on_add.len() + self.on_modified.len()
    }

    pub(crate) fn notify_add(&mut self, node: NodeRef) {
        for (_, f) in self.on_add.iter_mut() {
            f(node);
        }
    }

    pub(crate) fn notify_modified(&mut self, node: NodeRef, old_children: &[Signal]) {
        for (_, f) in self.on_modified.iter_mut() {
            f(node, old_children);
        }
    }
}

impl std::fmt::Debug for NetworkEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkEvents")
            .field("on_add", &self.on_add.len())
            .field("on_modified", &self.on_modified.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let log: Rc<RefCell<Vec<(u32, usize)>>> = Rc::new(RefCell::new(Vec::new()));
        let mut events = NetworkEvents::default();
        let first = log.clone();
        events.subscribe_add(move |n| first.borrow_mut().push((1, n.id)));
        let second = log.clone();
        events.subscribe_add(move |n| second.borrow_mut().push((2, n.id)));

        events.notify_add(NodeRef { id: 7 });
        assert_eq!(*log.borrow(), vec![(1, 7), (2, 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0usize));
        let mut events = NetworkEvents::default();
        let c = count.clone();
        let id = events.subscribe_modified(move |_, _| *c.borrow_mut() += 1);
        assert_eq!(events.num_listeners(), 1);

        events.notify_modified(NodeRef { id: 2 }, &[]);
        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.notify_modified(NodeRef { id: 2 }, &[]);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(events.num_listeners(), 0);
    }
}
