//! The open set for graph search.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::node::NodeRef;
use crate::queue::{Compare, Handle, PriorityQueue};
use crate::traits::Cost;

/// What became of a child offered to the frontier.
#[derive(Debug)]
pub enum ChildFate<S, A, C> {
    /// The state was new, and the child joined the frontier.
    Added,

    /// The child was cheaper than the pending node for the same state,
    /// which it superseded. The superseded node is returned.
    Replaced(NodeRef<S, A, C>),

    /// A path at least as cheap to the same state is already pending.
    Discarded,
}

/// Priority queue of unexpanded nodes, indexed by state.
///
/// Holds at most one node per state: the cheapest seen so far.
#[derive(Debug)]
pub struct Frontier<S, A, C, O> {
    queue: PriorityQueue<NodeRef<S, A, C>, O>,
    index: HashMap<S, Handle>,
}

impl<S, A, C, O> Frontier<S, A, C, O>
where
    S: Debug + Clone + Eq + Hash,
    A: Debug,
    C: Cost,
    O: Compare<NodeRef<S, A, C>>,
{
    pub fn new(order: O) -> Self {
        Self {
            queue: PriorityQueue::new(order),
            index: HashMap::new(),
        }
    }

    /// Add a node for a state which is not yet on the frontier.
    ///
    /// When duplicates are possible, use [Frontier::handle_child].
    pub fn push(&mut self, node: NodeRef<S, A, C>) -> Handle {
        debug_assert!(
            !self.index.contains_key(node.state()),
            "{:?} is already on the frontier",
            node.state()
        );
        let state = node.state().clone();
        let handle = self.queue.push(node);
        self.index.insert(state, handle);
        handle
    }

    /// Remove and return the best node.
    pub fn pop(&mut self) -> Option<NodeRef<S, A, C>> {
        let node = self.queue.pop()?;
        self.index.remove(node.state());
        Some(node)
    }

    pub fn peek(&self) -> Option<&NodeRef<S, A, C>> {
        self.queue.peek()
    }

    /// Find the pending entry for `state`.
    pub fn find(&self, state: &S) -> Option<Handle> {
        self.index.get(state).copied()
    }

    pub fn get(&self, handle: Handle) -> Option<&NodeRef<S, A, C>> {
        self.queue.get(handle)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    /// Replace the node at `handle` with a better node for the same state.
    ///
    /// Returns the node which was replaced.
    pub fn decrease_key(
        &mut self,
        handle: Handle,
        node: NodeRef<S, A, C>,
    ) -> Option<NodeRef<S, A, C>> {
        debug_assert_eq!(self.index.get(node.state()), Some(&handle));
        self.queue.replace(handle, node)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.index.clear();
    }

    /// Offer a freshly generated child to the frontier.
    ///
    /// The child joins if its state is new, replaces the pending node
    /// if it is strictly cheaper, and is thrown away otherwise.
    pub fn handle_child(&mut self, child: NodeRef<S, A, C>) -> ChildFate<S, A, C> {
        let handle = match self.find(child.state()) {
            Some(handle) => handle,
            None => {
                trace!(state = ?child.state(), cost = ?child.path_cost(), "frontier <=");
                self.push(child);
                return ChildFate::Added;
            }
        };

        let pending = match self.queue.get(handle) {
            Some(node) => Rc::clone(node),
            None => unreachable!("frontier index is out of date for {:?}", child.state()),
        };

        if child.path_cost() < pending.path_cost() {
            debug!(
                state = ?child.state(),
                "replace {:?} with {:?}",
                pending.path_cost(),
                child.path_cost()
            );
            self.decrease_key(handle, child);
            ChildFate::Replaced(pending)
        } else {
            debug!(
                state = ?child.state(),
                "keep {:?} and throw away {:?}",
                pending.path_cost(),
                child.path_cost()
            );
            ChildFate::Discarded
        }
    }
}
