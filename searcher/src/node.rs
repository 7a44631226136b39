//! Search tree records which share their ancestry.

use std::fmt;
use std::rc::Rc;

use crate::traits::Cost;

/// Shared handle to a node. Children keep their parents alive.
pub type NodeRef<S, A, C> = Rc<Node<S, A, C>>;

/// A single record in the search tree.
///
/// Pairs a state with the action which produced it, the accumulated
/// cost of the path from the root, and a link to the parent node.
/// Nodes are never changed once built: a cheaper route to the same
/// state produces a new node.
pub struct Node<S, A, C> {
    state: S,
    parent: Option<NodeRef<S, A, C>>,
    action: Option<A>,
    path_cost: C,
}

impl<S, A, C> Node<S, A, C>
where
    C: Cost,
{
    /// Build a node reached from `parent` via `action` at a cost of `step_cost`.
    ///
    /// The root has no parent and no action, and its path cost is just
    /// the step cost it was given (normally zero).
    pub fn new(
        state: S,
        parent: Option<NodeRef<S, A, C>>,
        action: Option<A>,
        step_cost: C,
    ) -> Self {
        let path_cost = match &parent {
            Some(p) => p.path_cost + step_cost,
            None => step_cost,
        };

        Self {
            state,
            parent,
            action,
            path_cost,
        }
    }

    /// Accumulated cost from the root to this node.
    pub fn path_cost(&self) -> C {
        self.path_cost
    }
}

impl<S, A, C> Node<S, A, C> {
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn parent(&self) -> Option<&NodeRef<S, A, C>> {
        self.parent.as_ref()
    }

    /// The action which produced this node, `None` for the root.
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of steps between the root and this node.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Walk from this node back to the root, starting with this node.
    pub fn ancestors(&self) -> Ancestors<'_, S, A, C> {
        Ancestors { next: Some(self) }
    }
}

impl<S, A, C> fmt::Debug for Node<S, A, C>
where
    S: fmt::Debug,
    A: fmt::Debug,
    C: fmt::Debug,
{
    // The parent chain is left out, it can be very long.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("action", &self.action)
            .field("path_cost", &self.path_cost)
            .field("depth", &self.depth())
            .finish()
    }
}

/// Iterator over a node and its ancestors, ending at the root.
#[derive(Debug)]
pub struct Ancestors<'n, S, A, C> {
    next: Option<&'n Node<S, A, C>>,
}

impl<'n, S, A, C> Iterator for Ancestors<'n, S, A, C> {
    type Item = &'n Node<S, A, C>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        self.next = node.parent.as_deref();
        Some(node)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn root_costs_nothing() {
        let root: Node<&str, (), u32> = Node::new("A", None, None, 0);
        assert_eq!(root.path_cost(), 0);
        assert!(root.is_root());
        assert!(root.action().is_none());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn path_cost_accumulates() {
        let root: NodeRef<&str, char, u32> = Rc::new(Node::new("A", None, None, 0));
        let b = Rc::new(Node::new("B", Some(Rc::clone(&root)), Some('b'), 3));
        let c = Node::new("C", Some(Rc::clone(&b)), Some('c'), 4);

        assert_eq!(c.path_cost(), 7);
        assert_eq!(c.depth(), 2);
        assert_eq!(c.action(), Some(&'c'));
        assert_eq!(c.parent().map(|p| *p.state()), Some("B"));

        let states: Vec<&str> = c.ancestors().map(|n| *n.state()).collect();
        assert_eq!(states, vec!["C", "B", "A"]);
    }

    #[test]
    fn parents_are_shared() {
        let root: NodeRef<u8, u8, u32> = Rc::new(Node::new(0, None, None, 0));
        let left = Node::new(1, Some(Rc::clone(&root)), Some(1), 1);
        let right = Node::new(2, Some(Rc::clone(&root)), Some(2), 1);

        assert_eq!(Rc::strong_count(&root), 3);
        drop(left);
        drop(right);
        assert_eq!(Rc::strong_count(&root), 1);
    }
}
