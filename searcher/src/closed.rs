//! Record of already expanded states.

use std::collections::HashSet;
use std::hash::Hash;

/// The set of states which graph search has fully expanded.
///
/// Only ever grows during a search.
#[derive(Debug)]
pub struct ClosedSet<S>
where
    S: Eq + Hash,
{
    states: HashSet<S>,
}

impl<S> Default for ClosedSet<S>
where
    S: Eq + Hash,
{
    fn default() -> Self {
        ClosedSet {
            states: HashSet::default(),
        }
    }
}

impl<S> ClosedSet<S>
where
    S: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `state` as expanded. Returns false if it already was.
    pub fn insert(&mut self, state: S) -> bool {
        self.states.insert(state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
    }
}
