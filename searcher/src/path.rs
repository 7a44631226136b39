use crate::node::Node;
use crate::traits::Cost;

/// A path from the initial state to a goal, in travel order.
///
/// `states` always holds one more element than `actions`:
/// the `i`th action leads from `states[i]` to `states[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<S, A, C> {
    pub(crate) states: Vec<S>,
    pub(crate) actions: Vec<A>,
    pub(crate) cost: C,
}

impl<S, A, C> Path<S, A, C>
where
    S: Clone,
    A: Clone,
    C: Cost,
{
    /// Reconstruct the path to `goal` by walking its parents.
    pub fn from_goal(goal: &Node<S, A, C>) -> Self {
        let mut states = Vec::with_capacity(goal.depth() + 1);
        let mut actions = Vec::with_capacity(goal.depth());

        for node in goal.ancestors() {
            states.push(node.state().clone());
            if let Some(action) = node.action() {
                actions.push(action.clone());
            }
        }

        states.reverse();
        actions.reverse();

        Self {
            states,
            actions,
            cost: goal.path_cost(),
        }
    }
}

impl<S, A, C> Path<S, A, C>
where
    C: Copy,
{
    /// Number of steps taken along this path.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn origin(&self) -> &S {
        &self.states[0]
    }

    pub fn destination(&self) -> &S {
        &self.states[self.states.len() - 1]
    }

    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn cost(&self) -> C {
        self.cost
    }

    /// Iterate over each `(state, action, next_state)` step.
    pub fn steps(&self) -> impl Iterator<Item = (&S, &A, &S)> {
        self.states
            .windows(2)
            .zip(self.actions.iter())
            .map(|(pair, action)| (&pair[0], action, &pair[1]))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::rc::Rc;

    #[test]
    fn reconstruct() {
        let a: Rc<Node<&str, &str, u32>> = Rc::new(Node::new("A", None, None, 0));
        let b = Rc::new(Node::new("B", Some(a), Some("ab"), 1));
        let c = Node::new("C", Some(b), Some("bc"), 1);

        let path = Path::from_goal(&c);
        assert_eq!(path.states(), &["A", "B", "C"]);
        assert_eq!(path.actions(), &["ab", "bc"]);
        assert_eq!(path.cost(), 2);
        assert_eq!(path.len(), 2);
        assert_eq!(path.origin(), &"A");
        assert_eq!(path.destination(), &"C");

        let steps: Vec<_> = path.steps().map(|(s, a, n)| (*s, *a, *n)).collect();
        assert_eq!(steps, vec![("A", "ab", "B"), ("B", "bc", "C")]);
    }

    #[test]
    fn root_only() {
        let a: Node<&str, &str, u32> = Node::new("A", None, None, 0);
        let path = Path::from_goal(&a);
        assert!(path.is_empty());
        assert_eq!(path.origin(), path.destination());
    }
}
