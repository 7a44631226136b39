use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;
use std::rc::Rc;

use num::{Bounded, Zero};

use crate::node::{Node, NodeRef};

/// Numeric path costs.
///
/// Costs are added along a path, start from zero, and
/// `max_value()` stands in for an infinite cost.
pub trait Cost: Copy + Debug + PartialOrd + Add<Output = Self> + Zero + Bounded {}

impl<T> Cost for T where T: Copy + Debug + PartialOrd + Add<Output = T> + Zero + Bounded {}

/// Node type produced for a given problem.
pub type ProblemNode<P> =
    NodeRef<<P as Problem>::State, <P as Problem>::Action, <P as Problem>::Cost>;

/// Provides an interface for describing a search problem.
///
/// Implementors describe the state space: where the search starts,
/// which actions are available from a state, where those actions lead,
/// what each step costs, and when the search is done. The search
/// algorithms never look inside states or actions.
pub trait Problem {
    type State: Debug + Clone + Eq + Hash;
    type Action: Debug + Clone;
    type Cost: Cost;

    /// The state where the search starts.
    fn initial(&self) -> Self::State;

    fn goal_test(&self, state: &Self::State) -> bool;

    /// Actions available at `state`, in the order they should be tried.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Cost of stepping from `state` to `next` by `action`. Must not be negative.
    fn step_cost(&self, state: &Self::State, action: &Self::Action, next: &Self::State)
        -> Self::Cost;

    /// Node factory, used for the root and for every child.
    fn create(
        &self,
        state: Self::State,
        parent: Option<ProblemNode<Self>>,
        action: Option<Self::Action>,
        step_cost: Self::Cost,
    ) -> ProblemNode<Self> {
        Rc::new(Node::new(state, parent, action, step_cost))
    }

    /// Build the child of `parent` reached by `action`.
    fn child(&self, parent: &ProblemNode<Self>, action: &Self::Action) -> ProblemNode<Self> {
        let next = self.result(parent.state(), action);
        self.child_to(parent, action, next)
    }

    /// Build the child of `parent` when the successor state is already known.
    fn child_to(
        &self,
        parent: &ProblemNode<Self>,
        action: &Self::Action,
        next: Self::State,
    ) -> ProblemNode<Self> {
        let step_cost = self.step_cost(parent.state(), action, &next);
        self.create(next, Some(Rc::clone(parent)), Some(action.clone()), step_cost)
    }

    /// The node for the initial state.
    fn root(&self) -> ProblemNode<Self> {
        self.create(self.initial(), None, None, Self::Cost::zero())
    }
}

/// An estimate of the remaining cost from a state to the nearest goal.
pub trait Heuristic<S, C> {
    fn h(&self, state: &S) -> C;
}

impl<S, C, F> Heuristic<S, C> for F
where
    F: Fn(&S) -> C,
{
    fn h(&self, state: &S) -> C {
        self(state)
    }
}

/// Assigns each node the value used to order the search (its f-value).
pub trait CostFunction<S, A, C> {
    fn f(&self, node: &Node<S, A, C>) -> C;
}

impl<'a, S, A, C, F> CostFunction<S, A, C> for &'a F
where
    F: CostFunction<S, A, C> + ?Sized,
{
    fn f(&self, node: &Node<S, A, C>) -> C {
        (**self).f(node)
    }
}

/// Orders candidates whose cost is equal.
///
/// Policies must be pure functions of the two nodes so that
/// searches stay deterministic.
pub trait TiePolicy<S, A, C> {
    /// Returns true when `a` should be expanded after `b`.
    fn split(&self, a: &Node<S, A, C>, b: &Node<S, A, C>) -> bool;
}

impl<'a, S, A, C, T> TiePolicy<S, A, C> for &'a T
where
    T: TiePolicy<S, A, C> + ?Sized,
{
    fn split(&self, a: &Node<S, A, C>, b: &Node<S, A, C>) -> bool {
        (**self).split(a, b)
    }
}
