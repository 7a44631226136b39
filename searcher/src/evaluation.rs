//! Cost functions, heuristics and tie-breaking policies.
//!
//! A cost function assigns each node its f-value. The comparators at
//! the bottom of this module turn a cost function (and optionally a
//! tie policy) into the ordering used by a search frontier.

use crate::node::{Node, NodeRef};
use crate::queue::Compare;
use crate::traits::{Cost, CostFunction, Heuristic, TiePolicy};

/// Heuristic which always guesses zero remaining cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S, C> Heuristic<S, C> for ZeroHeuristic
where
    C: Cost,
{
    fn h(&self, _state: &S) -> C {
        C::zero()
    }
}

/// Orders by path cost alone (uniform cost search).
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl<S, A, C> CostFunction<S, A, C> for Dijkstra
where
    C: Cost,
{
    fn f(&self, node: &Node<S, A, C>) -> C {
        node.path_cost()
    }
}

/// Orders by path cost plus the heuristic estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar<H> {
    heuristic: H,
}

impl<H> AStar<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }
}

impl<S, A, C, H> CostFunction<S, A, C> for AStar<H>
where
    C: Cost,
    H: Heuristic<S, C>,
{
    fn f(&self, node: &Node<S, A, C>) -> C {
        node.path_cost() + self.heuristic.h(node.state())
    }
}

/// Orders by the heuristic estimate alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy<H> {
    heuristic: H,
}

impl<H> Greedy<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<S, A, C, H> CostFunction<S, A, C> for Greedy<H>
where
    H: Heuristic<S, C>,
{
    fn f(&self, node: &Node<S, A, C>) -> C {
        self.heuristic.h(node.state())
    }
}

/// Leaves ties in whatever order the queue produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTieBreak;

impl<S, A, C> TiePolicy<S, A, C> for NoTieBreak {
    fn split(&self, _a: &Node<S, A, C>, _b: &Node<S, A, C>) -> bool {
        false
    }
}

/// Among equal candidates, prefer the one closer to the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowH<H> {
    heuristic: H,
}

impl<H> LowH<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<S, A, C, H> TiePolicy<S, A, C> for LowH<H>
where
    C: PartialOrd,
    H: Heuristic<S, C>,
{
    fn split(&self, a: &Node<S, A, C>, b: &Node<S, A, C>) -> bool {
        self.heuristic.h(a.state()) > self.heuristic.h(b.state())
    }
}

/// Like [LowH], but falls back on the states' own ordering
/// so that no two distinct states ever tie.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowHTotal<H> {
    heuristic: H,
}

impl<H> LowHTotal<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<S, A, C, H> TiePolicy<S, A, C> for LowHTotal<H>
where
    S: Ord,
    C: PartialOrd,
    H: Heuristic<S, C>,
{
    fn split(&self, a: &Node<S, A, C>, b: &Node<S, A, C>) -> bool {
        let (ha, hb) = (self.heuristic.h(a.state()), self.heuristic.h(b.state()));
        if ha == hb {
            a.state() > b.state()
        } else {
            ha > hb
        }
    }
}

/// Orders nodes by f-value and hands ties to a [TiePolicy].
///
/// The tie policy is consulted once for each comparison between
/// nodes of equal cost, and never otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tiebreaking<F, T> {
    cost: F,
    tie: T,
}

impl<F, T> Tiebreaking<F, T> {
    pub fn new(cost: F, tie: T) -> Self {
        Self { cost, tie }
    }

    pub fn cost_function(&self) -> &F {
        &self.cost
    }

    pub fn tie_policy(&self) -> &T {
        &self.tie
    }
}

impl<S, A, C, F, T> Compare<NodeRef<S, A, C>> for Tiebreaking<F, T>
where
    C: PartialOrd,
    F: CostFunction<S, A, C>,
    T: TiePolicy<S, A, C>,
{
    fn precedes(&self, a: &NodeRef<S, A, C>, b: &NodeRef<S, A, C>) -> bool {
        let (fa, fb) = (self.cost.f(a), self.cost.f(b));
        if fa == fb {
            self.tie.split(b, a)
        } else {
            fa < fb
        }
    }
}

/// Orders nodes by f-value only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simple<F> {
    cost: F,
}

impl<F> Simple<F> {
    pub fn new(cost: F) -> Self {
        Self { cost }
    }
}

impl<S, A, C, F> Compare<NodeRef<S, A, C>> for Simple<F>
where
    C: PartialOrd,
    F: CostFunction<S, A, C>,
{
    fn precedes(&self, a: &NodeRef<S, A, C>, b: &NodeRef<S, A, C>) -> bool {
        self.cost.f(a) < self.cost.f(b)
    }
}
