use std::rc::Rc;

use num::Bounded;
use tracing::{debug, info};

use super::Statistics;
use crate::errors::{Result, SearchError};
use crate::node::NodeRef;
use crate::queue::{Compare, PriorityQueue};
use crate::traits::{CostFunction, Problem, ProblemNode, TiePolicy};

/// One recursive call of RBFS, as recorded by
/// [RecursiveBestFirst::record_expansions].
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion<S, C> {
    /// Distance from the root.
    pub depth: usize,
    pub state: S,
    /// The node's own f-value.
    pub f: C,
    /// The estimate the caller held for this node.
    pub estimate: C,
    /// The bound beyond which the caller prefers another branch.
    pub bound: C,
}

/// A child together with its current (backed up) estimate.
struct Estimate<S, A, C> {
    node: NodeRef<S, A, C>,
    cost: C,
}

/// Lowest estimate first, with ties handed to the tie policy.
struct ByEstimate<'t, T>(&'t T);

impl<'t, S, A, C, T> Compare<Estimate<S, A, C>> for ByEstimate<'t, T>
where
    C: PartialOrd,
    T: TiePolicy<S, A, C>,
{
    fn precedes(&self, a: &Estimate<S, A, C>, b: &Estimate<S, A, C>) -> bool {
        if a.cost == b.cost {
            self.0.split(&b.node, &a.node)
        } else {
            a.cost < b.cost
        }
    }
}

enum Outcome<S, A, C> {
    Goal(NodeRef<S, A, C>),
    Backtrack(C),
}

/// Bookkeeping which changes during a run.
struct Tally<S, C> {
    statistics: Statistics,
    expansions: Option<Vec<Expansion<S, C>>>,
}

/// Recursive best-first search.
///
/// Searches depth first, while remembering at each level the best
/// alternative available elsewhere. When the subtree being explored
/// becomes worse than that alternative, the search backs up and
/// records the subtree's best estimate on its root, so that it can
/// be resumed later. Memory use is proportional to depth times
/// branching factor.
///
/// The recursion is as deep as the search tree.
#[derive(Debug)]
pub struct RecursiveBestFirst<'p, P, F, T>
where
    P: Problem,
{
    problem: &'p P,
    cost: F,
    tie: T,
    record: bool,
    statistics: Statistics,
    expansions: Vec<Expansion<P::State, P::Cost>>,
}

impl<'p, P, F, T> RecursiveBestFirst<'p, P, F, T>
where
    P: Problem,
    F: CostFunction<P::State, P::Action, P::Cost>,
    T: TiePolicy<P::State, P::Action, P::Cost>,
{
    pub fn new(problem: &'p P, cost: F, tie: T) -> Self {
        Self {
            problem,
            cost,
            tie,
            record: false,
            statistics: Statistics::default(),
            expansions: Vec::new(),
        }
    }

    /// Keep a log of every recursive call made by the next run.
    pub fn record_expansions(mut self) -> Self {
        self.record = true;
        self
    }

    /// Calls made by the last run, if recording was enabled.
    pub fn expansions(&self) -> &[Expansion<P::State, P::Cost>] {
        &self.expansions
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Run the search to completion, returning the goal node.
    pub fn run(&mut self) -> Result<ProblemNode<P>> {
        let mut tally = Tally {
            statistics: Statistics::default(),
            expansions: if self.record { Some(Vec::new()) } else { None },
        };

        let root = self.problem.root();
        let estimate = self.cost.f(&root);
        let outcome = self.search(root, estimate, P::Cost::max_value(), 0, &mut tally);

        debug!(calls = tally.statistics.calls, "recursive search finished");
        self.statistics = tally.statistics;
        self.expansions = tally.expansions.unwrap_or_default();

        match outcome {
            Outcome::Goal(goal) => Ok(goal),
            Outcome::Backtrack(_) => Err(SearchError::GoalNotFound),
        }
    }

    fn search(
        &self,
        node: ProblemNode<P>,
        estimate: P::Cost,
        bound: P::Cost,
        depth: usize,
        tally: &mut Tally<P::State, P::Cost>,
    ) -> Outcome<P::State, P::Action, P::Cost> {
        let infinity = P::Cost::max_value();
        let f = self.cost.f(&node);

        tally.statistics.calls += 1;
        tally.statistics.peak_depth = tally.statistics.peak_depth.max(depth);
        debug!(depth, state = ?node.state(), ?f, ?estimate, ?bound, "rbfs");
        if let Some(log) = tally.expansions.as_mut() {
            log.push(Expansion {
                depth,
                state: node.state().clone(),
                f,
                estimate,
                bound,
            });
        }
        if tally.statistics.calls % super::PROGRESS_INTERVAL == 0 {
            info!(
                calls = tally.statistics.calls,
                depth,
                records = tally.statistics.records,
                "recursive search in progress"
            );
        }

        if f > bound {
            return Outcome::Backtrack(f);
        }

        if self.problem.goal_test(node.state()) {
            return Outcome::Goal(node);
        }

        let actions = self.problem.actions(node.state());
        if actions.is_empty() {
            return Outcome::Backtrack(infinity);
        }

        tally.statistics.expanded += 1;
        let mut children = PriorityQueue::new(ByEstimate(&self.tie));
        for action in actions {
            let child = self.problem.child(&node, &action);
            let cost = inherit(f, estimate, self.cost.f(&child));
            children.push(Estimate { node: child, cost });
        }

        tally.statistics.generated += children.len();
        tally.statistics.pushed += children.len();
        tally.statistics.records += children.len();
        tally.statistics.peak_records = tally.statistics.peak_records.max(tally.statistics.records);

        let outcome = loop {
            let (handle, best) = match children.peek_entry() {
                Some(entry) => entry,
                None => break Outcome::Backtrack(infinity),
            };

            // Both checks are needed: with an infinite bound, only the
            // second one stops the search from entering a dead end.
            if !(best.cost <= bound && best.cost < infinity) {
                break Outcome::Backtrack(best.cost);
            }

            let (child, cost) = (Rc::clone(&best.node), best.cost);
            let second = children.peek_second().map_or(infinity, |e| e.cost);

            match self.search(child, cost, min(bound, second), depth + 1, tally) {
                Outcome::Goal(goal) => break Outcome::Goal(goal),
                Outcome::Backtrack(revised) => {
                    children.update(handle, |e| e.cost = revised);
                }
            }
        };

        tally.statistics.records -= children.len();
        outcome
    }
}

/// Recursive best-first search of `problem`, ordering by `cost`
/// and splitting ties with `tie`. Returns the goal node.
pub fn recursive_best_first_search<P, F, T>(problem: &P, cost: F, tie: T) -> Result<ProblemNode<P>>
where
    P: Problem,
    F: CostFunction<P::State, P::Action, P::Cost>,
    T: TiePolicy<P::State, P::Action, P::Cost>,
{
    RecursiveBestFirst::new(problem, cost, tie).run()
}

/// Estimate for a child with f-value `child`, whose parent has
/// f-value `f` and backed up estimate `estimate`.
///
/// A parent whose estimate exceeds its own f-value has been explored
/// before, and its children may not be estimated below that (pathmax).
fn inherit<C: PartialOrd>(f: C, estimate: C, child: C) -> C {
    if f < estimate {
        max(estimate, child)
    } else {
        child
    }
}

fn max<C: PartialOrd>(a: C, b: C) -> C {
    if b > a {
        b
    } else {
        a
    }
}

fn min<C: PartialOrd>(a: C, b: C) -> C {
    if b < a {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::algorithm::test::{diamond, disconnected, triangle};
    use crate::evaluation::test::Counting;
    use crate::evaluation::{AStar, Dijkstra, LowH, NoTieBreak, ZeroHeuristic};
    use crate::graph::Graph;
    use crate::path::Path;

    #[test]
    fn pathmax() {
        assert_eq!(inherit(1, 7, 4), 7);
        assert_eq!(inherit(1, 7, 9), 9);
        assert_eq!(inherit(7, 7, 3), 3);
        assert_eq!(inherit(5, 2, 3), 3);
    }

    #[test]
    fn optimal_on_triangle() {
        let g = triangle();
        let route = g.route("A", "C");
        let goal = recursive_best_first_search(&route, Dijkstra, NoTieBreak).unwrap();

        assert_eq!(goal.path_cost(), 2);
        assert_eq!(Path::from_goal(&goal).states(), &["A", "B", "C"]);
    }

    #[test]
    fn start_is_goal() {
        let g = triangle();
        let route = g.route("C", "C");
        let mut search = RecursiveBestFirst::new(&route, AStar::new(ZeroHeuristic), NoTieBreak);
        let goal = search.run().unwrap();

        assert!(goal.is_root());
        assert_eq!(goal.path_cost(), 0);
        assert_eq!(search.statistics().calls, 1);
        assert_eq!(search.statistics().expanded, 0);
    }

    #[test]
    fn unreachable_goal() {
        let g = disconnected();
        let route = g.route("A", "D");
        let result = recursive_best_first_search(&route, Dijkstra, NoTieBreak);
        assert_eq!(result.err(), Some(SearchError::GoalNotFound));
    }

    /// S branches to A and B. Beneath A, C overestimates its distance
    /// to the goal and E is a dead end, so the search is forced to back
    /// up out of A, try B, and come back to A with a raised estimate.
    fn inconsistent() -> (Graph<&'static str, u32>, impl Fn(&&'static str) -> u32 + Copy) {
        let mut g = Graph::new();
        g.insert("S", "A", 1);
        g.insert("S", "B", 1);
        g.insert("A", "C", 1);
        g.insert("A", "E", 1);
        g.insert("C", "G", 1);
        g.insert("B", "D", 1);
        g.insert("D", "G", 10);

        let h = |state: &&'static str| -> u32 {
            match *state {
                "B" => 3,
                "C" => 5,
                "E" => 2,
                "D" => 10,
                _ => 0,
            }
        };
        (g, h)
    }

    #[test]
    fn estimates_never_drop_below_backed_up_value() {
        let (g, h) = inconsistent();
        let route = g.route("S", "G");
        let mut search =
            RecursiveBestFirst::new(&route, AStar::new(h), LowH::new(h)).record_expansions();
        let goal = search.run().unwrap();

        assert_eq!(goal.path_cost(), 3);
        assert_eq!(
            Path::from_goal(&goal).states(),
            &["S", "A", "C", "G"]
        );

        let calls: Vec<(&str, u32, u32, u32)> = search
            .expansions()
            .iter()
            .map(|e| (e.state, e.f, e.estimate, e.bound))
            .collect();
        let inf = u32::MAX;
        assert_eq!(
            calls,
            vec![
                ("S", 0, 0, inf),
                ("A", 1, 1, 4),
                ("E", 4, 4, 4),
                ("B", 4, 4, 7),
                ("A", 1, 7, 12),
                ("E", 4, 7, 7),
                ("C", 7, 7, 12),
                ("G", 3, 3, 12),
            ]
        );

        // The second visit to E inherits A's backed up estimate.
        let second_pass: Vec<u32> = search.expansions()[4..6]
            .iter()
            .map(|e| e.estimate)
            .collect();
        assert!(second_pass.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn tie_policy_decides_equal_children() {
        let g = diamond();
        let route = g.route("S", "G");

        let mut results = Vec::new();
        for _ in 0..3 {
            let counting = Counting::default();
            let goal = recursive_best_first_search(&route, Dijkstra, &counting).unwrap();
            results.push((Path::from_goal(&goal), counting.calls.get()));
        }

        // L is tried first, but its bound is R's estimate, so the
        // search backs up and reaches G through R.
        assert_eq!(results[0].0.states(), &["S", "R", "G"]);
        assert_eq!(results[0].0.cost(), 4);
        assert!(results[0].1 > 0);
        assert!(results.iter().all(|r| r == &results[0]));
    }

    #[test]
    fn records_bounded_by_depth_and_branching() {
        // A complete binary tree of depth 6, with the goal in the last leaf.
        let mut g = Graph::new();
        for parent in 1u32..64 {
            g.insert(parent, parent * 2, 1u32);
            g.insert(parent, parent * 2 + 1, 1u32);
        }
        let route = g.route(1, 127);
        let mut search = RecursiveBestFirst::new(&route, Dijkstra, NoTieBreak);
        let goal = search.run().unwrap();

        assert_eq!(goal.path_cost(), 6);
        let stats = search.statistics();
        assert_eq!(stats.records, 0);
        assert!(stats.peak_depth <= 6);
        assert!(stats.peak_records <= 2 * stats.peak_depth);
    }
}
