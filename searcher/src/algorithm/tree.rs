use tracing::{debug, info, trace};

use super::Statistics;
use crate::errors::{Result, SearchError};
use crate::queue::{Compare, PriorityQueue};
use crate::traits::{Problem, ProblemNode};

/// Best-first search without duplicate detection.
///
/// Every child generated goes straight onto the frontier, so the same
/// state may be expanded many times. Only suitable when the state
/// space is a tree, or duplicates are rare. On a cyclic state space
/// with no reachable goal this search never ends.
#[derive(Debug)]
pub struct TreeSearch<'p, P, O>
where
    P: Problem,
{
    problem: &'p P,
    frontier: PriorityQueue<ProblemNode<P>, O>,
    statistics: Statistics,
}

impl<'p, P, O> TreeSearch<'p, P, O>
where
    P: Problem,
    O: Compare<ProblemNode<P>>,
{
    pub fn new(problem: &'p P, order: O) -> Self {
        Self {
            problem,
            frontier: PriorityQueue::new(order),
            statistics: Statistics::default(),
        }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Run the search to completion, returning the goal node.
    pub fn run(&mut self) -> Result<ProblemNode<P>> {
        self.frontier.clear();
        self.statistics = Statistics::default();

        self.frontier.push(self.problem.root());
        self.statistics.pushed += 1;
        self.statistics.observe_frontier(1);

        while let Some(node) = self.frontier.pop() {
            self.statistics.popped += 1;
            trace!(state = ?node.state(), cost = ?node.path_cost(), "frontier =>");

            if self.statistics.report_progress() {
                info!(
                    popped = self.statistics.popped,
                    frontier = self.frontier.len(),
                    cost = ?node.path_cost(),
                    "tree search in progress"
                );
            }

            if self.problem.goal_test(node.state()) {
                debug!(
                    frontier = self.frontier.len(),
                    cost = ?node.path_cost(),
                    "goal found"
                );
                return Ok(node);
            }

            self.statistics.expanded += 1;
            for action in self.problem.actions(node.state()) {
                self.frontier.push(self.problem.child(&node, &action));
                self.statistics.generated += 1;
                self.statistics.pushed += 1;
            }
            self.statistics.observe_frontier(self.frontier.len());
        }

        debug!(expanded = self.statistics.expanded, "frontier exhausted");
        Err(SearchError::GoalNotFound)
    }
}

/// Tree search of `problem` in `order`, returning the goal node.
pub fn tree_search<P, O>(problem: &P, order: O) -> Result<ProblemNode<P>>
where
    P: Problem,
    O: Compare<ProblemNode<P>>,
{
    TreeSearch::new(problem, order).run()
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::algorithm::test::{diamond, disconnected, triangle};
    use crate::evaluation::{Dijkstra, NoTieBreak, Simple, Tiebreaking};
    use crate::path::Path;

    fn uniform() -> Tiebreaking<Dijkstra, NoTieBreak> {
        Tiebreaking::new(Dijkstra, NoTieBreak)
    }

    #[test]
    fn finds_cheapest() {
        let g = triangle();
        let route = g.route("A", "C");
        let goal = tree_search(&route, uniform()).unwrap();

        assert_eq!(goal.path_cost(), 2);
        let path = Path::from_goal(&goal);
        assert_eq!(path.states(), &["A", "B", "C"]);
        assert_eq!(path.actions(), &["B", "C"]);
    }

    #[test]
    fn start_is_goal() {
        let g = triangle();
        let route = g.route("B", "B");
        let mut search = TreeSearch::new(&route, uniform());
        let goal = search.run().unwrap();

        assert!(goal.is_root());
        assert_eq!(goal.path_cost(), 0);
        assert_eq!(search.statistics().expanded, 0);
    }

    #[test]
    fn unreachable_goal() {
        let g = disconnected();
        let route = g.route("A", "D");
        let mut search = TreeSearch::new(&route, Simple::new(Dijkstra));
        assert_eq!(search.run().err(), Some(SearchError::GoalNotFound));
        assert_eq!(search.statistics().popped, 3);
    }

    #[test]
    fn duplicates_are_kept() {
        let g = diamond();
        let route = g.route("S", "G");
        let mut search = TreeSearch::new(&route, uniform());
        let goal = search.run().unwrap();

        assert_eq!(goal.path_cost(), 4);
        // Both routes put a copy of G on the frontier.
        assert_eq!(search.statistics().pushed, 5);
    }
}
