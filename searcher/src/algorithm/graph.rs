use tracing::{debug, info, trace};

use super::Statistics;
use crate::closed::ClosedSet;
use crate::errors::{Result, SearchError};
use crate::frontier::{ChildFate, Frontier};
use crate::queue::Compare;
use crate::traits::{Problem, ProblemNode};

/// Best-first search with duplicate elimination.
///
/// Every state is expanded at most once, and the frontier only ever
/// holds the cheapest known path to each pending state. With a
/// consistent heuristic (or none) the first goal popped is optimal.
#[derive(Debug)]
pub struct GraphSearch<'p, P, O>
where
    P: Problem,
{
    problem: &'p P,
    frontier: Frontier<P::State, P::Action, P::Cost, O>,
    closed: ClosedSet<P::State>,
    statistics: Statistics,
}

impl<'p, P, O> GraphSearch<'p, P, O>
where
    P: Problem,
    O: Compare<ProblemNode<P>>,
{
    /// Prepare a search of `problem`, expanding nodes in `order`.
    pub fn new(problem: &'p P, order: O) -> Self {
        Self {
            problem,
            frontier: Frontier::new(order),
            closed: ClosedSet::new(),
            statistics: Statistics::default(),
        }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Run the search, writing the states of the path found into `path`.
    ///
    /// States are written from the goal back to the start. The cost
    /// of the path is returned.
    pub fn run<E>(&mut self, path: &mut E) -> Result<P::Cost>
    where
        E: Extend<P::State>,
    {
        let goal = self.search()?;
        path.extend(goal.ancestors().map(|node| node.state().clone()));
        Ok(goal.path_cost())
    }

    /// Run the search to completion, returning the goal node.
    pub fn search(&mut self) -> Result<ProblemNode<P>> {
        self.frontier.clear();
        self.closed.clear();
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
                    closed = self.closed.len(),
                    cost = ?node.path_cost(),
                    "graph search in progress"
                );
            }

            if self.problem.goal_test(node.state()) {
                debug!(
                    frontier = self.frontier.len(),
                    closed = self.closed.len(),
                    cost = ?node.path_cost(),
                    "goal found"
                );
                return Ok(node);
            }

            self.closed.insert(node.state().clone());
            self.statistics.expanded += 1;

            for action in self.problem.actions(node.state()) {
                let successor = self.problem.result(node.state(), &action);
                if self.closed.contains(&successor) {
                    continue;
                }

                let child = self.problem.child_to(&node, &action, successor);
                self.statistics.generated += 1;

                match self.frontier.handle_child(child) {
                    ChildFate::Added => self.statistics.pushed += 1,
                    ChildFate::Replaced(_) => self.statistics.decreased += 1,
                    ChildFate::Discarded => self.statistics.discarded += 1,
                }
            }
            self.statistics.observe_frontier(self.frontier.len());
        }

        debug!(closed = self.closed.len(), "frontier exhausted");
        Err(SearchError::GoalNotFound)
    }
}

/// Graph search of `problem` in `order`.
///
/// Writes the path found into `path` (goal first) and returns its cost.
pub fn graph_search<P, O, E>(problem: &P, order: O, path: &mut E) -> Result<P::Cost>
where
    P: Problem,
    O: Compare<ProblemNode<P>>,
    E: Extend<P::State>,
{
    GraphSearch::new(problem, order).run(path)
}
