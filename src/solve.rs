//! Run any of the search algorithms on a problem, and report the result.

use std::fmt::Display;

use searcher::{
    CostFunction, GraphSearch, Path, Problem, RecursiveBestFirst, SearchError, Statistics,
    TiePolicy, Tiebreaking, TreeSearch,
};
use tracing::info;

use crate::Algorithm;

/// A path found by one of the search algorithms, in travel order.
#[derive(Debug, Clone)]
pub struct Solution<S, C> {
    pub states: Vec<S>,
    pub cost: C,
    pub statistics: Statistics,
}

impl<S, C> Solution<S, C> {
    /// The goal state which was reached.
    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }

    /// Number of steps taken.
    pub fn len(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S, C> Solution<S, C>
where
    S: Display,
    C: Display,
{
    /// Print the path and its cost.
    pub fn report(&self, stats: bool) {
        let steps: Vec<String> = self.states.iter().map(|s| s.to_string()).collect();
        println!("Path: {}", steps.join(" -> "));
        println!("Cost: {}", self.cost);
        if stats {
            println!("Statistics: {}", self.statistics);
        }
    }
}

/// Search `problem` with `algorithm`.
///
/// Nodes are ordered by `cost`, with `tie` deciding between nodes
/// of equal cost.
pub fn solve<P, F, T>(
    problem: &P,
    algorithm: Algorithm,
    cost: F,
    tie: T,
) -> Result<Solution<P::State, P::Cost>, SearchError>
where
    P: Problem,
    F: CostFunction<P::State, P::Action, P::Cost>,
    T: TiePolicy<P::State, P::Action, P::Cost>,
{
    info!(?algorithm, initial = ?problem.initial(), "searching");

    let solution = match algorithm {
        Algorithm::Graph => {
            let mut search = GraphSearch::new(problem, Tiebreaking::new(cost, tie));
            let mut states = Vec::new();
            let result = search.run(&mut states);
            info!(statistics = %search.statistics(), "graph search done");

            // Graph search writes the path goal first.
            states.reverse();
            Solution {
                states,
                cost: result?,
                statistics: *search.statistics(),
            }
        }
        Algorithm::Tree => {
            let mut search = TreeSearch::new(problem, Tiebreaking::new(cost, tie));
            let result = search.run();
            info!(statistics = %search.statistics(), "tree search done");

            let goal = result?;
            let path = Path::from_goal(&goal);
            Solution {
                states: path.states().to_vec(),
                cost: path.cost(),
                statistics: *search.statistics(),
            }
        }
        Algorithm::Rbfs => {
            let mut search = RecursiveBestFirst::new(problem, cost, tie);
            let result = search.run();
            info!(statistics = %search.statistics(), "recursive best-first search done");

            let goal = result?;
            let path = Path::from_goal(&goal);
            Solution {
                states: path.states().to_vec(),
                cost: path.cost(),
                statistics: *search.statistics(),
            }
        }
    };

    Ok(solution)
}

#[cfg(test)]
mod test {
    use super::*;

    use searcher::{Dijkstra, Graph, NoTieBreak};

    fn line() -> Graph<u32, u32> {
        let mut g = Graph::new();
        g.connect(1, 2, 3);
        g.connect(2, 3, 4);
        g.connect(1, 3, 9);
        g
    }

    #[test]
    fn all_algorithms_agree() {
        let g = line();
        let route = g.route(1, 3);

        for algorithm in &[Algorithm::Graph, Algorithm::Tree, Algorithm::Rbfs] {
            let solution = solve(&route, *algorithm, Dijkstra, NoTieBreak).unwrap();
            assert_eq!(solution.states, vec![1, 2, 3]);
            assert_eq!(solution.cost, 7);
            assert_eq!(solution.goal(), Some(&3));
            assert_eq!(solution.len(), 2);
        }
    }

    #[test]
    fn failures_are_reported() {
        let mut g = Graph::new();
        g.insert(1, 2, 1u32);
        g.insert(2, 3, 1u32);
        g.add_node(4);
        let route = g.route(1, 4);

        for algorithm in &[Algorithm::Graph, Algorithm::Tree, Algorithm::Rbfs] {
            let result = solve(&route, *algorithm, Dijkstra, NoTieBreak);
            assert_eq!(result.err(), Some(SearchError::GoalNotFound));
        }
    }
}
