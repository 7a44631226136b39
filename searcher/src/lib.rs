//! Domain independent best-first search.
//!
//! To search a state space, implement [Problem] for it, then hand it
//! to one of the search algorithms along with an ordering:
//!
//! * [graph_search] for full duplicate elimination,
//! * [tree_search] when the state space has no (or few) duplicates,
//! * [recursive_best_first_search] when memory is tight.
//!
//! Orderings are built from a [CostFunction] (see [Dijkstra], [AStar]
//! and [Greedy]) and a [TiePolicy] which decides between candidates
//! of equal cost.

pub mod algorithm;
mod closed;
mod errors;
pub mod evaluation;
mod frontier;
pub mod graph;
mod node;
mod path;
pub mod queue;
mod traits;

pub use errors::Result as SearchResult;
pub use errors::SearchError;

pub use closed::ClosedSet;
pub use frontier::{ChildFate, Frontier};
pub use node::{Ancestors, Node, NodeRef};
pub use path::Path;
pub use traits::{Cost, CostFunction, Heuristic, Problem, ProblemNode, TiePolicy};

pub use algorithm::{graph_search, recursive_best_first_search, tree_search};
pub use algorithm::{Expansion, GraphSearch, RecursiveBestFirst, Statistics, TreeSearch};
pub use evaluation::{
    AStar, Dijkstra, Greedy, LowH, LowHTotal, NoTieBreak, Simple, Tiebreaking, ZeroHeuristic,
};
pub use graph::{Dot, Graph, Route};
