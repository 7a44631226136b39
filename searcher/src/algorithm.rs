//! Best-first search algorithms built on the frontier and closed set.
//!
//! * [GraphSearch] expands each state at most once, keeping only the
//!   cheapest known path to each pending state.
//! * [TreeSearch] skips all duplicate detection.
//! * [RecursiveBestFirst] uses memory linear in the search depth, at
//!   the cost of expanding some nodes more than once.

use std::fmt;

pub(crate) mod graph;
pub(crate) mod recursive;
pub(crate) mod tree;

pub use graph::{graph_search, GraphSearch};
pub use recursive::{recursive_best_first_search, Expansion, RecursiveBestFirst};
pub use tree::{tree_search, TreeSearch};

/// How often (in popped nodes) the search loops report progress.
const PROGRESS_INTERVAL: usize = 10_000;

/// Counters collected while a search runs.
///
/// They are informational only, and never influence the search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Nodes taken off the frontier.
    pub popped: usize,

    /// Nodes added to the frontier.
    pub pushed: usize,

    /// Frontier entries replaced by a cheaper path.
    pub decreased: usize,

    /// Children thrown away because a cheaper path was pending.
    pub discarded: usize,

    /// Nodes whose children were generated.
    pub expanded: usize,

    /// Child nodes built.
    pub generated: usize,

    /// Largest frontier seen.
    pub peak_frontier: usize,

    /// Recursive calls made by RBFS.
    pub calls: usize,

    /// RBFS node-cost records alive right now.
    pub records: usize,

    /// Most RBFS node-cost records alive at once.
    pub peak_records: usize,

    /// Deepest RBFS recursion.
    pub peak_depth: usize,
}

impl Statistics {
    fn observe_frontier(&mut self, size: usize) {
        self.peak_frontier = self.peak_frontier.max(size);
    }

    fn report_progress(&self) -> bool {
        self.popped > 0 && self.popped % PROGRESS_INTERVAL == 0
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "popped={} pushed={} decreased={} discarded={} expanded={} generated={} peak_frontier={}",
            self.popped,
            self.pushed,
            self.decreased,
            self.discarded,
            self.expanded,
            self.generated,
            self.peak_frontier
        )?;
        if self.calls > 0 {
            write!(
                f,
                " calls={} peak_records={} peak_depth={}",
                self.calls, self.peak_records, self.peak_depth
            )?;
        }
        Ok(())
    }
}
