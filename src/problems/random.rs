//! Randomly weighted regular graphs.
//!
//! Every node gets the same number of neighbours, reaching roughly
//! halfway around the ring of nodes. Small branching factors on an
//! even ring can leave the graph in pieces.

use std::io::Read;

use rand::{rngs::StdRng, Rng, SeedableRng};
use searcher::{Dijkstra, Graph, NoTieBreak};
use thiserror::Error;
use tracing::debug;

use crate::{solve, DriverError, Options};

type Error = anyhow::Error;

pub const MAX_WEIGHT: u32 = 500;
pub const DEFAULT_NODES: usize = 100;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Branching factor must be greater than 1, got {0}")]
    BranchingTooSmall(usize),

    #[error("Number of nodes must be greater than 2, got {0}")]
    TooFewNodes(usize),

    #[error("Branching factor {1} must be less than the number of nodes {0}")]
    BranchingTooLarge(usize, usize),

    #[error("Odd branching factor {1} with an odd number of nodes {0} is not supported")]
    BothOdd(usize, usize),
}

pub fn check(nodes: usize, branching: usize) -> Result<(), GeneratorError> {
    if branching < 2 {
        Err(GeneratorError::BranchingTooSmall(branching))
    } else if nodes < 3 {
        Err(GeneratorError::TooFewNodes(nodes))
    } else if branching >= nodes {
        Err(GeneratorError::BranchingTooLarge(nodes, branching))
    } else if branching % 2 == 1 && nodes % 2 == 1 {
        Err(GeneratorError::BothOdd(nodes, branching))
    } else {
        Ok(())
    }
}

/// Build an undirected graph of `nodes` nodes, each with `branching`
/// neighbours, and weights drawn uniformly from 1 to 500.
pub fn generate<R: Rng>(
    nodes: usize,
    branching: usize,
    rng: &mut R,
) -> Result<Graph<usize, u32>, GeneratorError> {
    check(nodes, branching)?;

    let odd = branching % 2;
    let end = nodes / 2 + odd + nodes % 2;
    let start = end - branching / 2 - odd;

    let mut g = Graph::new();
    for v in 0..nodes {
        g.add_node(v);
    }

    for v in 0..nodes {
        for offset in start..end {
            let u = (v + offset) % nodes;
            if g.weight(&v, &u).is_some() {
                continue;
            }
            g.connect(v, u, rng.gen_range(1..=MAX_WEIGHT));
        }
    }

    debug!(nodes, branching, edges = g.edge_count(), "generated graph");
    Ok(g)
}

/// [generate] with a reproducible sequence of weights.
pub fn seeded(nodes: usize, branching: usize, seed: u64) -> Result<Graph<usize, u32>, GeneratorError> {
    generate(nodes, branching, &mut StdRng::seed_from_u64(seed))
}

fn node(name: Option<&str>, default: usize, nodes: usize) -> Result<usize, DriverError> {
    match name {
        None => Ok(default),
        Some(name) => match name.parse::<usize>() {
            Ok(n) if n < nodes => Ok(n),
            _ => Err(DriverError::UnknownState(name.to_string())),
        },
    }
}

pub(crate) fn main(options: &Options, _input: Box<dyn Read + 'static>) -> Result<(), Error> {
    let nodes = options.nodes.unwrap_or(DEFAULT_NODES);
    let g = seeded(nodes, options.branching, options.seed)?;
    if options.dot {
        print!("{}", g.dot(false));
        return Ok(());
    }

    let origin = node(options.from.as_deref(), 0, nodes)?;
    let destination = node(options.to.as_deref(), nodes / 2, nodes)?;

    let route = g.route(origin, destination);
    let solution = solve(&route, options.algorithm, Dijkstra, NoTieBreak)
        .map_err(|e| DriverError::NoPath(origin.to_string(), e))?;

    solution.report(options.stats);
    Ok(())
}
