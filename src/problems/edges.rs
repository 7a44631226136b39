//! Route finding over a graph read from an edge list.
//!
//! Each line names one edge:
//!
//! ```text
//! # comments and blank lines are skipped
//! Arad - Sibiu: 140
//! Sibiu -> Fagaras: 99
//! ```
//!
//! `-` joins the two nodes both ways, `->` only from left to right.

use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use searcher::{Dijkstra, Graph, NoTieBreak};
use thiserror::Error;
use tracing::trace;

use crate::{solve, DriverError, Options};

type Error = anyhow::Error;

lazy_static! {
    static ref EDGE: Regex = Regex::new(
        r"^\s*(?P<from>\w[\w ]*?)\s*(?P<dir>->|-)\s*(?P<to>\w[\w ]*?)\s*:\s*(?P<weight>\d+)\s*$"
    )
    .unwrap();
}

#[derive(Debug, Error)]
pub enum EdgeListError {
    #[error("Unable to parse edge: {0:?}")]
    Malformed(String),

    #[error("Line {0}: {1}")]
    Line(usize, Box<EdgeListError>),

    #[error("Weight {0} is out of range")]
    Weight(String),

    #[error("No edges found")]
    Empty,

    #[error("Unable to read edges")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: u32,
    pub directed: bool,
}

impl FromStr for EdgeSpec {
    type Err = EdgeListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cap = EDGE
            .captures(s)
            .ok_or_else(|| EdgeListError::Malformed(s.to_string()))?;

        let weight = &cap["weight"];
        Ok(EdgeSpec {
            from: cap["from"].to_string(),
            to: cap["to"].to_string(),
            weight: weight
                .parse()
                .map_err(|_| EdgeListError::Weight(weight.to_string()))?,
            directed: &cap["dir"] == "->",
        })
    }
}

/// Read an edge list into a graph.
pub fn read<R: Read>(input: R) -> Result<Graph<String, u32>, EdgeListError> {
    let mut g = Graph::new();

    for (n, line) in BufReader::new(input).lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let edge: EdgeSpec = line
            .parse()
            .map_err(|e| EdgeListError::Line(n + 1, Box::new(e)))?;
        trace!(?edge, "read");

        if edge.directed {
            g.insert(edge.from, edge.to, edge.weight);
        } else {
            g.connect(edge.from, edge.to, edge.weight);
        }
    }

    if g.is_empty() {
        return Err(EdgeListError::Empty);
    }
    Ok(g)
}

fn endpoint(g: &Graph<String, u32>, name: Option<&str>, flag: &str) -> Result<String, Error> {
    let name = name.ok_or_else(|| anyhow::anyhow!("{} is required for an edge list", flag))?;
    let node = name.to_string();
    if g.contains_node(&node) {
        Ok(node)
    } else {
        Err(DriverError::UnknownState(node).into())
    }
}

pub(crate) fn main(options: &Options, input: Box<dyn Read + 'static>) -> Result<(), Error> {
    let g = read(input)?;
    let origin = endpoint(&g, options.from.as_deref(), "--from")?;
    let destination = endpoint(&g, options.to.as_deref(), "--to")?;

    let route = g.route(origin.clone(), destination);
    let solution = solve(&route, options.algorithm, Dijkstra, NoTieBreak)
        .map_err(|e| DriverError::NoPath(origin, e))?;

    solution.report(options.stats);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::Algorithm;
    use searcher::SearchError;

    const ROADS: &str = "
# A corner of Romania
Arad - Sibiu: 140
Arad - Timisoara: 118
Sibiu - Rimnicu Vilcea: 80
Sibiu -> Fagaras: 99
Fagaras -> Bucharest: 211
Rimnicu Vilcea - Pitesti: 97
Pitesti - Bucharest: 101
Giurgiu -> Bucharest: 90
";

    #[test]
    fn parse_edge() {
        let edge: EdgeSpec = "Rimnicu Vilcea - Pitesti: 97".parse().unwrap();
        assert_eq!(
            edge,
            EdgeSpec {
                from: "Rimnicu Vilcea".to_string(),
                to: "Pitesti".to_string(),
                weight: 97,
                directed: false,
            }
        );

        let edge: EdgeSpec = "  a->b :3 ".parse().unwrap();
        assert!(edge.directed);
        assert_eq!((edge.from.as_str(), edge.to.as_str(), edge.weight), ("a", "b", 3));
    }

    #[test]
    fn malformed_edges() {
        assert!(matches!(
            "Arad Sibiu 140".parse::<EdgeSpec>(),
            Err(EdgeListError::Malformed(_))
        ));
        assert!(matches!(
            "a - b: 99999999999".parse::<EdgeSpec>(),
            Err(EdgeListError::Weight(_))
        ));

        match read("a - b: 1\nnonsense\n".as_bytes()) {
            Err(EdgeListError::Line(2, e)) => assert!(matches!(*e, EdgeListError::Malformed(_))),
            other => panic!("Unexpected {:?}", other.map(|g| g.len())),
        }
        assert!(matches!(read("# nothing\n".as_bytes()), Err(EdgeListError::Empty)));
    }

    #[test]
    fn directions() {
        let g = read(ROADS.as_bytes()).unwrap();
        assert_eq!(g.len(), 8);
        assert_eq!(g.weight(&"Sibiu".to_string(), &"Fagaras".to_string()), Some(99));
        assert_eq!(g.weight(&"Fagaras".to_string(), &"Sibiu".to_string()), None);
        assert_eq!(g.weight(&"Pitesti".to_string(), &"Bucharest".to_string()), Some(101));
        assert_eq!(g.weight(&"Bucharest".to_string(), &"Pitesti".to_string()), Some(101));
    }

    #[test]
    fn route_through_edge_list() {
        let g = read(ROADS.as_bytes()).unwrap();

        let route = g.route("Arad".to_string(), "Bucharest".to_string());
        let solution = solve(&route, Algorithm::Graph, Dijkstra, NoTieBreak).unwrap();
        assert_eq!(solution.cost, 418);
        assert_eq!(
            solution.states,
            vec!["Arad", "Sibiu", "Rimnicu Vilcea", "Pitesti", "Bucharest"]
        );

        // One way roads only go one way.
        let route = g.route("Bucharest".to_string(), "Giurgiu".to_string());
        let result = solve(&route, Algorithm::Graph, Dijkstra, NoTieBreak);
        assert_eq!(result.err(), Some(SearchError::GoalNotFound));
    }
}
