//! Route finding across the road map of Romania.
//!
//! The usual question is how to get from Arad, in the northwest, to
//! the capital Bucharest. The best route goes
//! Arad => Sibiu => Rimnicu Vilcea => Pitesti => Bucharest: 418.

use std::collections::HashMap;
use std::io::Read;

use lazy_static::lazy_static;
use searcher::{AStar, Dijkstra, Graph, LowH, NoTieBreak};

use crate::{solve, DriverError, Options};

type Error = anyhow::Error;

pub type City = &'static str;

const ROADS: &[(City, City, u32)] = &[
    ("Arad", "Zerind", 75),
    ("Arad", "Sibiu", 140),
    ("Arad", "Timisoara", 118),
    ("Zerind", "Oradea", 71),
    ("Oradea", "Sibiu", 151),
    ("Timisoara", "Lugoj", 111),
    ("Lugoj", "Mehadia", 70),
    ("Mehadia", "Drobeta", 75),
    ("Drobeta", "Craiova", 120),
    ("Craiova", "Rimnicu Vilcea", 146),
    ("Craiova", "Pitesti", 138),
    ("Sibiu", "Fagaras", 99),
    ("Sibiu", "Rimnicu Vilcea", 80),
    ("Rimnicu Vilcea", "Pitesti", 97),
    ("Fagaras", "Bucharest", 211),
    ("Pitesti", "Bucharest", 101),
    ("Bucharest", "Giurgiu", 90),
    ("Bucharest", "Urziceni", 85),
    ("Urziceni", "Hirsova", 98),
    ("Hirsova", "Eforie", 86),
    ("Urziceni", "Vaslui", 142),
    ("Vaslui", "Iasi", 92),
    ("Iasi", "Neamt", 87),
];

/// Straight-line distance from each city to Bucharest.
const STRAIGHT_LINE: &[(City, u32)] = &[
    ("Arad", 366),
    ("Bucharest", 0),
    ("Craiova", 160),
    ("Drobeta", 242),
    ("Eforie", 161),
    ("Fagaras", 176),
    ("Giurgiu", 77),
    ("Hirsova", 151),
    ("Iasi", 226),
    ("Lugoj", 244),
    ("Mehadia", 241),
    ("Neamt", 234),
    ("Oradea", 380),
    ("Pitesti", 100),
    ("Rimnicu Vilcea", 193),
    ("Sibiu", 253),
    ("Timisoara", 329),
    ("Urziceni", 80),
    ("Vaslui", 199),
    ("Zerind", 374),
];

pub const CAPITAL: City = "Bucharest";

lazy_static! {
    static ref MAP: Graph<City, u32> = {
        let mut g = Graph::new();
        for &(a, b, distance) in ROADS {
            g.connect(a, b, distance);
        }
        g
    };
    static ref SLD: HashMap<City, u32> = STRAIGHT_LINE.iter().cloned().collect();
}

/// The road map. Roads run both ways.
pub fn map() -> &'static Graph<City, u32> {
    &MAP
}

/// Straight-line distance from `city` to Bucharest.
///
/// Never more than the road distance, so it is an admissible
/// heuristic when heading for Bucharest.
pub fn straight_line_distance(city: &City) -> u32 {
    SLD.get(city).copied().unwrap_or(0)
}

/// Find a city by name, ignoring case.
pub fn lookup(name: &str) -> Option<City> {
    map().nodes().find(|c| c.eq_ignore_ascii_case(name)).copied()
}

fn city(name: Option<&str>, default: City) -> Result<City, DriverError> {
    match name {
        Some(name) => lookup(name).ok_or_else(|| DriverError::UnknownState(name.to_string())),
        None => Ok(default),
    }
}

pub(crate) fn main(options: &Options, _input: Box<dyn Read + 'static>) -> Result<(), Error> {
    let origin = city(options.from.as_deref(), "Arad")?;
    let destination = city(options.to.as_deref(), CAPITAL)?;
    let route = map().route(origin, destination);

    // Straight-line distances only mean something on the way to Bucharest.
    let solution = if destination == CAPITAL {
        solve(
            &route,
            options.algorithm,
            AStar::new(straight_line_distance),
            LowH::new(straight_line_distance),
        )
    } else {
        solve(&route, options.algorithm, Dijkstra, NoTieBreak)
    }
    .map_err(|e| DriverError::NoPath(origin.to_string(), e))?;

    solution.report(options.stats);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::Algorithm;

    #[test]
    fn map_is_complete() {
        assert_eq!(map().len(), 20);
        assert_eq!(map().edge_count(), 2 * ROADS.len());
        for city in map().nodes() {
            assert!(SLD.contains_key(city), "No distance for {}", city);
        }
    }

    #[test]
    fn heuristic_is_admissible() {
        for &start in STRAIGHT_LINE.iter().map(|(c, _)| c) {
            let exact = map().find_path(start, CAPITAL).unwrap().cost();
            assert!(straight_line_distance(&start) <= exact, "{}", start);
        }
    }

    #[test]
    fn arad_to_bucharest() {
        let route = map().route("Arad", CAPITAL);
        let expected = vec!["Arad", "Sibiu", "Rimnicu Vilcea", "Pitesti", "Bucharest"];

        for algorithm in &[Algorithm::Graph, Algorithm::Tree, Algorithm::Rbfs] {
            let solution = solve(
                &route,
                *algorithm,
                AStar::new(straight_line_distance),
                LowH::new(straight_line_distance),
            )
            .unwrap();
            assert_eq!(solution.cost, 418, "{:?}", algorithm);
            assert_eq!(solution.states, expected, "{:?}", algorithm);
        }
    }

    #[test]
    fn uniform_cost_agrees() {
        let route = map().route("Arad", CAPITAL);
        let solution = solve(&route, Algorithm::Graph, Dijkstra, NoTieBreak).unwrap();
        assert_eq!(solution.cost, 418);
    }

    #[test]
    fn other_destinations() {
        let route = map().route("Timisoara", "Iasi");
        let solution = solve(&route, Algorithm::Graph, Dijkstra, NoTieBreak).unwrap();
        assert_eq!(solution.goal(), Some(&"Iasi"));
        assert_eq!(
            solution.cost,
            map().find_path("Timisoara", "Iasi").unwrap().cost()
        );
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("rimnicu vilcea"), Some("Rimnicu Vilcea"));
        assert_eq!(lookup("Cluj"), None);
    }
}
