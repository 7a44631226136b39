//! Explicit weighted graphs, and routing across them.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use crate::algorithm::GraphSearch;
use crate::evaluation::{Dijkstra, NoTieBreak, Tiebreaking};
use crate::path::Path;
use crate::traits::{Cost, Problem};

/// A weighted graph stored as adjacency lists.
///
/// Neighbours are kept in the order their edges were inserted,
/// which is also the order a search will try them.
#[derive(Debug, Clone)]
pub struct Graph<N, W>
where
    N: Eq + Hash,
{
    nodes: Vec<N>,
    adjacency: HashMap<N, Vec<(N, W)>>,
}

impl<N, W> Default for Graph<N, W>
where
    N: Eq + Hash,
{
    fn default() -> Self {
        Graph {
            nodes: Vec::new(),
            adjacency: HashMap::new(),
        }
    }
}

impl<N, W> Graph<N, W>
where
    N: Eq + Hash,
{
    fn has_edge(&self, from: &N, to: &N) -> bool {
        self.adjacency
            .get(from)
            .map_or(false, |edges| edges.iter().any(|(n, _)| n == to))
    }
}

impl<N, W> Graph<N, W>
where
    N: Debug + Clone + Eq + Hash,
    W: Cost,
{
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no edges. Returns false if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.nodes.push(node.clone());
        self.adjacency.insert(node, Vec::new());
        true
    }

    /// Add a directed edge.
    ///
    /// When the edge already exists, the cheaper weight wins.
    /// Self-loops are never useful to a search, and are ignored.
    pub fn insert(&mut self, from: N, to: N, weight: W) -> bool {
        if from == to {
            return false;
        }

        self.add_node(from.clone());
        self.add_node(to.clone());

        let edges = self.adjacency.entry(from).or_insert_with(Vec::new);
        match edges.iter_mut().find(|(n, _)| n == &to) {
            Some((_, w)) if weight < *w => {
                *w = weight;
                true
            }
            Some(_) => false,
            None => {
                edges.push((to, weight));
                true
            }
        }
    }

    /// Add an edge in both directions.
    pub fn connect(&mut self, a: N, b: N, weight: W) -> bool {
        let forward = self.insert(a.clone(), b.clone(), weight);
        let backward = self.insert(b, a, weight);
        forward || backward
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes, in the order they were first seen.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// Iterate through the edges which leave this node.
    pub fn edges<'g>(&'g self, node: &N) -> impl Iterator<Item = (&'g N, &'g W)> {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(n, w)| (n, w)))
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    pub fn weight(&self, from: &N, to: &N) -> Option<W> {
        self.edges(from).find(|(n, _)| *n == to).map(|(_, w)| *w)
    }

    /// The problem of travelling from `origin` to `destination`.
    pub fn route(&self, origin: N, destination: N) -> Route<'_, N, W> {
        Route {
            graph: self,
            origin,
            destination,
        }
    }

    /// Find the cheapest path within the graph.
    ///
    /// Returns None when no path can be found, or when origin or destination
    /// are not nodes in the graph.
    pub fn find_path(&self, origin: N, destination: N) -> Option<Path<N, N, W>> {
        if !(self.contains_node(&origin) && self.contains_node(&destination)) {
            return None;
        }

        let route = self.route(origin, destination);
        let mut search = GraphSearch::new(&route, Tiebreaking::new(Dijkstra, NoTieBreak));
        search.search().ok().map(|goal| Path::from_goal(&goal))
    }

    /// Render the graph in Graphviz DOT format, labelling edges with
    /// their weights.
    ///
    /// When `directed` is false each pair of opposing edges is written
    /// once, as a single undirected edge carrying the first weight seen.
    pub fn dot(&self, directed: bool) -> Dot<'_, N, W> {
        Dot {
            graph: self,
            directed,
        }
    }
}

/// DOT rendering of a [Graph], from [Graph::dot].
///
/// Nodes are numbered in the order they were first seen, and carry
/// their own name as a label.
#[derive(Debug, Clone, Copy)]
pub struct Dot<'g, N, W>
where
    N: Eq + Hash,
{
    graph: &'g Graph<N, W>,
    directed: bool,
}

impl<'g, N, W> Display for Dot<'g, N, W>
where
    N: Display + Eq + Hash,
    W: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index: HashMap<&N, usize> = self
            .graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n, i))
            .collect();
        let (kind, arrow) = if self.directed {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };

        writeln!(f, "{} G {{", kind)?;
        for (i, node) in self.graph.nodes.iter().enumerate() {
            let name = node.to_string().replace('"', "\\\"");
            writeln!(f, "{} [label=\"{}\"];", i, name)?;
        }

        for (i, node) in self.graph.nodes.iter().enumerate() {
            let edges = self.graph.adjacency.get(node).into_iter().flatten();
            for (to, weight) in edges {
                let j = match index.get(to) {
                    Some(j) => *j,
                    None => continue,
                };

                // The opposing edge was written from the other end.
                if !self.directed && j < i && self.graph.has_edge(to, node) {
                    continue;
                }
                writeln!(f, "{}{}{} [label={}];", i, arrow, j, weight)?;
            }
        }
        writeln!(f, "}}")
    }
}

/// Shortest route between two nodes of a [Graph].
///
/// Actions name the neighbour to move to.
#[derive(Debug, Clone)]
pub struct Route<'g, N, W>
where
    N: Eq + Hash,
{
    graph: &'g Graph<N, W>,
    origin: N,
    destination: N,
}

impl<'g, N, W> Route<'g, N, W>
where
    N: Eq + Hash,
{
    pub fn graph(&self) -> &'g Graph<N, W> {
        self.graph
    }

    pub fn origin(&self) -> &N {
        &self.origin
    }

    pub fn destination(&self) -> &N {
        &self.destination
    }
}

impl<'g, N, W> Problem for Route<'g, N, W>
where
    N: Debug + Clone + Eq + Hash,
    W: Cost,
{
    type State = N;
    type Action = N;
    type Cost = W;

    fn initial(&self) -> N {
        self.origin.clone()
    }

    fn goal_test(&self, state: &N) -> bool {
        state == &self.destination
    }

    fn actions(&self, state: &N) -> Vec<N> {
        self.graph.edges(state).map(|(n, _)| n.clone()).collect()
    }

    fn result(&self, _state: &N, action: &N) -> N {
        action.clone()
    }

    fn step_cost(&self, state: &N, _action: &N, next: &N) -> W {
        // Only reachable for actions which are not edges.
        self.graph.weight(state, next).unwrap_or_else(W::max_value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn romania_fragment() -> Graph<&'static str, u32> {
        let mut g = Graph::new();
        g.connect("Arad", "Sibiu", 140);
        g.connect("Arad", "Timisoara", 118);
        g.connect("Sibiu", "Fagaras", 99);
        g.connect("Sibiu", "Rimnicu Vilcea", 80);
        g.connect("Rimnicu Vilcea", "Pitesti", 97);
        g.connect("Pitesti", "Bucharest", 101);
        g.connect("Fagaras", "Bucharest", 211);
        g
    }

    #[test]
    fn build() {
        let mut g = romania_fragment();
        assert_eq!(g.len(), 7);
        assert_eq!(g.edge_count(), 14);
        assert!(g.contains_node(&"Pitesti"));
        assert!(!g.contains_node(&"Iasi"));
        assert_eq!(g.weight(&"Sibiu", &"Fagaras"), Some(99));
        assert_eq!(g.weight(&"Arad", &"Bucharest"), None);

        assert!(!g.insert("Arad", "Arad", 1));
        assert!(!g.insert("Arad", "Sibiu", 200));
        assert!(g.insert("Arad", "Sibiu", 100));
        assert_eq!(g.weight(&"Arad", &"Sibiu"), Some(100));
        assert_eq!(g.weight(&"Sibiu", &"Arad"), Some(140));

        let neighbours: Vec<&str> = g.edges(&"Sibiu").map(|(n, _)| *n).collect();
        assert_eq!(neighbours, vec!["Arad", "Fagaras", "Rimnicu Vilcea"]);
        assert_eq!(g.edges(&"Iasi").count(), 0);
    }

    #[test]
    fn dot() {
        let mut g = Graph::new();
        g.connect("Arad", "Sibiu", 140);
        g.insert("Sibiu", "Fagaras", 99);
        g.add_node("Iasi");

        let undirected = g.dot(false).to_string();
        assert_eq!(
            undirected,
            "graph G {\n\
             0 [label=\"Arad\"];\n\
             1 [label=\"Sibiu\"];\n\
             2 [label=\"Fagaras\"];\n\
             3 [label=\"Iasi\"];\n\
             0--1 [label=140];\n\
             1--2 [label=99];\n\
             }\n"
        );

        let directed = g.dot(true).to_string();
        let edges: Vec<&str> = directed.lines().filter(|l| l.contains("->")).collect();
        assert_eq!(
            edges,
            vec!["0->1 [label=140];", "1->0 [label=140];", "1->2 [label=99];"]
        );
        assert!(directed.starts_with("digraph G {"));
    }

    #[test]
    fn route_problem() {
        let g = romania_fragment();
        let route = g.route("Arad", "Bucharest");
        assert_eq!(route.initial(), "Arad");
        assert!(route.goal_test(&"Bucharest"));
        assert_eq!(route.actions(&"Arad"), vec!["Sibiu", "Timisoara"]);
        assert_eq!(route.step_cost(&"Arad", &"Sibiu", &"Sibiu"), 140);
    }

    #[test]
    fn find_path() {
        let g = romania_fragment();
        let path = g.find_path("Arad", "Bucharest").unwrap();
        assert_eq!(path.cost(), 418);
        assert_eq!(
            path.states(),
            &["Arad", "Sibiu", "Rimnicu Vilcea", "Pitesti", "Bucharest"]
        );
        assert_eq!(path.len(), 4);

        assert!(g.find_path("Arad", "Iasi").is_none());
        assert_eq!(g.find_path("Arad", "Arad").map(|p| p.cost()), Some(0));
    }
}
