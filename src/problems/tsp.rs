//! The travelling salesman problem, searched one city at a time.
//!
//! A state is the tour so far, starting (and eventually ending) at
//! city 0. Weights are symmetric.

use std::io::{BufRead, BufReader, Read};

use permutohedron::Heap;
use rand::{rngs::StdRng, Rng, SeedableRng};
use searcher::{AStar, Heuristic, LowH, Problem};
use thiserror::Error;

use crate::{solve, DriverError, Options};

type Error = anyhow::Error;

pub type Tour = Vec<usize>;

#[derive(Debug, Error)]
pub enum TspError {
    #[error("Row {0} has {1} weights, expected {2}")]
    NotSquare(usize, usize, usize),

    #[error("Weight from {0} to {1} differs from {1} to {0}")]
    Asymmetric(usize, usize),

    #[error("A tour needs at least 3 cities, got {0}")]
    TooSmall(usize),

    #[error("Invalid weight {0:?}")]
    InvalidWeight(String),

    #[error("Unable to read weights")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tsp {
    weights: Vec<Vec<u32>>,

    // Every edge weight, cheapest first.
    cheapest: Vec<u32>,
}

impl Tsp {
    pub fn new(weights: Vec<Vec<u32>>) -> Result<Self, TspError> {
        let n = weights.len();
        if n < 3 {
            return Err(TspError::TooSmall(n));
        }

        for (i, row) in weights.iter().enumerate() {
            if row.len() != n {
                return Err(TspError::NotSquare(i, row.len(), n));
            }
        }

        let mut cheapest = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                if weights[i][j] != weights[j][i] {
                    return Err(TspError::Asymmetric(i, j));
                }
                cheapest.push(weights[i][j]);
            }
        }
        cheapest.sort_unstable();

        Ok(Tsp { weights, cheapest })
    }

    /// The four city instance with edges weighted 1, 2, 4, 7, 11 and 16.
    pub fn minimal() -> Self {
        let weights = vec![
            vec![0, 1, 2, 4],
            vec![1, 0, 7, 11],
            vec![2, 7, 0, 16],
            vec![4, 11, 16, 0],
        ];
        let cheapest = vec![1, 2, 4, 7, 11, 16];
        Tsp { weights, cheapest }
    }

    /// A random instance with weights between 1 and 500.
    pub fn random(cities: usize, seed: u64) -> Result<Self, TspError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut weights = vec![vec![0; cities]; cities];
        for i in 0..cities {
            for j in (i + 1)..cities {
                let w = rng.gen_range(1..=500);
                weights[i][j] = w;
                weights[j][i] = w;
            }
        }
        Tsp::new(weights)
    }

    /// Read a weight matrix, one row per line.
    pub fn read<R: Read>(input: R) -> Result<Self, TspError> {
        let mut weights = Vec::new();
        for line in BufReader::new(input).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|w| w.parse().map_err(|_| TspError::InvalidWeight(w.to_string())))
                .collect::<Result<Vec<u32>, TspError>>()?;
            weights.push(row);
        }
        Tsp::new(weights)
    }

    pub fn cities(&self) -> usize {
        self.weights.len()
    }

    pub fn weight(&self, from: usize, to: usize) -> u32 {
        self.weights[from][to]
    }

    pub fn tour_cost(&self, tour: &[usize]) -> u32 {
        tour.windows(2).map(|w| self.weight(w[0], w[1])).sum()
    }

    /// Check every tour. Only feasible for a handful of cities.
    pub fn brute_force(&self) -> (Tour, u32) {
        let mut rest: Vec<usize> = (1..self.cities()).collect();
        let mut best = (Vec::new(), u32::max_value());

        for order in Heap::new(&mut rest) {
            let mut tour = Vec::with_capacity(self.cities() + 1);
            tour.push(0);
            tour.extend(order);
            tour.push(0);

            let cost = self.tour_cost(&tour);
            if cost < best.1 {
                best = (tour, cost);
            }
        }
        best
    }

    pub fn heuristic(&self) -> MinimalFeasibleTour<'_> {
        MinimalFeasibleTour(self)
    }
}

impl Problem for Tsp {
    type State = Tour;
    type Action = usize;
    type Cost = u32;

    fn initial(&self) -> Tour {
        vec![0]
    }

    fn goal_test(&self, state: &Tour) -> bool {
        state.len() == self.cities() + 1
    }

    fn actions(&self, state: &Tour) -> Vec<usize> {
        let n = self.cities();
        if state.len() > n {
            Vec::new()
        } else if state.len() == n {
            vec![0]
        } else {
            (1..n).filter(|c| !state.contains(c)).collect()
        }
    }

    fn result(&self, state: &Tour, action: &usize) -> Tour {
        let mut next = state.clone();
        next.push(*action);
        next
    }

    fn step_cost(&self, state: &Tour, action: &usize, _next: &Tour) -> u32 {
        let here = state.last().copied().unwrap_or(0);
        self.weight(here, *action)
    }
}

/// Cost of the remaining legs if each one took the cheapest edges left
/// in the whole instance.
#[derive(Debug, Clone, Copy)]
pub struct MinimalFeasibleTour<'t>(&'t Tsp);

impl<'t> Heuristic<Tour, u32> for MinimalFeasibleTour<'t> {
    fn h(&self, state: &Tour) -> u32 {
        let remaining = (self.0.cities() + 1).saturating_sub(state.len());
        self.0.cheapest.iter().take(remaining).sum()
    }
}

fn format_tour(tour: &[usize]) -> String {
    tour.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub(crate) fn main(options: &Options, input: Box<dyn Read + 'static>) -> Result<(), Error> {
    let tsp = match options.nodes {
        Some(cities) => Tsp::random(cities, options.seed)?,
        None => match Tsp::read(input) {
            Ok(tsp) => tsp,
            Err(TspError::TooSmall(0)) => Tsp::minimal(),
            Err(e) => return Err(e.into()),
        },
    };

    let h = tsp.heuristic();
    let solution = solve(&tsp, options.algorithm, AStar::new(h), LowH::new(h))
        .map_err(|e| DriverError::NoPath("0".to_string(), e))?;

    println!("Tour: {}", format_tour(&solution.states.last().cloned().unwrap_or_default()));
    println!("Cost: {}", solution.cost);
    if options.stats {
        println!("Statistics: {}", solution.statistics);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::Algorithm;

    #[test]
    fn minimal_tour() {
        let tsp = Tsp::minimal();
        assert_eq!(tsp, Tsp::new(tsp.weights.clone()).unwrap());

        let h = tsp.heuristic();
        for algorithm in &[Algorithm::Graph, Algorithm::Tree, Algorithm::Rbfs] {
            let solution = solve(&tsp, *algorithm, AStar::new(h), LowH::new(h)).unwrap();
            assert_eq!(solution.cost, 24, "{:?}", algorithm);

            let tour = solution.goal().unwrap();
            assert_eq!(tour.len(), 5);
            assert_eq!(tsp.tour_cost(tour), 24);
        }

        assert_eq!(tsp.brute_force().1, 24);
    }

    #[test]
    fn search_matches_brute_force() {
        let tsp = Tsp::random(6, 7).unwrap();
        let (_, best) = tsp.brute_force();

        let h = tsp.heuristic();
        let solution = solve(&tsp, Algorithm::Graph, AStar::new(h), LowH::new(h)).unwrap();
        assert_eq!(solution.cost, best);
    }

    #[test]
    fn heuristic_is_admissible() {
        let tsp = Tsp::random(5, 3).unwrap();
        let h = tsp.heuristic();
        let (tour, cost) = tsp.brute_force();

        for k in 1..tour.len() {
            let rest = tsp.tour_cost(&tour[k - 1..]);
            assert!(h.h(&tour[..k].to_vec()) <= rest);
        }
        assert_eq!(h.h(&tsp.initial()), tsp.cheapest[..5].iter().sum::<u32>());
        assert!(h.h(&tsp.initial()) <= cost);
        assert_eq!(h.h(&tour), 0);
    }

    #[test]
    fn actions_close_the_tour() {
        let tsp = Tsp::minimal();
        assert_eq!(tsp.actions(&vec![0]), vec![1, 2, 3]);
        assert_eq!(tsp.actions(&vec![0, 2]), vec![1, 3]);
        assert_eq!(tsp.actions(&vec![0, 2, 1, 3]), vec![0]);
        assert!(tsp.actions(&vec![0, 2, 1, 3, 0]).is_empty());
    }

    #[test]
    fn read_matrix() {
        let input = "# minimal\n0 1 2 4\n1 0 7 11\n2 7 0 16\n4 11 16 0\n";
        assert_eq!(Tsp::read(input.as_bytes()).unwrap(), Tsp::minimal());

        assert!(matches!(
            Tsp::read("0 1\n1 0 3\n".as_bytes()),
            Err(TspError::TooSmall(2))
        ));
        assert!(matches!(
            Tsp::read("0 1 2\n1 0 3\n2 4 0\n".as_bytes()),
            Err(TspError::Asymmetric(1, 2))
        ));
        assert!(matches!(
            Tsp::read("0 1 2\n1 0\n2 3 0\n".as_bytes()),
            Err(TspError::NotSquare(1, 2, 3))
        ));
        assert!(matches!(
            Tsp::read("0 x 2\n".as_bytes()),
            Err(TspError::InvalidWeight(_))
        ));
    }
}
