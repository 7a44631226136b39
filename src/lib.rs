#![deny(clippy::all)]

use clap::{value_t, App, Arg, ArgMatches};

use anyhow::anyhow;
use lazy_static::lazy_static;
use paste::paste;
use thiserror::Error;
use tracing::Level;

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::str::FromStr;

pub mod problems;
mod solve;

pub use solve::{solve, Solution};

type Error = anyhow::Error;
type Actor =
    Box<dyn (Fn(&Options, Box<dyn std::io::Read>) -> Result<(), Error>) + Send + Sync + 'static>;

macro_rules! problem {
    ($name:ident) => {
        paste! {
            (stringify!([<$name:lower>]), Box::new(problems::[<$name:lower>]::main))
        }
    };
}

lazy_static! {
    static ref SOLVERS: BTreeMap<&'static str, Actor> = {
        let mut s: BTreeMap<&'static str, Actor> = BTreeMap::new();
        let problems: Vec<(&'static str, Actor)> = vec![
            problem!(Romania),
            problem!(Tsp),
            problem!(Random),
            problem!(Edges),
        ];

        for (name, func) in problems.into_iter() {
            s.insert(name, func);
        }

        s
    };
}

/// Which search algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Graph,
    Tree,
    Rbfs,
}

impl FromStr for Algorithm {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "graph" => Ok(Algorithm::Graph),
            "tree" => Ok(Algorithm::Tree),
            "rbfs" => Ok(Algorithm::Rbfs),
            other => Err(DriverError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Settings shared by every problem.
#[derive(Debug, Clone)]
pub struct Options {
    pub algorithm: Algorithm,
    pub from: Option<String>,
    pub to: Option<String>,
    pub nodes: Option<usize>,
    pub branching: usize,
    pub seed: u64,
    pub stats: bool,
    pub dot: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            algorithm: Algorithm::Graph,
            from: None,
            to: None,
            nodes: None,
            branching: 4,
            seed: 0,
            stats: false,
            dot: false,
        }
    }
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Result<Self, Error> {
        let algorithm = matches
            .value_of("algorithm")
            .unwrap_or("graph")
            .parse::<Algorithm>()?;

        let nodes = match matches.value_of("nodes") {
            Some(_) => Some(value_t!(matches, "nodes", usize)?),
            None => None,
        };

        Ok(Options {
            algorithm,
            from: matches.value_of("from").map(|s| s.to_string()),
            to: matches.value_of("to").map(|s| s.to_string()),
            nodes,
            branching: value_t!(matches, "branching", usize)?,
            seed: value_t!(matches, "seed", u64)?,
            stats: matches.is_present("stats"),
            dot: matches.is_present("dot"),
        })
    }
}

pub fn solver() -> Result<(), Error> {
    let names: Vec<&str> = SOLVERS.keys().copied().collect();
    let matches = App::new("Best-first search")
        .version("1.0")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Solve search problems with best-first search")
        .arg(
            Arg::with_name("problem")
                .value_name("PROBLEM")
                .required(true)
                .takes_value(true)
                .possible_values(&names),
        )
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .required(false)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("algorithm")
                .short("a")
                .long("algorithm")
                .takes_value(true)
                .possible_values(&["graph", "tree", "rbfs"])
                .default_value("graph"),
        )
        .arg(
            Arg::with_name("from")
                .long("from")
                .takes_value(true)
                .help("Where the search starts"),
        )
        .arg(
            Arg::with_name("to")
                .long("to")
                .takes_value(true)
                .help("Where the search should end"),
        )
        .arg(
            Arg::with_name("nodes")
                .short("n")
                .long("nodes")
                .takes_value(true)
                .help("Size of generated problems"),
        )
        .arg(
            Arg::with_name("branching")
                .short("b")
                .long("branching")
                .takes_value(true)
                .default_value("4")
                .help("Branching factor of generated graphs"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .default_value("0")
                .help("Seed for generated problems"),
        )
        .arg(
            Arg::with_name("stats")
                .long("stats")
                .help("Print search statistics"),
        )
        .arg(
            Arg::with_name("dot")
                .long("dot")
                .help("Print generated graphs in Graphviz DOT format instead of searching"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more (repeat for even more)"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let name = matches
        .value_of("problem")
        .ok_or_else(|| anyhow!("A problem is required"))?;
    println!("Problem {}", name);

    let options = Options::from_matches(&matches)?;
    let reader = get_input_reader(matches.value_of("input"))?;

    match SOLVERS.get(name) {
        None => Err(DriverError::ProblemNotFound(name.to_string()).into()),
        Some(actor) => actor(&options, reader),
    }
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

type BoxedRead = Box<dyn ::std::io::Read + 'static>;

pub fn get_input_reader(filename: Option<&str>) -> Result<BoxedRead, Error> {
    let reader: Box<dyn ::std::io::Read + 'static> = match filename {
        Some("-") => Box::new(::std::io::stdin()),
        Some(path) => {
            let f: File = File::open(path)
                .map_err(|e| DriverError::InputNotFound(path.to_string(), e))?;
            Box::new(f)
        }
        None => Box::new(io::empty()),
    };
    Ok(reader)
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("No problem named {0}")]
    ProblemNotFound(String),

    #[error("Unknown search algorithm {0}, expected graph, tree or rbfs")]
    UnknownAlgorithm(String),

    #[error("{0} is not part of this problem")]
    UnknownState(String),

    #[error("No path from {0} to the goal could be found")]
    NoPath(String, #[source] searcher::SearchError),

    #[error("Input not found: {0}")]
    InputNotFound(String, #[source] io::Error),
}
