//! Problems which the search algorithms can be pointed at.

pub mod edges;
pub mod random;
pub mod romania;
pub mod tsp;
