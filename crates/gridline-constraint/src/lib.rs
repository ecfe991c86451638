//! Difference-constraint solving for grid line coordinates.
//!
//! This crate implements:
//! - Weighted, invalidatable arcs encoding `x[dst] >= x[src] + weight`
//! - Reverse-postorder topological sorting of arc sets
//! - A Bellman-Ford variant that repairs infeasible systems by dropping
//!   maximum constraints one at a time

mod graph;
mod solver;

pub use graph::{describe_arcs, group_by_source, topological_sort, Arc, WeightId};
pub use solver::{solve, SolveReport};
