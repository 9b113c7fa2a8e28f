//! Ready made graphs for the path finder

mod grid;
mod undirected;

pub use grid::{Cell, GridGraph};
pub use undirected::{UndirectedWeightedGraph, Vertex};
