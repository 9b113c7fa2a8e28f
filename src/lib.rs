#![doc = include_str!("../README.md")]

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod graphs;

pub use collections::{FxIndexMap, FxIndexSet};
pub use errors::PathFinderError;
pub use graph::{Graph, GraphNode};
pub use graph_algos::PathFinder;
pub use graphs::{Cell, GridGraph, UndirectedWeightedGraph, Vertex};
