use crate::collections::FxIndexMap;
use crate::errors::PathFinderError;
use crate::graph::{Graph, GraphNode};

use std::fmt::{self, Debug, Display};
use num_traits::{CheckedAdd, Zero};


/// Graph node identified by a name
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    name: String,
}

impl Vertex {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl GraphNode for Vertex {
    type Name = str;

    fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Vertex {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}


/// Undirected graph with weighted edges between named vertices
/// Has no heuristic, so searches on it run as Dijkstra's algorithm
#[derive(Clone, Debug)]
pub struct UndirectedWeightedGraph<C> {
    // vertex -> (neighbor -> edge weight), both directions are stored
    adjacency: FxIndexMap<Vertex, FxIndexMap<Vertex, C>>,
}

impl<C> Default for UndirectedWeightedGraph<C> {
    fn default() -> Self {
        Self { adjacency: FxIndexMap::default() }
    }
}

impl<C: Zero + CheckedAdd + Ord + Copy + Debug> UndirectedWeightedGraph<C> {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, possibly without any edges
    pub fn add_node(&mut self, vertex: Vertex) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Connect two vertices, replacing the weight of an existing edge
    /// Self loops are ignored, they never lie on a cheapest path
    pub fn add_edge(&mut self, a: Vertex, b: Vertex, weight: C) {
        if a == b {
            self.add_node(a);
            return;
        }
        self.adjacency.entry(a.clone()).or_default().insert(b.clone(), weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
    }

    pub fn contains_node(&self, vertex: &Vertex) -> bool {
        self.adjacency.contains_key(vertex)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum::<usize>() / 2
    }

    /// Vertices in the order they were first added
    pub fn nodes(&self) -> impl Iterator<Item = &Vertex> {
        self.adjacency.keys()
    }
}

impl<C: Zero + CheckedAdd + Ord + Copy + Debug> Graph for UndirectedWeightedGraph<C> {
    type Node = Vertex;
    type Cost = C;

    fn neighbors(&self, node: &Vertex) -> impl IntoIterator<Item = Vertex> {
        self.adjacency.get(node)
            .into_iter()
            .flat_map(|edges| edges.keys().cloned())
    }

    fn edge_cost(&self, from: &Vertex, to: &Vertex) -> Result<C, PathFinderError> {
        self.adjacency.get(from)
            .and_then(|edges| edges.get(to))
            .copied()
            .ok_or_else(|| PathFinderError::NotAdjacent {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    fn estimate_cost(&self, _node: &Vertex, _target: &Vertex) -> C {
        Zero::zero()
    }
}
