use crate::errors::PathFinderError;

use std::{fmt::Debug, hash::Hash};
use num_traits::{CheckedAdd, Zero};


/// A node that can be searched by the path finder
///
/// Node names must be unique within a graph. `Eq` and `Hash` must be derived
/// from the name alone: two nodes with the same name are the same node to the
/// search, even if they differ otherwise.
pub trait GraphNode: Clone + Eq + Hash + Debug {
    /// Key used for identity and to break ties between equal cost nodes
    type Name: Ord + Debug + ?Sized;

    fn name(&self) -> &Self::Name;
}


/// A weighted graph the path finder can traverse
///
/// The graph must not change while a search is running.
pub trait Graph {
    type Node: GraphNode;
    type Cost: Zero + CheckedAdd + Ord + Copy + Debug;

    /// Nodes directly reachable from `node`, in no particular order
    /// Must not contain `node` itself
    fn neighbors(&self, node: &Self::Node) -> impl IntoIterator<Item = Self::Node>;

    /// Cost of traveling from `from` to its neighbor `to`, zero or greater
    /// Fails with `PathFinderError::NotAdjacent` if `to` is not a neighbor of `from`
    fn edge_cost(&self, from: &Self::Node, to: &Self::Node) -> Result<Self::Cost, PathFinderError>;

    /// Heuristic estimate of the cost from `node` to `target`, zero or greater
    /// The estimate must never exceed the true remaining cost (admissible),
    /// otherwise returned paths may not be the cheapest
    fn estimate_cost(&self, node: &Self::Node, target: &Self::Node) -> Self::Cost;
}
