use crate::errors::PathFinderError;
use crate::graph::{Graph, GraphNode};

use num_traits::{CheckedAdd, Zero};


/// Search entry wrapping one graph node for the duration of a search
/// Costs are cached, `None` means not yet computed
#[derive(Debug)]
struct PathNode<N, C> {
    node: N,
    parent: Option<usize>, // index of the previous entry on the current best path
    g_cost: Option<C>, // cost from the start along the current best path
    h_cost: C, // heuristic estimate to the target, fixed at creation
    f_cost: Option<C>, // g_cost + h_cost
}


/// Arena owning every entry discovered during one search
/// Entries refer to their parent by index, so the parent links form a tree
/// rooted at the start node
pub(crate) struct PathTree<'g, G: Graph> {
    graph: &'g G,
    target: Option<G::Node>,
    nodes: Vec<PathNode<G::Node, G::Cost>>,
}

impl<'g, G: Graph> PathTree<'g, G> {

    /// Create an empty tree
    /// Without a target every entry gets a heuristic of zero (Dijkstra)
    pub(crate) fn new(graph: &'g G, target: Option<G::Node>) -> Self {
        Self {
            graph,
            target,
            nodes: Vec::new(),
        }
    }

    /// Add an entry without a parent, returns its index
    /// The heuristic is evaluated here, exactly once per entry
    pub(crate) fn insert(&mut self, node: G::Node) -> usize {
        let h_cost = match &self.target {
            Some(target) => self.graph.estimate_cost(&node, target),
            None => Zero::zero(),
        };
        self.nodes.push(PathNode {
            node,
            parent: None,
            g_cost: None,
            h_cost,
            f_cost: None,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn node(&self, index: usize) -> &G::Node {
        &self.nodes[index].node
    }

    pub(crate) fn parent(&self, index: usize) -> Option<usize> {
        self.nodes[index].parent
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if a target is set and the entry wraps it
    pub(crate) fn is_target(&self, index: usize) -> bool {
        self.target.as_ref().is_some_and(|target| *target == self.nodes[index].node)
    }

    /// Attach the entry to a new parent
    /// Clears the cached G and F, H is path independent and stays
    /// The parent's G must already be known; cycles are not checked
    pub(crate) fn rebind(&mut self, index: usize, parent: usize) {
        debug_assert!(self.nodes[parent].g_cost.is_some(), "parent cost must be final before rebinding");
        let entry = &mut self.nodes[index];
        entry.parent = Some(parent);
        entry.g_cost = None;
        entry.f_cost = None;
    }

    pub(crate) fn h_cost(&self, index: usize) -> G::Cost {
        self.nodes[index].h_cost
    }

    /// Cost from the root to this entry along the current parent chain
    /// Walks up to the closest entry with a known cost, then fills in the
    /// costs on the way back down
    pub(crate) fn g_cost(&mut self, index: usize) -> Result<G::Cost, PathFinderError> {
        let mut pending = Vec::new();
        let mut current = index;

        let mut cost = loop {
            let entry = &mut self.nodes[current];
            match (entry.g_cost, entry.parent) {
                (Some(g_cost), _) => break g_cost,
                (None, None) => {
                    // root of the tree
                    entry.g_cost = Some(Zero::zero());
                    break Zero::zero();
                }
                (None, Some(parent)) => {
                    pending.push(current);
                    current = parent;
                }
            }
        };

        // pending holds the uncached entries from `index` upwards
        let mut parent = current;
        while let Some(child) = pending.pop() {
            let edge_cost = self.graph.edge_cost(&self.nodes[parent].node, &self.nodes[child].node)?;
            cost = self.add_costs(cost, edge_cost, child)?;
            self.nodes[child].g_cost = Some(cost);
            parent = child;
        }

        Ok(cost)
    }

    /// Estimated total cost of a path through this entry, F = G + H
    pub(crate) fn f_cost(&mut self, index: usize) -> Result<G::Cost, PathFinderError> {
        if let Some(f_cost) = self.nodes[index].f_cost {
            return Ok(f_cost);
        }
        let g_cost = self.g_cost(index)?;
        let f_cost = self.add_costs(g_cost, self.nodes[index].h_cost, index)?;
        self.nodes[index].f_cost = Some(f_cost);
        Ok(f_cost)
    }

    /// Sum of two costs for the entry at `index`
    /// Fails with `PathFinderError::CostOverflow` naming that entry
    pub(crate) fn add_costs(&self, cost: G::Cost, extra: G::Cost, index: usize) -> Result<G::Cost, PathFinderError> {
        cost.checked_add(&extra).ok_or_else(|| PathFinderError::CostOverflow {
            node: format!("{:?}", self.nodes[index].node.name()),
        })
    }
}
