use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::PathFinderError;
use crate::graph::Graph;
use super::{path_to_root, PathNodeSet, PathTree, SetOrder};

use tracing::{debug, trace};


/// Result of one run of the search loop
struct Exploration<'g, G: Graph> {
    tree: PathTree<'g, G>,
    closed_list: PathNodeSet<G>,
    goal_index: Option<usize>, // set when the target was reached
}


/// A* path finder, a generalization of Dijkstra's algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// Returned paths are the cheapest ones as long as:
/// 1. Every edge cost is zero or greater
/// 2. The heuristic of the graph is admissible (never overestimates the remaining cost)
///
/// Neither is checked. Ties between equal cost nodes are broken by node name,
/// so repeated searches on the same graph give the same answer.
pub struct PathFinder<'g, G: Graph> {
    graph: &'g G,
    max_expansions: Option<usize>,
}

impl<'g, G: Graph> PathFinder<'g, G> {

    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_expansions: None,
        }
    }

    /// Abort searches with `PathFinderError::ExpansionLimitReached` once
    /// `limit` nodes have been expanded
    #[must_use]
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Cheapest path from `start` to `end`, both included
    /// Returns `None` if `end` cannot be reached
    pub fn shortest_path(&self, start: &G::Node, end: &G::Node) -> Result<Option<Vec<G::Node>>, PathFinderError> {
        let exploration = self.explore(start, Some(end), None)?;
        Ok(exploration.goal_index.map(|goal_index| path_to_root(&exploration.tree, goal_index)))
    }

    /// Cost of the cheapest path from `start` to `end`
    /// Returns `None` if `end` cannot be reached
    pub fn lowest_cost(&self, start: &G::Node, end: &G::Node) -> Result<Option<G::Cost>, PathFinderError> {
        let mut exploration = self.explore(start, Some(end), None)?;
        exploration.goal_index
            .map(|goal_index| exploration.tree.g_cost(goal_index))
            .transpose()
    }

    /// Every node whose cheapest path from `start` costs at most `max_cost`
    /// `start` is always included. Nodes are in the order their cost became final
    pub fn reachable_within(&self, start: &G::Node, max_cost: G::Cost) -> Result<FxIndexSet<G::Node>, PathFinderError> {
        let exploration = self.explore(start, None, Some(max_cost))?;
        Ok(exploration.closed_list.iter()
            .map(|index| exploration.tree.node(index).clone())
            .collect())
    }

    /// Same nodes as `reachable_within`, each with the cost of its cheapest path
    pub fn costs_within(&self, start: &G::Node, max_cost: G::Cost) -> Result<FxIndexMap<G::Node, G::Cost>, PathFinderError> {
        let Exploration { mut tree, closed_list, .. } = self.explore(start, None, Some(max_cost))?;
        let mut costs = FxIndexMap::default();
        for index in closed_list.iter() {
            let cost = tree.g_cost(index)?;
            costs.insert(tree.node(index).clone(), cost);
        }
        Ok(costs)
    }

    /// Traverses the graph from `start` in order of lowest F cost
    /// With a target, stops as soon as the target is expanded
    /// Without one, expands every node whose cost stays within `max_cost`
    fn explore(&self, start: &G::Node, target: Option<&G::Node>, max_cost: Option<G::Cost>) -> Result<Exploration<'g, G>, PathFinderError> {

        let mut tree = PathTree::new(self.graph, target.cloned());

        // Open List
        // Nodes that need to be evaluated, sorted by f_cost (cost + heuristic)
        let mut open_list: PathNodeSet<G> = PathNodeSet::new(SetOrder::Cost);

        // Closed List
        // Nodes whose cheapest cost is known, no longer need to visit
        let mut closed_list: PathNodeSet<G> = PathNodeSet::new(SetOrder::Insertion);

        let start_index = tree.insert(start.clone());
        open_list.add(&mut tree, start_index)?;

        let mut relaxed = 0usize;
        let mut discarded = 0usize;

        debug!(start = ?start, target = ?target, max_cost = ?max_cost, "starting search");

        while let Some(index) = open_list.pop_min() {

            // Check if we've reached the goal
            if tree.is_target(index) {
                debug!(expanded = closed_list.len(), discovered = tree.len(), relaxed, discarded, "reached target");
                return Ok(Exploration { tree, closed_list, goal_index: Some(index) });
            }

            if let Some(limit) = self.max_expansions {
                if closed_list.len() >= limit {
                    debug!(limit, "expansion limit reached");
                    return Err(PathFinderError::ExpansionLimitReached { limit });
                }
            }

            closed_list.add(&mut tree, index)?;
            let cost = tree.g_cost(index)?;
            let node = tree.node(index).clone();

            // loop over neighbors, their order does not matter
            for neighbor in self.graph.neighbors(&node) {

                // cost of a closed node is already final
                if closed_list.contains(&neighbor) {
                    continue;
                }

                match open_list.lookup(&neighbor) {
                    None => {
                        // This is the first time we're seeing this neighbor
                        let neighbor_index = tree.insert(neighbor);
                        tree.rebind(neighbor_index, index);
                        let neighbor_cost = tree.g_cost(neighbor_index)?;

                        if max_cost.is_none_or(|max_cost| neighbor_cost <= max_cost) {
                            open_list.add(&mut tree, neighbor_index)?;
                        } else {
                            trace!(node = ?tree.node(neighbor_index), cost = ?neighbor_cost, "over budget, discarded");
                            discarded += 1;
                        }
                    }
                    Some(neighbor_index) => {
                        let edge_cost = self.graph.edge_cost(&node, &neighbor)?;
                        let new_cost = tree.add_costs(cost, edge_cost, neighbor_index)?;

                        if new_cost < tree.g_cost(neighbor_index)? {
                            // We've found a better path to this neighbor
                            // re-add so the open list sorts it under its new cost
                            open_list.remove(&neighbor);
                            tree.rebind(neighbor_index, index);
                            open_list.add(&mut tree, neighbor_index)?;
                            trace!(node = ?neighbor, g_cost = ?new_cost, h_cost = ?tree.h_cost(neighbor_index), "relaxed");
                            relaxed += 1;
                        }
                    }
                }
            }
        }

        debug_assert!(open_list.is_empty());
        debug!(expanded = closed_list.len(), discovered = tree.len(), relaxed, discarded, "open list exhausted");
        Ok(Exploration { tree, closed_list, goal_index: None })
    }
}
