use crate::collections::FxIndexMap;
use crate::errors::PathFinderError;
use crate::graph::{Graph, GraphNode};
use super::PathTree;

use std::{cmp::Ordering, collections::BTreeSet};


/// How a `PathNodeSet` orders its members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetOrder {
    /// Lowest F cost first, ties broken by node name (open list)
    Cost,
    /// Order in which entries were added (closed list)
    Insertion,
}


/// Place of an entry in the cost ordered index
/// The F cost is a snapshot taken when the entry was added
struct OrderKey<N, C> {
    f_cost: C,
    node: N,
    index: usize,
}

impl<N: GraphNode, C: Ord> Ord for OrderKey<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost.cmp(&other.f_cost)
            .then_with(|| self.node.name().cmp(other.node.name()))
    }
}
impl<N: GraphNode, C: Ord> PartialOrd for OrderKey<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<N: GraphNode, C: Ord> PartialEq for OrderKey<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<N: GraphNode, C: Ord> Eq for OrderKey<N, C> {}


/// Set of search entries with hashed lookup by node
///
/// With `SetOrder::Cost` a second index keeps the entries sorted by
/// (F cost, name). Keys in that index are frozen at insertion, so an entry
/// whose F cost changes must be removed before it is rebound and added again.
pub(crate) struct PathNodeSet<G: Graph> {
    // node -> (arena index, F cost snapshot when sorted)
    members: FxIndexMap<G::Node, (usize, Option<G::Cost>)>,
    sorted: Option<BTreeSet<OrderKey<G::Node, G::Cost>>>,
}

impl<G: Graph> PathNodeSet<G> {

    pub(crate) fn new(order: SetOrder) -> Self {
        Self {
            members: FxIndexMap::default(),
            sorted: match order {
                SetOrder::Cost => Some(BTreeSet::new()),
                SetOrder::Insertion => None,
            },
        }
    }

    pub(crate) fn contains(&self, node: &G::Node) -> bool {
        self.members.contains_key(node)
    }

    /// Arena index of the entry wrapping `node`
    pub(crate) fn lookup(&self, node: &G::Node) -> Option<usize> {
        self.members.get(node).map(|&(index, _)| index)
    }

    /// Add an entry, computing its F cost when the set is sorted
    /// The node must not already be in the set
    pub(crate) fn add(&mut self, tree: &mut PathTree<'_, G>, index: usize) -> Result<(), PathFinderError> {
        let node = tree.node(index).clone();
        let snapshot = match &mut self.sorted {
            Some(sorted) => {
                let f_cost = tree.f_cost(index)?;
                let inserted = sorted.insert(OrderKey { f_cost, node: node.clone(), index });
                debug_assert!(inserted, "path node set already holds {node:?}");
                Some(f_cost)
            }
            None => None,
        };
        self.members.insert(node, (index, snapshot));
        self.check_consistency("add");
        Ok(())
    }

    /// Remove the entry wrapping `node`, returns its arena index
    pub(crate) fn remove(&mut self, node: &G::Node) -> Option<usize> {
        // insertion order only matters for unsorted sets
        let (index, snapshot) = match self.sorted {
            Some(_) => self.members.swap_remove(node)?,
            None => self.members.shift_remove(node)?,
        };
        if let (Some(sorted), Some(f_cost)) = (&mut self.sorted, snapshot) {
            sorted.remove(&OrderKey { f_cost, node: node.clone(), index });
        }
        self.check_consistency("remove");
        Some(index)
    }

    /// Remove and return the first entry: lowest (F, name) when sorted,
    /// oldest otherwise
    pub(crate) fn pop_min(&mut self) -> Option<usize> {
        match &mut self.sorted {
            Some(sorted) => {
                let key = sorted.pop_first()?;
                self.members.swap_remove(&key.node);
                self.check_consistency("pop_min");
                Some(key.index)
            }
            None => self.members.shift_remove_index(0).map(|(_, (index, _))| index),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Arena indices in set order
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let (by_cost, by_insertion) = match &self.sorted {
            Some(sorted) => (Some(sorted.iter().map(|key| key.index)), None),
            None => (None, Some(self.members.values().map(|&(index, _)| index))),
        };
        by_cost.into_iter().flatten().chain(by_insertion.into_iter().flatten())
    }

    /// Both indexes must always hold the same entries
    fn check_consistency(&self, operation: &str) {
        if let Some(sorted) = &self.sorted {
            assert_eq!(
                sorted.len(),
                self.members.len(),
                "sorted path node set out of sync after {operation}"
            );
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{UndirectedWeightedGraph, Vertex};

    // Star around "hub" with spokes of different weight
    fn create_star_graph() -> UndirectedWeightedGraph<u32> {
        let mut graph = UndirectedWeightedGraph::new();
        graph.add_edge(Vertex::new("hub"), Vertex::new("d"), 2);
        graph.add_edge(Vertex::new("hub"), Vertex::new("b"), 5);
        graph.add_edge(Vertex::new("hub"), Vertex::new("c"), 2);
        graph.add_edge(Vertex::new("hub"), Vertex::new("a"), 7);
        graph.add_edge(Vertex::new("a"), Vertex::new("d"), 1);
        graph
    }

    // Inserts hub as root and every spoke as its child
    fn create_tree(graph: &UndirectedWeightedGraph<u32>) -> (PathTree<'_, UndirectedWeightedGraph<u32>>, Vec<usize>) {
        let mut tree = PathTree::new(graph, None);
        let hub = tree.insert(Vertex::new("hub"));
        tree.g_cost(hub).unwrap();
        let mut spokes = Vec::new();
        for name in ["d", "b", "c", "a"] {
            let index = tree.insert(Vertex::new(name));
            tree.rebind(index, hub);
            spokes.push(index);
        }
        (tree, spokes)
    }

    fn names(set: &PathNodeSet<UndirectedWeightedGraph<u32>>, tree: &PathTree<'_, UndirectedWeightedGraph<u32>>) -> Vec<String> {
        set.iter().map(|index| tree.node(index).name().to_string()).collect()
    }

    #[test]
    fn test_sorted_set_orders_by_cost_then_name() {
        let graph = create_star_graph();
        let (mut tree, spokes) = create_tree(&graph);
        let mut open = PathNodeSet::new(SetOrder::Cost);

        for index in spokes {
            open.add(&mut tree, index).unwrap();
        }

        // c and d tie on cost 2
        assert_eq!(names(&open, &tree), vec!["c", "d", "b", "a"]);
        assert_eq!(open.len(), 4);
    }

    #[test]
    fn test_unsorted_set_keeps_insertion_order() {
        let graph = create_star_graph();
        let (mut tree, spokes) = create_tree(&graph);
        let mut closed = PathNodeSet::new(SetOrder::Insertion);

        for index in spokes {
            closed.add(&mut tree, index).unwrap();
        }
        assert_eq!(names(&closed, &tree), vec!["d", "b", "c", "a"]);

        closed.remove(&Vertex::new("b"));
        assert_eq!(names(&closed, &tree), vec!["d", "c", "a"]);

        let oldest = closed.pop_min().unwrap();
        assert_eq!(tree.node(oldest).name(), "d");
        assert_eq!(names(&closed, &tree), vec!["c", "a"]);
    }

    #[test]
    fn test_pop_min_drains_in_order() {
        let graph = create_star_graph();
        let (mut tree, spokes) = create_tree(&graph);
        let mut open = PathNodeSet::new(SetOrder::Cost);
        for index in spokes {
            open.add(&mut tree, index).unwrap();
        }

        let mut popped = Vec::new();
        while let Some(index) = open.pop_min() {
            assert!(!open.contains(tree.node(index)));
            popped.push(tree.node(index).name().to_string());
        }
        assert_eq!(popped, vec!["c", "d", "b", "a"]);
        assert_eq!(open.len(), 0);
        assert!(open.is_empty());
        assert_eq!(open.pop_min(), None);
    }

    #[test]
    fn test_lookup_and_remove() {
        let graph = create_star_graph();
        let (mut tree, spokes) = create_tree(&graph);
        let mut open = PathNodeSet::new(SetOrder::Cost);
        assert!(open.is_empty());
        open.add(&mut tree, spokes[0]).unwrap();
        assert!(!open.is_empty());

        assert!(open.contains(&Vertex::new("d")));
        assert_eq!(open.lookup(&Vertex::new("d")), Some(spokes[0]));
        assert_eq!(open.lookup(&Vertex::new("a")), None);

        assert_eq!(open.remove(&Vertex::new("a")), None);
        assert_eq!(open.remove(&Vertex::new("d")), Some(spokes[0]));
        assert_eq!(open.remove(&Vertex::new("d")), None);
        assert_eq!(open.len(), 0);
    }

    #[test]
    fn test_decrease_key_by_remove_and_readd() {
        let graph = create_star_graph();
        let (mut tree, spokes) = create_tree(&graph);
        let mut open = PathNodeSet::new(SetOrder::Cost);
        for &index in &spokes {
            open.add(&mut tree, index).unwrap();
        }

        // a is 7 from hub, but only 3 through d
        let a = spokes[3];
        let d = spokes[0];
        tree.g_cost(d).unwrap();
        open.remove(&Vertex::new("a"));
        tree.rebind(a, d);
        open.add(&mut tree, a).unwrap();

        assert_eq!(tree.g_cost(a).unwrap(), 3);
        assert_eq!(names(&open, &tree), vec!["c", "d", "a", "b"]);
        assert_eq!(open.lookup(&Vertex::new("a")), Some(a));
    }

    #[test]
    #[should_panic(expected = "out of sync")]
    fn test_duplicate_add_is_fatal() {
        let graph = create_star_graph();
        let (mut tree, spokes) = create_tree(&graph);
        let mut open = PathNodeSet::new(SetOrder::Cost);
        open.add(&mut tree, spokes[3]).unwrap();

        // same node, different cost snapshot
        tree.g_cost(spokes[0]).unwrap();
        tree.rebind(spokes[3], spokes[0]);
        open.add(&mut tree, spokes[3]).unwrap();
    }

    #[test]
    #[should_panic(expected = "already holds")]
    fn test_duplicate_add_with_same_cost_is_fatal() {
        let graph = create_star_graph();
        let (mut tree, spokes) = create_tree(&graph);
        let mut open = PathNodeSet::new(SetOrder::Cost);

        // unchanged entry, so the sorted index sees an identical key
        open.add(&mut tree, spokes[1]).unwrap();
        open.add(&mut tree, spokes[1]).unwrap();
    }
}
