use crate::graph::Graph;
use super::PathTree;

/// Construct the path from the root of the tree to the given entry
/// Returns the ordered path as a vector of nodes from start to `index`
/// tree: PathTree<G> - arena of entries linked to their parent by index
/// index: usize - index of the last entry of the path in the tree
pub(crate) fn path_to_root<G: Graph>(tree: &PathTree<'_, G>, index: usize) -> Vec<G::Node> {

    let mut path = Vec::new();
    let mut current = Some(index);

    // Trace back from the entry to the root
    while let Some(current_index) = current {
        path.push(tree.node(current_index).clone());
        current = tree.parent(current_index);
    }

    // The path is in reverse order, so reverse it
    path.reverse();
    path
}
