
pub mod a_star;
mod path_node;
mod path_node_set;
mod shortest_path;

use path_node::PathTree;
use path_node_set::{PathNodeSet, SetOrder};
use shortest_path::path_to_root;

pub use a_star::PathFinder;
