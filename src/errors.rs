use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathFinderError {
    /// Edge cost requested for two nodes that are not neighbors
    #[error("no edge from {from} to {to}")]
    NotAdjacent { from: String, to: String },

    /// Search gave up after finalizing `limit` nodes
    #[error("search expanded {limit} nodes without finishing")]
    ExpansionLimitReached { limit: usize },

    /// Path cost to `node` does not fit in the cost type
    #[error("path cost to {node} overflows the cost type")]
    CostOverflow { node: String },

    #[error("unexpected character {found:?} at row {row}, column {column}")]
    InvalidGrid { row: usize, column: usize, found: char },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, found: usize },
}
