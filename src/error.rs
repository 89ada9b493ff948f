//! Error types for the clique percolation engine

use std::time::Duration;
use thiserror::Error;

/// Smallest clique size the percolation method accepts
pub const MIN_CLIQUE_SIZE: usize = 3;

/// Violations of the simple undirected graph contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGraph {
    #[error("self-loop on node {node}")]
    SelfLoop { node: u32 },

    #[error("duplicate edge {first}-{second}")]
    DuplicateEdge { first: u32, second: u32 },

    #[error("edge endpoint {node} is outside the graph ({node_count} nodes)")]
    NodeOutOfRange { node: u32, node_count: usize },

    #[error("expected {expected} adjacency offsets, found {found}")]
    OffsetCount { expected: usize, found: usize },

    #[error("inconsistent adjacency list for node {node}")]
    CorruptAdjacency { node: u32 },

    #[error("edge {from}-{to} is missing its reverse direction")]
    AsymmetricEdge { from: u32, to: u32 },
}

/// Errors returned by a percolation run
#[derive(Debug, Error)]
pub enum CpmError {
    #[error("invalid clique size k={k}: must be at least {}", MIN_CLIQUE_SIZE)]
    InvalidParameter { k: usize },

    #[error("malformed graph input: {0}")]
    MalformedGraph(#[from] MalformedGraph),

    #[error("run aborted by observer after enumerating {clique_size}-cliques")]
    Aborted { clique_size: usize },

    #[error("time budget of {budget:?} exceeded after {elapsed:?} ({clique_size}-cliques enumerated)")]
    BudgetExceeded {
        budget: Duration,
        elapsed: Duration,
        clique_size: usize,
    },
}

pub type CpmResult<T> = std::result::Result<T, CpmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = CpmError::InvalidParameter { k: 2 };
        assert_eq!(err.to_string(), "invalid clique size k=2: must be at least 3");

        let err: CpmError = MalformedGraph::DuplicateEdge { first: 1, second: 4 }.into();
        assert_eq!(err.to_string(), "malformed graph input: duplicate edge 1-4");
    }
}
