//! Percolation of k-cliques into overlapping communities

pub mod percolation;
pub mod detection;
pub mod materialize;
pub mod metrics;

pub use detection::{find_components, Component};
pub use materialize::materialize_communities;
pub use percolation::{build_percolation_graph, PercolationGraph};

use serde::{Serialize, Deserialize};

/// A community: the union of the k-cliques in one percolation component.
///
/// Communities may share nodes with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    /// Position of this community in the run's output
    pub id: u32,

    /// Member node indices, ascending
    pub members: Vec<u32>,

    /// Number of member nodes
    pub size: usize,

    /// Number of k-cliques that percolated into this community
    pub clique_count: usize,
}

impl Community {
    pub fn contains(&self, node: u32) -> bool {
        self.members.binary_search(&node).is_ok()
    }
}
