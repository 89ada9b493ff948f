//! Graph representation and the query interface the percolation engine reads

pub mod compressed;
pub mod builder;
pub mod algorithms;

pub use builder::GraphBuilder;
pub use compressed::CompressedGraph;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Read-only view of a simple undirected graph over dense `u32` node indices.
///
/// Implementations must stay immutable for the duration of a run. Original
/// node identifiers are kept by the concrete graph, not by this trait.
pub trait GraphView {
    /// Number of nodes; valid indices are `0..node_count()`
    fn node_count(&self) -> usize;

    /// Number of undirected edges
    fn edge_count(&self) -> usize;

    /// All node indices
    fn nodes(&self) -> impl Iterator<Item = u32> + '_;

    /// Every undirected edge exactly once
    fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_;

    /// Number of neighbors of `node`
    fn degree(&self, node: u32) -> usize;

    /// Neighbors of `node`
    fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_;

    /// Whether `a` and `b` are adjacent
    fn has_edge(&self, a: u32, b: u32) -> bool {
        self.neighbors(a).any(|n| n == b)
    }
}

impl<N, E> GraphView for UnGraph<N, E> {
    fn node_count(&self) -> usize {
        petgraph::Graph::node_count(self)
    }

    fn edge_count(&self) -> usize {
        petgraph::Graph::edge_count(self)
    }

    fn nodes(&self) -> impl Iterator<Item = u32> + '_ {
        self.node_indices().map(|n| n.index() as u32)
    }

    fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edge_references()
            .map(|e| (e.source().index() as u32, e.target().index() as u32))
    }

    fn degree(&self, node: u32) -> usize {
        petgraph::Graph::neighbors(self, NodeIndex::new(node as usize)).count()
    }

    fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        petgraph::Graph::neighbors(self, NodeIndex::new(node as usize)).map(|n| n.index() as u32)
    }

    fn has_edge(&self, a: u32, b: u32) -> bool {
        self.find_edge(NodeIndex::new(a as usize), NodeIndex::new(b as usize))
            .is_some()
    }
}
