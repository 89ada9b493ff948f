//! Memory-efficient undirected graph representation

use std::mem;
use serde::{Serialize, Deserialize};
use crate::error::{CpmResult, MalformedGraph};
use crate::graph::GraphView;

/// Compressed sparse representation of an undirected graph.
///
/// Every edge is stored in the adjacency lists of both endpoints, and each
/// list is sorted so adjacency tests are binary searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's neighbors begin
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated sorted neighbor lists
    pub neighbors: Vec<u32>,

    /// Optional mapping from internal node indices to original identifiers
    pub node_ids: Option<Vec<String>>,
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            neighbors: Vec::with_capacity(edge_count * 2),
            node_ids: None,
        }
    }

    /// Build a graph whose node indices are the identifiers themselves.
    ///
    /// The node count is one past the largest endpoint, so unused indices
    /// become isolated nodes. Self-loops and duplicate edges are rejected.
    pub fn from_edges(edges: &[(u32, u32)]) -> CpmResult<Self> {
        let node_count = edges
            .iter()
            .map(|&(a, b)| a.max(b) as usize + 1)
            .max()
            .unwrap_or(0);

        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); node_count];
        for &(a, b) in edges {
            if a == b {
                return Err(MalformedGraph::SelfLoop { node: a }.into());
            }
            adjacency[a as usize].push(b);
            adjacency[b as usize].push(a);
        }

        Ok(Self::from_adjacency(adjacency, None)?)
    }

    /// Assemble the CSR arrays from per-node neighbor lists.
    ///
    /// Lists are sorted here; a repeated neighbor is reported as a duplicate edge.
    pub(crate) fn from_adjacency(
        mut adjacency: Vec<Vec<u32>>,
        node_ids: Option<Vec<String>>,
    ) -> Result<Self, MalformedGraph> {
        let node_count = adjacency.len();
        let total: usize = adjacency.iter().map(|list| list.len()).sum();

        let mut graph = Self::with_capacity(node_count, total / 2);
        graph.offsets.push(0);

        let mut offset = 0;
        for (node, list) in adjacency.iter_mut().enumerate() {
            // Sort for binary search efficiency
            list.sort_unstable();
            if let Some(pair) = list.windows(2).find(|pair| pair[0] == pair[1]) {
                let (first, second) = ordered(node as u32, pair[0]);
                return Err(MalformedGraph::DuplicateEdge { first, second });
            }
            offset += list.len() as u32;
            graph.offsets.push(offset);
            graph.neighbors.extend_from_slice(list);
        }

        graph.node_ids = node_ids;
        Ok(graph)
    }

    /// Check the CSR arrays of a graph that was not assembled by this module,
    /// such as a deserialized snapshot.
    ///
    /// Offsets must start at zero, never decrease and end at the neighbor
    /// count. Every list must be strictly increasing, in range, free of
    /// self-loops and mirrored by the list of each neighbor.
    pub fn validate(&self) -> Result<(), MalformedGraph> {
        let node_count = self.node_count;
        if self.offsets.len() != node_count + 1 {
            return Err(MalformedGraph::OffsetCount {
                expected: node_count + 1,
                found: self.offsets.len(),
            });
        }
        if self.offsets[0] != 0 {
            return Err(MalformedGraph::CorruptAdjacency { node: 0 });
        }
        for (node, pair) in self.offsets.windows(2).enumerate() {
            if pair[0] > pair[1] || pair[1] as usize > self.neighbors.len() {
                return Err(MalformedGraph::CorruptAdjacency { node: node as u32 });
            }
        }
        if self.offsets[node_count] as usize != self.neighbors.len() {
            return Err(MalformedGraph::CorruptAdjacency {
                node: node_count.saturating_sub(1) as u32,
            });
        }

        for node in 0..node_count {
            let node = node as u32;
            let list = self.neighbor_slice(node as usize);
            for &other in list {
                if other == node {
                    return Err(MalformedGraph::SelfLoop { node });
                }
                if other as usize >= node_count {
                    return Err(MalformedGraph::NodeOutOfRange { node: other, node_count });
                }
            }
            for pair in list.windows(2) {
                if pair[0] == pair[1] {
                    let (first, second) = ordered(node, pair[0]);
                    return Err(MalformedGraph::DuplicateEdge { first, second });
                }
                if pair[0] > pair[1] {
                    return Err(MalformedGraph::CorruptAdjacency { node });
                }
            }
        }

        // Lists are sorted and in range from here on
        for node in 0..node_count as u32 {
            for &other in self.neighbor_slice(node as usize) {
                if self.neighbor_slice(other as usize).binary_search(&node).is_err() {
                    return Err(MalformedGraph::AsymmetricEdge { from: node, to: other });
                }
            }
        }

        Ok(())
    }

    /// Get the sorted neighbor list of a node
    pub fn neighbor_slice(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Original identifier of a node, falling back to its index
    pub fn label(&self, node: u32) -> String {
        self.node_ids
            .as_ref()
            .and_then(|ids| ids.get(node as usize).cloned())
            .unwrap_or_else(|| node.to_string())
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let neighbors = self.neighbors.capacity() * mem::size_of::<u32>();

        // Add labels if present
        let ids = self.node_ids.as_ref()
            .map(|ids| ids.iter().map(|s| s.capacity()).sum::<usize>())
            .unwrap_or(0);

        base + offsets + neighbors + ids
    }
}

impl GraphView for CompressedGraph {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    fn nodes(&self) -> impl Iterator<Item = u32> + '_ {
        0..self.node_count as u32
    }

    fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        // Each edge is stored twice, emit it from its lower endpoint only
        (0..self.node_count as u32).flat_map(move |src| {
            self.neighbor_slice(src as usize)
                .iter()
                .copied()
                .filter(move |&dst| src < dst)
                .map(move |dst| (src, dst))
        })
    }

    fn degree(&self, node: u32) -> usize {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        end - start
    }

    fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        self.neighbor_slice(node as usize).iter().copied()
    }

    fn has_edge(&self, a: u32, b: u32) -> bool {
        self.neighbor_slice(a as usize).binary_search(&b).is_ok()
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CpmError;

    #[test]
    fn stores_each_edge_in_both_directions() {
        let graph = CompressedGraph::from_edges(&[(1, 2), (2, 3), (3, 1)]).unwrap();

        assert_eq!(graph.node_count, 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.neighbor_slice(3), &[1, 2]);
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(0, 1));
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn rejects_self_loops_and_duplicates() {
        assert!(matches!(
            CompressedGraph::from_edges(&[(1, 1)]),
            Err(CpmError::MalformedGraph(MalformedGraph::SelfLoop { node: 1 }))
        ));
        assert!(matches!(
            CompressedGraph::from_edges(&[(1, 2), (2, 1)]),
            Err(CpmError::MalformedGraph(MalformedGraph::DuplicateEdge { first: 1, second: 2 }))
        ));
    }

    #[test]
    fn validate_accepts_assembled_graphs() {
        let graph = CompressedGraph::from_edges(&[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        assert_eq!(graph.validate(), Ok(()));
        assert_eq!(CompressedGraph::from_edges(&[]).unwrap().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_broken_csr_arrays() {
        let triangle = CompressedGraph::from_edges(&[(0, 1), (1, 2), (2, 0)]).unwrap();

        let mut short = triangle.clone();
        short.offsets.truncate(2);
        assert_eq!(
            short.validate(),
            Err(MalformedGraph::OffsetCount { expected: 4, found: 2 })
        );

        let mut decreasing = triangle.clone();
        decreasing.offsets[1] = 5;
        assert_eq!(decreasing.validate(), Err(MalformedGraph::CorruptAdjacency { node: 1 }));

        let mut truncated = triangle.clone();
        truncated.neighbors.pop();
        assert_eq!(truncated.validate(), Err(MalformedGraph::CorruptAdjacency { node: 2 }));

        let mut out_of_range = triangle.clone();
        out_of_range.neighbors[5] = 7;
        assert_eq!(
            out_of_range.validate(),
            Err(MalformedGraph::NodeOutOfRange { node: 7, node_count: 3 })
        );

        let mut unsorted = triangle.clone();
        unsorted.neighbors.swap(0, 1);
        assert_eq!(unsorted.validate(), Err(MalformedGraph::CorruptAdjacency { node: 0 }));

        // Node 0 lists 1 and 2, but node 2 only lists 1
        let one_sided = CompressedGraph {
            node_count: 3,
            offsets: vec![0, 2, 4, 5],
            neighbors: vec![1, 2, 0, 2, 1],
            node_ids: None,
        };
        assert_eq!(
            one_sided.validate(),
            Err(MalformedGraph::AsymmetricEdge { from: 0, to: 2 })
        );
    }

    #[test]
    fn labels_fall_back_to_indices() {
        let mut graph = CompressedGraph::from_edges(&[(0, 1)]).unwrap();
        assert_eq!(graph.label(1), "1");

        graph.node_ids = Some(vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(graph.label(1), "bob");
        assert!(graph.memory_usage() > 0);
    }
}
