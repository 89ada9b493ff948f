//! Graph construction module

use std::collections::HashMap;
use crate::error::{CpmResult, MalformedGraph};
use crate::graph::CompressedGraph;

/// Builder for incrementally constructing an undirected CompressedGraph
/// from arbitrary string identifiers.
///
/// In strict mode a self-loop fails immediately and a duplicate edge fails
/// at [`GraphBuilder::build`]. In lenient mode both are dropped and counted.
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs, in first-seen order
    node_ids: Vec<String>,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,

    /// Fail on malformed input instead of repairing it
    strict: bool,

    /// Self-loops dropped in lenient mode
    skipped_self_loops: usize,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize, strict: bool) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            strict,
            skipped_self_loops: 0,
        }
    }

    /// Number of nodes seen so far
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Get or create a node index for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        // Create a new node
        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());

        idx
    }

    /// Add an undirected edge between two nodes
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) -> CpmResult<()> {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);

        if src_idx == dst_idx {
            if self.strict {
                return Err(MalformedGraph::SelfLoop { node: src_idx }.into());
            }
            self.skipped_self_loops += 1;
            return Ok(());
        }

        self.adjacency_lists[src_idx as usize].push(dst_idx);
        self.adjacency_lists[dst_idx as usize].push(src_idx);

        Ok(())
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CpmResult<CompressedGraph> {
        if self.skipped_self_loops > 0 {
            log::warn!("Skipped {} self-loops", self.skipped_self_loops);
        }

        if !self.strict {
            let mut duplicates = 0;
            for list in &mut self.adjacency_lists {
                let before = list.len();
                list.sort_unstable();
                list.dedup();
                duplicates += before - list.len();
            }
            // Every duplicate edge was counted once from each endpoint
            if duplicates > 0 {
                log::warn!("Collapsed {} duplicate edges", duplicates / 2);
            }
        }

        let graph = CompressedGraph::from_adjacency(self.adjacency_lists, Some(self.node_ids))?;

        log::debug!(
            "Built graph with {} nodes and {} edges ({} bytes)",
            graph.node_count,
            graph.neighbors.len() / 2,
            graph.memory_usage()
        );

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CpmError;
    use crate::graph::GraphView;

    #[test]
    fn assigns_indices_in_first_seen_order() {
        let mut builder = GraphBuilder::with_capacity(4, true);
        builder.add_edge("x", "y").unwrap();
        builder.add_edge("y", "z").unwrap();
        builder.get_or_create_node("lonely");

        let graph = builder.build().unwrap();
        assert_eq!(graph.node_count, 4);
        assert_eq!(graph.label(2), "z");
        assert_eq!(graph.degree(3), 0);
        assert!(graph.has_edge(0, 1));
    }

    #[test]
    fn strict_mode_rejects_malformed_edges() {
        let mut builder = GraphBuilder::with_capacity(2, true);
        assert!(matches!(
            builder.add_edge("a", "a"),
            Err(CpmError::MalformedGraph(MalformedGraph::SelfLoop { node: 0 }))
        ));

        let mut builder = GraphBuilder::with_capacity(2, true);
        builder.add_edge("a", "b").unwrap();
        builder.add_edge("b", "a").unwrap();
        assert!(matches!(
            builder.build(),
            Err(CpmError::MalformedGraph(MalformedGraph::DuplicateEdge { first: 0, second: 1 }))
        ));
    }

    #[test]
    fn lenient_mode_repairs_input() {
        let mut builder = GraphBuilder::with_capacity(3, false);
        builder.add_edge("a", "a").unwrap();
        builder.add_edge("a", "b").unwrap();
        builder.add_edge("b", "a").unwrap();
        builder.add_edge("b", "c").unwrap();

        let graph = builder.build().unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(0), 1);
    }
}
