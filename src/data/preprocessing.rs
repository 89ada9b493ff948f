//! Data preprocessing module for graph analysis

use crate::graph::{CompressedGraph, GraphView};

/// Extract the subgraph induced by the nodes marked in `keep`.
///
/// Kept nodes are renumbered densely in their original order and keep their
/// labels, so results on the subgraph still name the original nodes.
pub fn induced_subgraph(graph: &CompressedGraph, keep: &[bool]) -> CompressedGraph {
    // Create mapping from original to subgraph indices
    let mut orig_to_sub = vec![u32::MAX; graph.node_count];
    let mut kept_count = 0u32;
    for node in 0..graph.node_count {
        if keep[node] {
            orig_to_sub[node] = kept_count;
            kept_count += 1;
        }
    }

    let mut subgraph = CompressedGraph::with_capacity(kept_count as usize, 0);
    subgraph.offsets.push(0);
    let mut offset = 0;

    for node in 0..graph.node_count {
        if !keep[node] {
            continue;
        }

        for &target in graph.neighbor_slice(node) {
            // Only include edges where both endpoints are kept
            if keep[target as usize] {
                subgraph.neighbors.push(orig_to_sub[target as usize]);
                offset += 1;
            }
        }
        subgraph.offsets.push(offset);
    }

    // Labels always survive, falling back to the original index
    subgraph.node_ids = Some(
        (0..graph.node_count)
            .filter(|&node| keep[node])
            .map(|node| graph.label(node as u32))
            .collect(),
    );

    subgraph
}

/// Keep the first `count` nodes in load order
pub fn first_nodes(graph: &CompressedGraph, count: usize) -> CompressedGraph {
    let keep: Vec<bool> = (0..graph.node_count).map(|node| node < count).collect();
    induced_subgraph(graph, &keep)
}

/// Drop nodes with fewer than `min_degree` neighbors.
///
/// A single pass, not a k-core: nodes that fall below the threshold after
/// their neighbors are removed stay. For clique percolation with clique size
/// k, `min_degree = k - 1` never removes a node of a k-clique.
pub fn filter_by_degree(graph: &CompressedGraph, min_degree: usize) -> CompressedGraph {
    let keep: Vec<bool> = (0..graph.node_count as u32)
        .map(|node| graph.degree(node) >= min_degree)
        .collect();

    let filtered = induced_subgraph(graph, &keep);
    log::info!(
        "Degree filter >= {} kept {} of {} nodes",
        min_degree,
        filtered.node_count,
        graph.node_count
    );

    filtered
}
