//! Graph checks used before percolation

use crate::error::MalformedGraph;
use crate::graph::GraphView;

/// Verify that a graph is simple: no self-loops, no duplicate edges, and
/// every endpoint inside `0..node_count()`.
pub fn check_simple<G: GraphView>(graph: &G) -> Result<(), MalformedGraph> {
    let node_count = graph.node_count();
    let mut pairs: Vec<(u32, u32)> = Vec::with_capacity(graph.edge_count());

    for (a, b) in graph.edges() {
        if a == b {
            return Err(MalformedGraph::SelfLoop { node: a });
        }
        for node in [a, b] {
            if node as usize >= node_count {
                return Err(MalformedGraph::NodeOutOfRange { node, node_count });
            }
        }
        pairs.push(if a < b { (a, b) } else { (b, a) });
    }

    pairs.sort_unstable();
    if let Some(pair) = pairs.windows(2).find(|pair| pair[0] == pair[1]) {
        let (first, second) = pair[0];
        return Err(MalformedGraph::DuplicateEdge { first, second });
    }

    Ok(())
}

/// Largest node degree, zero for an empty graph.
///
/// No clique can have more than `max_degree + 1` members.
pub fn max_degree<G: GraphView>(graph: &G) -> usize {
    graph.nodes().map(|node| graph.degree(node)).max().unwrap_or(0)
}
