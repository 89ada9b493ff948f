//! Community statistics and metrics

use serde::{Serialize, Deserialize};
use rayon::prelude::*;
use crate::cluster::Community;
use crate::graph::GraphView;

/// Number of best-connected members reported per community
const TOP_MEMBERS: usize = 5;

/// Communities at least this large are measured on the rayon pool
const PARALLEL_MEMBERS: usize = 1000;

/// Structural measurements of a community within its graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityMetrics {
    /// Edges with both endpoints in the community
    pub internal_edges: usize,

    /// Density: internal edges / potential edges
    pub density: f32,

    /// Members with the most neighbors inside the community
    pub top_members: Vec<u32>,
}

/// Calculate density and best-connected members of a community
pub fn calculate_community_metrics<G: GraphView + Sync>(
    graph: &G,
    community: &Community,
) -> CommunityMetrics {
    let degrees = internal_degrees(graph, &community.members);
    let internal_edges = degrees.iter().map(|&(_, degree)| degree).sum::<usize>() / 2;

    CommunityMetrics {
        internal_edges,
        density: density(community.members.len(), internal_edges),
        top_members: top_members(degrees),
    }
}

/// Actual edges / potential edges
fn density(n: usize, internal_edges: usize) -> f32 {
    if n <= 1 {
        return 1.0; // By convention, singleton communities have density 1
    }

    // Potential edges = n * (n - 1) / 2 for an undirected graph
    let potential_edges = n * (n - 1) / 2;
    internal_edges as f32 / potential_edges as f32
}

/// Neighbors of each member that are members too
fn internal_degrees<G: GraphView + Sync>(graph: &G, members: &[u32]) -> Vec<(u32, usize)> {
    let degree_of = |&node: &u32| {
        let degree = graph
            .neighbors(node)
            .filter(|other| members.binary_search(other).is_ok())
            .count();
        (node, degree)
    };

    // For small communities, use sequential processing
    if members.len() < PARALLEL_MEMBERS {
        members.iter().map(degree_of).collect()
    } else {
        members.par_iter().map(degree_of).collect()
    }
}

fn top_members(mut degrees: Vec<(u32, usize)>) -> Vec<u32> {
    // Highest degree first, lower index on ties
    degrees.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    degrees.into_iter().take(TOP_MEMBERS).map(|(node, _)| node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CompressedGraph;

    #[test]
    fn measures_density_within_the_community() {
        // Two triangles sharing edge 2-3, plus an outside edge 4-5
        let graph = CompressedGraph::from_edges(&[(1, 2), (1, 3), (2, 3), (2, 4), (3, 4), (4, 5)])
            .unwrap();
        let community = Community {
            id: 0,
            members: vec![1, 2, 3, 4],
            size: 4,
            clique_count: 2,
        };

        let metrics = calculate_community_metrics(&graph, &community);

        assert_eq!(metrics.internal_edges, 5);
        assert!((metrics.density - 5.0 / 6.0).abs() < 1e-6);
        assert_eq!(metrics.top_members, vec![2, 3, 1, 4]);
        assert_eq!(density(1, 0), 1.0);
    }
}
