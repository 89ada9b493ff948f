//! End-to-end percolation runs on small hand-built graphs

use clique_percolation::graph::GraphView;
use clique_percolation::{cpm_run, CompressedGraph, CpmError, GraphBuilder, MalformedGraph};
use petgraph::graph::UnGraph;

fn members(graph: &CompressedGraph, k: usize) -> Vec<Vec<u32>> {
    cpm_run(graph, k)
        .unwrap()
        .into_iter()
        .map(|community| community.members)
        .collect()
}

#[test]
fn single_triangle_is_one_community() {
    let graph = CompressedGraph::from_edges(&[(1, 2), (2, 3), (1, 3)]).unwrap();
    assert_eq!(members(&graph, 3), vec![vec![1, 2, 3]]);
}

#[test]
fn disjoint_triangles_stay_apart() {
    let graph =
        CompressedGraph::from_edges(&[(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6)]).unwrap();
    assert_eq!(members(&graph, 3), vec![vec![1, 2, 3], vec![4, 5, 6]]);
}

#[test]
fn triangles_sharing_an_edge_percolate() {
    let graph = CompressedGraph::from_edges(&[(1, 2), (1, 3), (2, 3), (2, 4), (3, 4)]).unwrap();
    assert_eq!(members(&graph, 3), vec![vec![1, 2, 3, 4]]);
}

#[test]
fn graph_without_triangles_has_no_communities() {
    let mut builder = GraphBuilder::with_capacity(4, true);
    builder.add_edge("1", "2").unwrap();
    builder.get_or_create_node("3");
    builder.get_or_create_node("4");
    let graph = builder.build().unwrap();

    assert_eq!(graph.node_count(), 4);
    assert!(cpm_run(&graph, 3).unwrap().is_empty());
}

#[test]
fn clique_size_below_three_is_rejected() {
    let graph = CompressedGraph::from_edges(&[(1, 2), (2, 3), (1, 3)]).unwrap();
    assert!(matches!(cpm_run(&graph, 2), Err(CpmError::InvalidParameter { k: 2 })));

    let empty = CompressedGraph::from_edges(&[]).unwrap();
    assert!(matches!(cpm_run(&empty, 0), Err(CpmError::InvalidParameter { k: 0 })));
}

#[test]
fn overlapping_communities_share_their_bridge_node() {
    // Two K4s glued on node 4: they share one node, never a 3-face
    let mut edges = Vec::new();
    for group in [[1u32, 2, 3, 4], [4, 5, 6, 7]] {
        for i in 0..4 {
            for j in i + 1..4 {
                edges.push((group[i], group[j]));
            }
        }
    }
    let graph = CompressedGraph::from_edges(&edges).unwrap();

    assert_eq!(members(&graph, 4), vec![vec![1, 2, 3, 4], vec![4, 5, 6, 7]]);
    assert_eq!(members(&graph, 3), vec![vec![1, 2, 3, 4], vec![4, 5, 6, 7]]);
    assert!(members(&graph, 5).is_empty());
}

#[test]
fn runs_on_petgraph_graphs() {
    let graph = UnGraph::<&str, ()>::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2), (3, 5)]);
    let communities = cpm_run(&graph, 3).unwrap();

    let found: Vec<Vec<u32>> = communities.into_iter().map(|c| c.members).collect();
    assert_eq!(found, vec![vec![0, 1, 2], vec![2, 3, 4]]);
}

#[test]
fn multigraph_input_fails_fast() {
    let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0), (0, 1)]);
    assert!(matches!(
        cpm_run(&graph, 3),
        Err(CpmError::MalformedGraph(MalformedGraph::DuplicateEdge { first: 0, second: 1 }))
    ));
}
