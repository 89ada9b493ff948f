//! Percolation graph: k-cliques joined when they share k-1 nodes

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rayon::prelude::*;
use crate::clique::{CliqueId, CliqueIndex};

/// Undirected graph over clique ids. Node index `i` carries clique id `i + 1`.
#[derive(Debug, Clone)]
pub struct PercolationGraph {
    graph: UnGraph<CliqueId, ()>,
}

impl PercolationGraph {
    /// Number of clique ids, including those without any overlap
    pub fn clique_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All clique ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = CliqueId> + '_ {
        self.graph.node_indices().map(move |n| self.graph[n])
    }

    /// Every overlap edge once, lower id first
    pub fn edges(&self) -> impl Iterator<Item = (CliqueId, CliqueId)> + '_ {
        self.graph.edge_references().map(move |e| {
            let (a, b) = (self.graph[e.source()], self.graph[e.target()]);
            if a < b { (a, b) } else { (b, a) }
        })
    }

    /// Number of cliques overlapping `id` in k-1 nodes
    pub fn degree(&self, id: CliqueId) -> usize {
        self.graph.neighbors(node_of(id)).count()
    }

    pub fn are_adjacent(&self, a: CliqueId, b: CliqueId) -> bool {
        self.graph.find_edge(node_of(a), node_of(b)).is_some()
    }

    /// Clique ids that overlap no other clique
    pub fn isolated(&self) -> impl Iterator<Item = CliqueId> + '_ {
        self.ids().filter(move |&id| self.degree(id) == 0)
    }
}

fn node_of(id: CliqueId) -> NodeIndex {
    NodeIndex::new(id as usize - 1)
}

/// Connect every pair of cliques in `index` whose node sets share exactly
/// `k - 1` nodes.
///
/// All pairs are compared. Inputs of at least `parallel_threshold` cliques
/// are compared on the rayon pool; the edge list is sorted afterwards, so the
/// result does not depend on scheduling.
pub fn build_percolation_graph(
    index: &CliqueIndex,
    k: usize,
    parallel_threshold: usize,
) -> PercolationGraph {
    let cliques = index.as_slice();
    let shared = k.saturating_sub(1);

    let mut overlaps: Vec<(u32, u32)> = if cliques.len() < parallel_threshold {
        (0..cliques.len())
            .tuple_combinations()
            .filter(|&(i, j)| cliques[i].intersection_len(&cliques[j]) == shared)
            .map(|(i, j)| (i as u32, j as u32))
            .collect()
    } else {
        (0..cliques.len())
            .into_par_iter()
            .flat_map_iter(move |i| {
                (i + 1..cliques.len())
                    .filter(move |&j| cliques[i].intersection_len(&cliques[j]) == shared)
                    .map(move |j| (i as u32, j as u32))
            })
            .collect()
    };
    overlaps.sort_unstable();

    let mut graph = UnGraph::with_capacity(cliques.len(), overlaps.len());
    for (id, _) in index.iter() {
        graph.add_node(id);
    }
    graph.extend_with_edges(overlaps);

    log::debug!(
        "Percolation graph has {} cliques and {} overlaps",
        graph.node_count(),
        graph.edge_count()
    );

    PercolationGraph { graph }
}
