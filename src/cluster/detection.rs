//! Connected components of the percolation graph

use std::collections::HashMap;
use itertools::Itertools;
use crate::clique::{intersection_len, sorted_union, CliqueId};
use crate::cluster::PercolationGraph;
use crate::config::MergeStrategy;

/// Clique ids forming one connected piece of the percolation graph, ascending
pub type Component = Vec<CliqueId>;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of element i)
    parent: Vec<u32>,

    /// Number of elements in each set, valid at roots
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            // Path compression: set parent to root
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y, by size
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return; // Already in the same set
        }

        // Attach the smaller tree under the root of the larger tree
        if self.size[root_x as usize] > self.size[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.size[root_x as usize] += self.size[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.size[root_y as usize] += self.size[root_x as usize];
        }
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.size[root as usize]
    }
}

/// Split the percolation graph into connected components.
///
/// Every clique id lands in exactly one component, ids without overlaps as
/// singletons. Components are ordered by their smallest id and both
/// strategies return the same list.
pub fn find_components(graph: &PercolationGraph, strategy: MergeStrategy) -> Vec<Component> {
    let components = match strategy {
        MergeStrategy::UnionFind => components_union_find(graph),
        MergeStrategy::Generational => components_generational(graph),
    };

    log::debug!(
        "Found {} components among {} cliques ({:?})",
        components.len(),
        graph.clique_count(),
        strategy
    );

    components
}

/// Components via disjoint sets over ids
pub fn components_union_find(graph: &PercolationGraph) -> Vec<Component> {
    let mut sets = DisjointSets::new(graph.clique_count());
    for (a, b) in graph.edges() {
        sets.union(a - 1, b - 1);
    }

    // Visiting ids in ascending order keeps components ordered by smallest id
    let mut slot_of_root: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Component> = Vec::new();
    for id in graph.ids() {
        let root = sets.find(id - 1);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::with_capacity(sets.size(root) as usize));
            components.len() - 1
        });
        components[slot].push(id);
    }

    components
}

/// Components by repeated pairwise merging.
///
/// The first generation holds every overlap edge as a two-id set. Each
/// following generation holds the distinct unions of intersecting pairs from
/// the one before. A set that intersects no other set of its generation is a
/// finished component; it is recorded before the generation is replaced, so
/// components that settle early (two-id components included) are kept.
/// Ids without overlaps are added as singletons.
pub fn components_generational(graph: &PercolationGraph) -> Vec<Component> {
    let mut components: Vec<Component> = Vec::new();

    let mut generation: Vec<Vec<CliqueId>> = graph.edges().map(|(a, b)| vec![a, b]).collect();
    generation.sort_unstable();
    generation.dedup();

    while !generation.is_empty() {
        let mut merged = vec![false; generation.len()];
        let mut next: Vec<Vec<CliqueId>> = Vec::new();

        for (i, j) in (0..generation.len()).tuple_combinations() {
            if intersection_len(&generation[i], &generation[j]) > 0 {
                merged[i] = true;
                merged[j] = true;
                next.push(sorted_union(&generation[i], &generation[j]));
            }
        }

        components.extend(
            generation
                .into_iter()
                .zip(merged)
                .filter(|(_, merged)| !merged)
                .map(|(set, _)| set),
        );

        next.sort_unstable();
        next.dedup();
        generation = next;
    }

    components.extend(graph.isolated().map(|id| vec![id]));
    components.sort_unstable_by_key(|component| component[0]);
    components
}
