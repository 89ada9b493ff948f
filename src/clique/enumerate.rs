//! Incremental clique enumeration.
//!
//! Level n+1 is grown from level n by comparing every pair of n-cliques: when
//! two of them differ in exactly one node each and those two nodes are
//! adjacent, their union is an (n+1)-clique. Starting from the edge set this
//! yields every clique of every size, not only the maximal ones.
//!
//! The pair loop is quadratic in the size of a level. That is the accepted
//! cost of this method; graphs with very large triangle counts are better
//! served by pruning the input first.

use std::ops::ControlFlow;
use std::time::Duration;
use rayon::prelude::*;
use crate::clique::Clique;
use crate::error::{CpmError, CpmResult, MIN_CLIQUE_SIZE};
use crate::graph::GraphView;

/// Summary of one completed enumeration level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelReport {
    /// Size of the cliques in this level
    pub clique_size: usize,

    /// Number of distinct cliques found
    pub clique_count: usize,

    /// Time since enumeration started
    pub elapsed: Duration,
}

/// Hook invoked after every enumeration level.
///
/// Returning `ControlFlow::Break` stops the run between levels.
pub trait LevelObserver {
    fn on_level(&mut self, report: &LevelReport) -> ControlFlow<()>;
}

impl<F> LevelObserver for F
where
    F: FnMut(&LevelReport) -> ControlFlow<()>,
{
    fn on_level(&mut self, report: &LevelReport) -> ControlFlow<()> {
        self(report)
    }
}

/// Grows cliques one size at a time, starting from the 2-cliques (edges)
pub struct CliqueEnumerator<'g, G> {
    graph: &'g G,
    level: Vec<Clique>,
    clique_size: usize,
    parallel_threshold: usize,
}

impl<'g, G: GraphView + Sync> CliqueEnumerator<'g, G> {
    /// Seed the enumerator with the edge set of `graph`
    pub fn new(graph: &'g G, parallel_threshold: usize) -> Self {
        let mut level: Vec<Clique> = graph.edges().map(|(a, b)| Clique::edge(a, b)).collect();
        level.sort_unstable();
        level.dedup();

        Self {
            graph,
            level,
            clique_size: 2,
            parallel_threshold,
        }
    }

    /// Size of the cliques in the current level
    pub fn clique_size(&self) -> usize {
        self.clique_size
    }

    /// Cliques of the current level, sorted
    pub fn cliques(&self) -> &[Clique] {
        &self.level
    }

    /// Replace the current level with the next larger one.
    ///
    /// Returns false once a level comes out empty; the enumerator then stays
    /// exhausted.
    pub fn advance(&mut self) -> bool {
        if self.level.is_empty() {
            return false;
        }

        self.level = grow_level(self.graph, &self.level, self.parallel_threshold);
        self.clique_size += 1;

        log::debug!("Found {} cliques of size {}", self.level.len(), self.clique_size);

        !self.level.is_empty()
    }

    /// Take ownership of the current level
    pub fn into_cliques(self) -> Vec<Clique> {
        self.level
    }
}

/// Enumerate every level of cliques from size 3 upward until a level is empty.
///
/// Index 0 holds the 3-cliques, index n the (n+3)-cliques. Raw edges are not
/// part of the output.
pub fn enumerate_cliques<G: GraphView + Sync>(
    graph: &G,
    parallel_threshold: usize,
) -> Vec<Vec<Clique>> {
    let mut enumerator = CliqueEnumerator::new(graph, parallel_threshold);
    let mut levels = Vec::new();
    while enumerator.advance() {
        levels.push(enumerator.cliques().to_vec());
    }
    levels
}

/// Cliques of size `k` from the output of [`enumerate_cliques`].
///
/// A size past the last level is empty rather than an error.
pub fn level_for_size(levels: &[Vec<Clique>], k: usize) -> CpmResult<&[Clique]> {
    if k < MIN_CLIQUE_SIZE {
        return Err(CpmError::InvalidParameter { k });
    }
    Ok(levels
        .get(k - MIN_CLIQUE_SIZE)
        .map(Vec::as_slice)
        .unwrap_or(&[]))
}

/// Build the next level from every pair of same-sized cliques
fn grow_level<G: GraphView + Sync>(
    graph: &G,
    level: &[Clique],
    parallel_threshold: usize,
) -> Vec<Clique> {
    let extend = |i: usize| -> Vec<Clique> {
        let base = &level[i];
        level[i + 1..]
            .iter()
            .filter_map(|other| {
                let (a, b) = base.symmetric_difference_pair(other)?;
                graph.has_edge(a, b).then(|| base.union(other))
            })
            .collect()
    };

    let mut candidates: Vec<Clique> = if level.len() < parallel_threshold {
        (0..level.len()).flat_map(extend).collect()
    } else {
        (0..level.len()).into_par_iter().flat_map_iter(extend).collect()
    };

    // Different pairs can produce the same larger clique
    candidates.par_sort_unstable();
    candidates.dedup();
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CompressedGraph;

    fn k4_with_tail() -> CompressedGraph {
        // Complete graph on {0,1,2,3} plus a pendant path 3-4-5
        CompressedGraph::from_edges(&[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (3, 4), (4, 5)])
            .unwrap()
    }

    #[test]
    fn enumerates_all_sizes_not_just_maximal() {
        let levels = enumerate_cliques(&k4_with_tail(), 1000);

        assert_eq!(levels.len(), 2);
        assert_eq!(
            levels[0],
            vec![
                Clique::from_nodes([0, 1, 2]),
                Clique::from_nodes([0, 1, 3]),
                Clique::from_nodes([0, 2, 3]),
                Clique::from_nodes([1, 2, 3]),
            ]
        );
        assert_eq!(levels[1], vec![Clique::from_nodes([0, 1, 2, 3])]);
    }

    #[test]
    fn square_without_diagonal_has_no_triangles() {
        let graph = CompressedGraph::from_edges(&[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert!(enumerate_cliques(&graph, 1000).is_empty());
    }

    #[test]
    fn parallel_and_sequential_levels_match() {
        let graph = k4_with_tail();
        assert_eq!(enumerate_cliques(&graph, 0), enumerate_cliques(&graph, usize::MAX));
    }

    #[test]
    fn enumerator_stays_exhausted() {
        let graph = k4_with_tail();
        let mut enumerator = CliqueEnumerator::new(&graph, 1000);
        assert_eq!(enumerator.clique_size(), 2);
        assert_eq!(enumerator.cliques().len(), 8);

        assert!(enumerator.advance());
        assert!(enumerator.advance());
        assert!(!enumerator.advance());
        assert_eq!(enumerator.clique_size(), 5);
        assert!(!enumerator.advance());
        assert_eq!(enumerator.clique_size(), 5);
        assert!(enumerator.into_cliques().is_empty());
    }

    #[test]
    fn level_selection_checks_k() {
        let levels = enumerate_cliques(&k4_with_tail(), 1000);

        assert_eq!(level_for_size(&levels, 4).unwrap().len(), 1);
        assert!(level_for_size(&levels, 9).unwrap().is_empty());
        assert!(matches!(
            level_for_size(&levels, 2),
            Err(CpmError::InvalidParameter { k: 2 })
        ));
    }
}
