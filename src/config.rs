//! Configuration management for clique percolation runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How connected components of the percolation graph are extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Disjoint sets keyed by clique id
    #[default]
    UnionFind,

    /// Pairwise merging of overlapping sets, generation by generation.
    ///
    /// Each generation holds the unions of all intersecting pairs of the
    /// previous one, which grows combinatorially when many cliques overlap.
    /// Only practical on sparse percolation graphs.
    Generational,
}

/// Parameters of a single percolation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpmConfig {
    /// Clique size to percolate (k >= 3)
    pub k: usize,

    /// Component extraction strategy
    pub merge_strategy: MergeStrategy,

    /// Pair loops over fewer items than this run sequentially
    pub parallel_threshold: usize,

    /// Optional wall-clock budget, checked between enumeration levels
    pub time_budget: Option<Duration>,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            k: 3,
            merge_strategy: MergeStrategy::UnionFind,
            parallel_threshold: 1000,
            time_budget: None,
        }
    }
}

impl CpmConfig {
    /// Create a new configuration with custom values
    pub fn new(
        k: usize,
        merge_strategy: MergeStrategy,
        parallel_threshold: usize,
        time_budget: Option<Duration>,
    ) -> Self {
        Self {
            k,
            merge_strategy,
            parallel_threshold,
            time_budget,
        }
    }

    /// Default configuration for clique size `k`
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }
}
