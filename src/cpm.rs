//! Clique percolation runs: enumeration through community materialization

use std::ops::ControlFlow;
use std::time::Instant;
use serde::{Serialize, Deserialize};
use crate::clique::{CliqueEnumerator, CliqueIndex, LevelObserver, LevelReport};
use crate::cluster::{build_percolation_graph, find_components, materialize_communities, Community};
use crate::config::CpmConfig;
use crate::error::{CpmError, CpmResult, MIN_CLIQUE_SIZE};
use crate::graph::{algorithms, GraphView};

/// Counters collected while a run progresses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Clique size the run percolated
    pub k: usize,

    /// `(clique size, clique count)` for every enumerated level from 3 upward
    pub levels: Vec<(usize, usize)>,

    /// Number of k-cliques
    pub clique_count: usize,

    /// Pairs of k-cliques sharing k-1 nodes
    pub percolation_edges: usize,

    /// Connected components of the percolation graph
    pub component_count: usize,

    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

/// Communities found by a run and how they were reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpmOutcome {
    pub communities: Vec<Community>,
    pub stats: RunStats,
}

/// Find the k-clique communities of `graph` with the default configuration.
///
/// Fails with [`CpmError::InvalidParameter`] when `k < 3`. A graph without
/// k-cliques yields an empty list.
pub fn cpm_run<G: GraphView + Sync>(graph: &G, k: usize) -> CpmResult<Vec<Community>> {
    let outcome = cpm_run_with(graph, &CpmConfig::with_k(k), &mut continue_always)?;
    Ok(outcome.communities)
}

fn continue_always(_: &LevelReport) -> ControlFlow<()> {
    ControlFlow::Continue(())
}

/// Run clique percolation with an explicit configuration and level observer.
///
/// The observer sees every enumerated level up to size `config.k` and may stop
/// the run; the time budget is checked at the same points. Either the whole
/// pipeline completes or an error is returned, there are no partial results.
pub fn cpm_run_with<G, O>(graph: &G, config: &CpmConfig, observer: &mut O) -> CpmResult<CpmOutcome>
where
    G: GraphView + Sync,
    O: LevelObserver + ?Sized,
{
    let k = config.k;
    if k < MIN_CLIQUE_SIZE {
        return Err(CpmError::InvalidParameter { k });
    }
    algorithms::check_simple(graph)?;

    let start = Instant::now();
    log::info!(
        "Running clique percolation with k={} on {} nodes and {} edges",
        k,
        graph.node_count(),
        graph.edge_count()
    );

    let mut stats = RunStats {
        k,
        ..RunStats::default()
    };

    // 1. Grow cliques level by level until size k or exhaustion
    let mut enumerator = CliqueEnumerator::new(graph, config.parallel_threshold);
    while enumerator.clique_size() < k && enumerator.advance() {
        let report = LevelReport {
            clique_size: enumerator.clique_size(),
            clique_count: enumerator.cliques().len(),
            elapsed: start.elapsed(),
        };
        log::info!(
            "Enumerated {} cliques of size {}",
            report.clique_count,
            report.clique_size
        );
        stats.levels.push((report.clique_size, report.clique_count));

        if observer.on_level(&report).is_break() {
            return Err(CpmError::Aborted {
                clique_size: report.clique_size,
            });
        }
        if let Some(budget) = config.time_budget {
            if report.elapsed > budget {
                return Err(CpmError::BudgetExceeded {
                    budget,
                    elapsed: report.elapsed,
                    clique_size: report.clique_size,
                });
            }
        }
    }

    let k_cliques = if enumerator.clique_size() == k {
        enumerator.into_cliques()
    } else {
        Vec::new()
    };
    if k_cliques.is_empty() {
        log::info!("No cliques of size {} found", k);
        stats.duration_ms = start.elapsed().as_millis() as u64;
        return Ok(CpmOutcome {
            communities: Vec::new(),
            stats,
        });
    }

    // 2. Number the k-cliques
    let index = CliqueIndex::new(k_cliques);
    stats.clique_count = index.len();

    // 3. Join cliques sharing k-1 nodes
    let percolation = build_percolation_graph(&index, k, config.parallel_threshold);
    stats.percolation_edges = percolation.edge_count();

    // 4. Connected components of the percolation graph
    let components = find_components(&percolation, config.merge_strategy);
    stats.component_count = components.len();

    // 5. Back to original nodes
    let communities = materialize_communities(&components, &index);

    stats.duration_ms = start.elapsed().as_millis() as u64;
    log::info!(
        "Found {} communities from {} cliques in {} ms",
        communities.len(),
        stats.clique_count,
        stats.duration_ms
    );

    Ok(CpmOutcome { communities, stats })
}
