//! Results persistence module

use anyhow::{Context, Result};
use crate::cluster::metrics::calculate_community_metrics;
use crate::config::CpmConfig;
use crate::cpm::CpmOutcome;
use crate::graph::{algorithms, CompressedGraph, GraphView};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use serde_json::{json, to_string_pretty};
use statrs::statistics::Statistics;

/// Save a run's communities and summary to the specified directory
pub fn save_results(
    outcome: &CpmOutcome,
    graph: &CompressedGraph,
    config: &CpmConfig,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} communities to {}", outcome.communities.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(outcome, graph, config, output_dir)?;
    save_communities(outcome, graph, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(
    outcome: &CpmOutcome,
    graph: &CompressedGraph,
    config: &CpmConfig,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let communities = &outcome.communities;
    let sizes: Vec<f64> = communities.iter().map(|c| c.size as f64).collect();

    // Community memberships per node
    let mut memberships = vec![0u32; graph.node_count];
    for community in communities {
        for &node in &community.members {
            memberships[node as usize] += 1;
        }
    }

    let avg_degree = if graph.node_count == 0 {
        0.0
    } else {
        2.0 * graph.edge_count() as f64 / graph.node_count as f64
    };
    let avg_size = if sizes.is_empty() { 0.0 } else { sizes.iter().mean() };
    let std_dev_size = if sizes.len() < 2 { 0.0 } else { sizes.iter().std_dev() };

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "avg_degree": avg_degree,
            "max_degree": algorithms::max_degree(graph),
        },
        "parameters": config,
        "run_stats": outcome.stats,
        "community_stats": {
            "community_count": communities.len(),
            "covered_nodes": memberships.iter().filter(|&&m| m > 0).count(),
            "overlapping_nodes": memberships.iter().filter(|&&m| m > 1).count(),
            "largest_community_size": communities.iter().map(|c| c.size).max().unwrap_or(0),
            "smallest_community_size": communities.iter().map(|c| c.size).min().unwrap_or(0),
            "avg_community_size": avg_size,
            "std_dev_community_size": std_dev_size,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save every community with resolved labels and metrics
fn save_communities(
    outcome: &CpmOutcome,
    graph: &CompressedGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving individual community information");

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let communities_json: Vec<_> = outcome
        .communities
        .iter()
        .map(|community| {
            let metrics = calculate_community_metrics(graph, community);
            json!({
                "id": community.id,
                "size": community.size,
                "clique_count": community.clique_count,
                "density": metrics.density,
                "internal_edges": metrics.internal_edges,
                "top_members": metrics.top_members.iter().map(|&n| graph.label(n)).collect::<Vec<_>>(),
                "members": community.members.iter().map(|&n| graph.label(n)).collect::<Vec<_>>(),
            })
        })
        .collect();

    let document = json!({ "communities": communities_json });
    file.write_all(to_string_pretty(&document)?.as_bytes())?;

    Ok(())
}

/// Write a binary snapshot of a loaded graph for faster reloads
pub fn save_graph_snapshot(graph: &CompressedGraph, path: &str) -> Result<()> {
    log::info!("Saving graph snapshot to {}", path);

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, graph)?;
    writer.flush()?;

    Ok(())
}

/// Read a graph written by [`save_graph_snapshot`]
pub fn load_graph_snapshot(path: &str) -> Result<CompressedGraph> {
    log::info!("Loading graph snapshot from {}", path);

    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    let graph: CompressedGraph = bincode::deserialize_from(BufReader::new(file))
        .with_context(|| format!("decoding graph snapshot {path}"))?;
    graph
        .validate()
        .with_context(|| format!("invalid graph snapshot {path}"))?;

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpm::cpm_run_with;
    use crate::clique::LevelReport;
    use crate::error::MalformedGraph;
    use std::ops::ControlFlow;

    fn two_triangles_sharing_node() -> CompressedGraph {
        CompressedGraph::from_edges(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]).unwrap()
    }

    #[test]
    fn writes_summary_and_communities() {
        let graph = two_triangles_sharing_node();
        let config = CpmConfig::with_k(3);
        let outcome = cpm_run_with(&graph, &config, &mut |_: &LevelReport| -> ControlFlow<()> {
            ControlFlow::Continue(())
        })
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();
        save_results(&outcome, &graph, &config, output_dir).unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["community_stats"]["community_count"], 2);
        assert_eq!(summary["community_stats"]["overlapping_nodes"], 1);
        assert_eq!(summary["graph_stats"]["max_degree"], 4);
        assert_eq!(summary["parameters"]["merge_strategy"], "union_find");

        let communities: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("communities.json")).unwrap())
                .unwrap();
        assert_eq!(communities["communities"][1]["members"], json!(["2", "3", "4"]));
        assert_eq!(communities["communities"][0]["density"], 1.0);
    }

    #[test]
    fn graph_snapshot_round_trips() {
        let mut graph = two_triangles_sharing_node();
        graph.node_ids = Some((0..5).map(|i| format!("n{i}")).collect());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.bin");
        let path = path.to_str().unwrap();

        save_graph_snapshot(&graph, path).unwrap();
        assert_eq!(load_graph_snapshot(path).unwrap(), graph);
    }

    #[test]
    fn corrupt_snapshot_is_rejected_on_load() {
        let mut graph = two_triangles_sharing_node();
        graph.offsets.truncate(2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.bin");
        let path = path.to_str().unwrap();

        save_graph_snapshot(&graph, path).unwrap();
        let err = load_graph_snapshot(path).unwrap_err();

        assert!(err.to_string().contains("invalid graph snapshot"));
        assert_eq!(
            err.downcast_ref::<MalformedGraph>(),
            Some(&MalformedGraph::OffsetCount { expected: 6, found: 2 })
        );
    }
}
