//! Plain-text edge lists

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use anyhow::{Context, Result};
use crate::graph::{CompressedGraph, GraphBuilder};

/// Load an undirected graph from a whitespace-separated edge list file.
///
/// Each line holds two node identifiers; further columns (weights, data)
/// are ignored. Blank lines and anything after `#` are skipped.
pub fn load_edge_list(path: &str, strict: bool) -> Result<CompressedGraph> {
    log::info!("Reading edge list: {}", path);

    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    let graph = read_edge_list(file, strict).with_context(|| format!("parsing {path}"))?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count,
        graph.neighbors.len() / 2
    );

    Ok(graph)
}

/// Parse an edge list from any reader
pub fn read_edge_list<R: Read>(reader: R, strict: bool) -> Result<CompressedGraph> {
    let mut builder = GraphBuilder::with_capacity(1024, strict);

    for (line_no, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default();
        let mut fields = content.split_whitespace();

        let (src, dst) = match (fields.next(), fields.next()) {
            (None, _) => continue,
            (Some(src), Some(dst)) => (src, dst),
            (Some(_), None) => {
                anyhow::bail!("line {}: expected two node identifiers", line_no + 1)
            }
        };

        builder
            .add_edge(src, dst)
            .with_context(|| format!("line {}", line_no + 1))?;
    }

    Ok(builder.build()?)
}
