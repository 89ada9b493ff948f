//! Parquet file handling for edge tables

use anyhow::{Context, Result};
use polars::prelude::*;
use crate::graph::{CompressedGraph, GraphBuilder};
use log;

/// Load an undirected graph from a Parquet table with one edge per row.
///
/// Both endpoint columns are read as strings, so integer and string
/// identifiers work alike. Rows with a missing endpoint are skipped.
pub fn load_edge_table(
    path: &str,
    source_column: &str,
    target_column: &str,
    strict: bool,
) -> Result<CompressedGraph> {
    log::info!("Reading parquet file: {}", path);

    // Check if the file exists
    if !std::path::Path::new(path).exists() {
        return Err(anyhow::anyhow!("File not found: {}", path));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .select([col(source_column), col(target_column)])
        .collect()
        .with_context(|| format!("reading columns {source_column}, {target_column} from {path}"))?;

    log::debug!("File schema: {:?}", df.schema());

    let sources = df.column(source_column)?.cast(&DataType::String)?;
    let targets = df.column(target_column)?.cast(&DataType::String)?;
    let sources = sources.str()?;
    let targets = targets.str()?;

    let row_count = df.height();
    log::info!("Processing {} edge rows", row_count);

    let mut builder = GraphBuilder::with_capacity(row_count, strict);
    let mut missing = 0usize;

    for i in 0..row_count {
        match (sources.get(i), targets.get(i)) {
            (Some(src), Some(dst)) => builder
                .add_edge(src, dst)
                .with_context(|| format!("row {i} of {path}"))?,
            _ => missing += 1,
        }
    }

    if missing > 0 {
        log::warn!("Skipped {} rows with a missing endpoint", missing);
    }

    let graph = builder.build().with_context(|| format!("building graph from {path}"))?;
    log::info!("Loaded graph with {} nodes and {} edges", graph.node_count, graph.neighbors.len() / 2);

    Ok(graph)
}
