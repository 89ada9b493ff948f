//! Dataset loading and preprocessing

pub mod edgelist;
pub mod parquet;
pub mod preprocessing;

use std::path::Path;
use anyhow::Result;
use crate::graph::CompressedGraph;

/// Where the two endpoint identifiers of each edge are read from
#[derive(Debug, Clone)]
pub struct EdgeColumns {
    /// Column holding the first endpoint (Parquet inputs)
    pub source: String,

    /// Column holding the second endpoint (Parquet inputs)
    pub target: String,
}

impl Default for EdgeColumns {
    fn default() -> Self {
        Self {
            source: "source".to_string(),
            target: "target".to_string(),
        }
    }
}

/// Load a graph, picking the reader from the file extension:
/// `.parquet` tables, `.bin` graph snapshots, anything else as a text edge list.
pub fn load_graph(path: &str, columns: &EdgeColumns, strict: bool) -> Result<CompressedGraph> {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("parquet") => parquet::load_edge_table(path, &columns.source, &columns.target, strict),
        Some("bin") => crate::storage::load_graph_snapshot(path),
        _ => edgelist::load_edge_list(path, strict),
    }
}
