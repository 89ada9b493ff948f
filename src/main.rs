use anyhow::Result;
use clap::Parser;
use std::ops::ControlFlow;
use std::time::Duration;

use clique_percolation::clique::LevelReport;
use clique_percolation::config::{CpmConfig, MergeStrategy};
use clique_percolation::cpm::cpm_run_with;
use clique_percolation::data::{self, preprocessing, EdgeColumns};
use clique_percolation::storage;

#[derive(Parser, Debug)]
#[clap(
    name = "clique-percolation",
    about = "Overlapping community detection with the clique percolation method"
)]
struct Cli {
    /// Path to the input graph (edge list, .parquet table or .bin snapshot)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "cpm_results")]
    output_dir: String,

    /// Clique size to percolate
    #[clap(long, short, default_value = "3")]
    k: usize,

    /// Component extraction strategy (generational is only practical on sparse percolation graphs)
    #[clap(long, value_enum, default_value = "union-find")]
    merge_strategy: MergeStrategy,

    /// Pair loops over fewer items than this run on a single thread
    #[clap(long, default_value = "1000")]
    parallel_threshold: usize,

    /// Abort if enumeration is still running after this many seconds
    #[clap(long)]
    time_budget_secs: Option<u64>,

    /// Fail on self-loops and duplicate edges instead of dropping them
    #[clap(long)]
    strict: bool,

    /// Drop nodes with fewer than k-1 neighbors before enumeration
    #[clap(long)]
    prune: bool,

    /// Only analyse the subgraph induced by the first N loaded nodes
    #[clap(long)]
    first_nodes: Option<usize>,

    /// Source column of a Parquet edge table
    #[clap(long, default_value = "source")]
    source_column: String,

    /// Target column of a Parquet edge table
    #[clap(long, default_value = "target")]
    target_column: String,

    /// Also write the loaded graph as a binary snapshot to this path
    #[clap(long)]
    save_graph: Option<String>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting clique percolation analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    let config = CpmConfig::new(
        args.k,
        args.merge_strategy,
        args.parallel_threshold,
        args.time_budget_secs.map(Duration::from_secs),
    );

    // 1. Load data
    let columns = EdgeColumns {
        source: args.source_column.clone(),
        target: args.target_column.clone(),
    };
    let mut graph = data::load_graph(&args.input, &columns, args.strict)?;

    if let Some(path) = &args.save_graph {
        storage::save_graph_snapshot(&graph, path)?;
    }

    // 2. Narrow the graph if requested
    if let Some(count) = args.first_nodes {
        graph = preprocessing::first_nodes(&graph, count);
        log::info!("Restricted to the first {} nodes", graph.node_count);
    }
    if args.prune {
        graph = preprocessing::filter_by_degree(&graph, args.k.saturating_sub(1));
    }

    // 3. Find communities
    let mut observer = |report: &LevelReport| -> ControlFlow<()> {
        log::debug!(
            "Level done: {} cliques of size {} after {:?}",
            report.clique_count,
            report.clique_size,
            report.elapsed
        );
        ControlFlow::Continue(())
    };
    let outcome = cpm_run_with(&graph, &config, &mut observer)?;

    log::info!("Found {} communities", outcome.communities.len());

    // 4. Save results
    storage::save_results(&outcome, &graph, &config, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn help_warns_about_generational_cost() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("only practical on sparse percolation graphs"));
    }

    #[test]
    fn parses_merge_strategy_flag() {
        let args = Cli::parse_from(["clique-percolation", "--input", "g.txt", "--merge-strategy", "generational"]);
        assert_eq!(args.merge_strategy, MergeStrategy::Generational);
        assert_eq!(args.k, 3);
    }
}
