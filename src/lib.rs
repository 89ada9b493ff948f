//! Clique percolation community detection

pub mod config;
pub mod error;
pub mod graph;
pub mod clique;
pub mod cluster;
pub mod cpm;
pub mod data;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use clique::{Clique, CliqueId, CliqueIndex, LevelObserver, LevelReport};
pub use cluster::{Community, Component, PercolationGraph};
pub use config::{CpmConfig, MergeStrategy};
pub use cpm::{cpm_run, cpm_run_with, CpmOutcome, RunStats};
pub use error::{CpmError, CpmResult, MalformedGraph};
pub use graph::{CompressedGraph, GraphBuilder, GraphView};
