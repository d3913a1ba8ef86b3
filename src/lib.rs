//! tagnet: tag co-occurrence graphs
//!
//! Turns entity → tag lists (papers and their keywords, staff and their
//! expertise) into a weighted co-occurrence graph, ranks the most frequent
//! tags, induces the top-N subgraph and plots it.
//!
//! # Core Concepts
//!
//! - **Records**: entity ID → normalized tags ([`TagRecords`])
//! - **Edges**: unordered tag pairs counted over entities ([`EdgeCounts`])
//! - **Ranking**: the N most frequent tags ([`TopList`]) and the subgraph they induce
//!
//! # Example
//!
//! ```
//! use tagnet::{analyze, PipelineConfig, TagRecords};
//!
//! let records: TagRecords = vec![
//!     ("P1", vec!["a".to_string(), "b".to_string(), "c".to_string()]),
//!     ("P2", vec!["a".to_string(), "b".to_string()]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let analysis = analyze(&records, &PipelineConfig::default());
//! assert_eq!(analysis.edge_counts.get("a", "b"), Some(2));
//! ```

pub mod config;
mod error;
pub mod export;
pub mod graph;
pub mod pipeline;
pub mod render;
pub mod source;

pub use config::{Config, ConfigError, PipelineConfig, RenderConfig, ScrapeConfig};
pub use error::{TagnetError, TagnetResult};
pub use graph::{
    CooccurrenceGraph, DuplicateTagPolicy, EdgeCounts, NodeScore, RankEntry, TagPair, TagRecords,
    TopList,
};
pub use pipeline::{analyze, run_expertise, run_keywords, Analysis, ExpertiseReport, RunReport};
pub use source::{HttpFetcher, PageFetcher, ProfileFailure, SourceError, StaticFetcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
