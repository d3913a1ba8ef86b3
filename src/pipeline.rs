//! The analysis pipeline: records → pairs → graph → top-N → centrality
//!
//! `analyze` is pure and does all the counting. The `run_*` functions
//! wire a source to it and write exports and plots.

use crate::config::{Config, PipelineConfig};
use crate::error::TagnetResult;
use crate::export::export_analysis;
use crate::graph::{
    aggregate, degree_centrality, select_top, CooccurrenceGraph, EdgeCounts, NodeScore, TagRecords,
    TopList,
};
use crate::render::render_analysis;
use crate::source::{load_delimited, PageFetcher, ProfileScraper, ScrapeReport};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Everything computed for one dataset
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Number of entities that went in
    pub entities: usize,
    pub edge_counts: EdgeCounts,
    pub graph: CooccurrenceGraph,
    pub top: TopList,
    /// Ranked subgraph, nodes annotated with their frequency
    pub top_graph: CooccurrenceGraph,
    /// Degree centrality of the ranked subgraph, ascending
    pub centrality: Vec<NodeScore>,
}

/// Serializable digest of an analysis
#[derive(Debug, Clone, Serialize)]
pub struct Summary<'a> {
    pub dataset: &'a str,
    pub node_attribute: &'a str,
    pub entities: usize,
    pub nodes: usize,
    pub edges: usize,
    pub top_nodes: usize,
    pub top_edges: usize,
    pub top: &'a TopList,
    pub degree_centrality: &'a [NodeScore],
}

impl Analysis {
    pub fn summary<'a>(&'a self, pipeline: &'a PipelineConfig) -> Summary<'a> {
        Summary {
            dataset: &pipeline.output_prefix,
            node_attribute: &pipeline.node_attribute,
            entities: self.entities,
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            top_nodes: self.top_graph.node_count(),
            top_edges: self.top_graph.edge_count(),
            top: &self.top,
            degree_centrality: &self.centrality,
        }
    }
}

/// Run the counting stages on one set of records
pub fn analyze(records: &TagRecords, pipeline: &PipelineConfig) -> Analysis {
    let policy = pipeline.duplicate_tags;

    let edge_counts = aggregate(records, policy);
    let graph = CooccurrenceGraph::from_edge_counts(&edge_counts);
    let (top, top_graph) = select_top(&graph, records, policy, pipeline.top_n);
    let centrality = degree_centrality(&top_graph);

    info!(
        dataset = %pipeline.output_prefix,
        entities = records.len(),
        pairs = edge_counts.total(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        top_nodes = top_graph.node_count(),
        top_edges = top_graph.edge_count(),
        "built co-occurrence graph"
    );

    Analysis {
        entities: records.len(),
        edge_counts,
        graph,
        top,
        top_graph,
        centrality,
    }
}

/// Outcome of one dataset run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub dataset: String,
    pub analysis: Analysis,
    pub artifacts: Vec<PathBuf>,
}

/// Write exports and, when enabled, plots
pub fn publish(analysis: &Analysis, config: &Config) -> TagnetResult<Vec<PathBuf>> {
    let mut artifacts = export_analysis(analysis, &config.pipeline)?;
    if config.render.enabled {
        artifacts.extend(render_analysis(analysis, config)?);
    }
    Ok(artifacts)
}

fn finish(records: &TagRecords, config: &Config) -> TagnetResult<RunReport> {
    let analysis = analyze(records, &config.pipeline);
    let artifacts = publish(&analysis, config)?;
    Ok(RunReport {
        dataset: config.pipeline.output_prefix.clone(),
        analysis,
        artifacts,
    })
}

/// Keyword dataset: delimited file in, artifacts out
pub fn run_keywords(input: &Path, config: &Config) -> TagnetResult<RunReport> {
    config.validate()?;
    let records = load_delimited(input, config)?;
    finish(&records, config)
}

/// Reports of an expertise run
#[derive(Debug, Clone)]
pub struct ExpertiseReport {
    pub scrape: ScrapeReport,
    /// Tags co-occurring on people
    pub expertise: RunReport,
    /// People co-occurring on the top tags
    pub people: RunReport,
}

/// Configuration of the people graph derived from an expertise config
pub fn people_config(config: &Config) -> Config {
    let mut people = config.clone();
    people.pipeline.top_n = config.scrape.people_top_n;
    people.pipeline.output_prefix = "People".to_string();
    people.pipeline.node_attribute = "Number of expertises".to_string();
    people
}

/// Expertise dataset: scrape profiles, then build the expertise graph and
/// the inverted people graph over the top expertises
pub async fn run_expertise(fetcher: Arc<dyn PageFetcher>, config: &Config) -> TagnetResult<ExpertiseReport> {
    config.validate_scrape()?;
    let scraper = ProfileScraper::new(fetcher, config.scrape.clone());
    let (records, scrape) = scraper.scrape().await?;

    let expertise = finish(&records, config)?;

    let people_cfg = people_config(config);
    let people_records = records.invert(expertise.analysis.top.names(), config.pipeline.duplicate_tags);
    let people = finish(&people_records, &people_cfg)?;

    Ok(ExpertiseReport {
        scrape,
        expertise,
        people,
    })
}
