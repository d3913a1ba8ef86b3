//! Tabular and JSON exports

use crate::config::PipelineConfig;
use crate::graph::EdgeCounts;
use crate::pipeline::Analysis;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors from writing exports
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub const EDGE_TABLE: &str = "graph_edge_table.csv";
pub const SUMMARY: &str = "summary.json";

/// Write `From,To,Count` rows, one per pair, in canonical order
pub fn write_edge_table<W: Write>(counts: &EdgeCounts, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["From", "To", "Count"])?;
    for (pair, count) in counts.iter() {
        let count = count.to_string();
        csv_writer.write_record([pair.first(), pair.second(), count.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<std::io::BufWriter<std::fs::File>, ExportError> {
    Ok(std::io::BufWriter::new(std::fs::File::create(path)?))
}

/// Write the edge table and summary of an analysis
pub fn export_analysis(analysis: &Analysis, pipeline: &PipelineConfig) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(&pipeline.output_dir)?;

    let edge_path = pipeline.artifact_path(EDGE_TABLE);
    write_edge_table(&analysis.edge_counts, create(&edge_path)?)?;

    let summary_path = pipeline.artifact_path(SUMMARY);
    let mut out = create(&summary_path)?;
    serde_json::to_writer_pretty(&mut out, &analysis.summary(pipeline))?;
    out.flush()?;

    info!(
        dataset = %pipeline.output_prefix,
        edges = analysis.edge_counts.len(),
        path = %edge_path.display(),
        "exported edge table"
    );
    Ok(vec![edge_path, summary_path])
}
