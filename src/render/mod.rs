//! Plots of an analysis
//!
//! Every dataset gets a circular plot and a force-directed plot of its
//! ranked subgraph, a bar chart of the ranking and a bar chart of degree
//! centrality. The force-directed plot of the whole graph is optional.

pub mod layout;
mod plots;

pub use layout::{circular_layout, force_layout, ForceParams, Point};
pub use plots::{diverging, draw_bars, draw_circos, draw_network};

use crate::config::Config;
use crate::pipeline::Analysis;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errors from drawing plots
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File name suffixes of the rendered plots
pub mod artifact {
    pub const CIRCOS: &str = "top_circos.svg";
    pub const TOP_NETWORK: &str = "top_spring_layout.svg";
    pub const FULL_NETWORK: &str = "spring_layout.svg";
    pub const RANK: &str = "top_rank.svg";
    pub const CENTRALITY: &str = "top_degree_centrality.svg";
}

/// Draw every plot for `analysis`, returning the written paths
pub fn render_analysis(analysis: &Analysis, config: &Config) -> Result<Vec<PathBuf>, RenderError> {
    let pipeline = &config.pipeline;
    let render = &config.render;
    std::fs::create_dir_all(&pipeline.output_dir)?;

    let network_size = (render.width, render.height);
    let bar_size = (render.bar_width, render.bar_height);
    let force = ForceParams {
        iterations: render.layout_iterations,
        ..ForceParams::default()
    };
    let mut written = Vec::new();

    let path = pipeline.artifact_path(artifact::CIRCOS);
    draw_circos(
        &analysis.top_graph,
        &circular_layout(&analysis.top_graph),
        &pipeline.node_attribute,
        &path,
        network_size,
    )?;
    written.push(path);

    let path = pipeline.artifact_path(artifact::TOP_NETWORK);
    draw_network(
        &analysis.top_graph,
        &force_layout(&analysis.top_graph, force),
        &path,
        network_size,
    )?;
    written.push(path);

    if render.full_graph {
        let path = pipeline.artifact_path(artifact::FULL_NETWORK);
        draw_network(
            &analysis.graph,
            &force_layout(&analysis.graph, force),
            &path,
            network_size,
        )?;
        written.push(path);
    }

    let rank: Vec<(String, f64)> = analysis
        .top
        .iter()
        .map(|e| (e.name.clone(), f64::from(e.count)))
        .collect();
    let path = pipeline.artifact_path(artifact::RANK);
    draw_bars(
        &format!("Top {}", pipeline.output_prefix),
        "Count",
        &rank,
        &path,
        bar_size,
    )?;
    written.push(path);

    let centrality: Vec<(String, f64)> = analysis
        .centrality
        .iter()
        .map(|s| (s.name.clone(), s.value))
        .collect();
    let path = pipeline.artifact_path(artifact::CENTRALITY);
    draw_bars(
        &format!("{} degree centrality", pipeline.output_prefix),
        "Degree centrality",
        &centrality,
        &path,
        bar_size,
    )?;
    written.push(path);

    info!(
        dataset = %pipeline.output_prefix,
        plots = written.len(),
        dir = %pipeline.output_dir.display(),
        "rendered plots"
    );
    Ok(written)
}
