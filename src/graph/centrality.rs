//! Degree centrality

use super::builder::CooccurrenceGraph;
use serde::{Deserialize, Serialize};

/// A per-node score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeScore {
    pub name: String,
    pub value: f64,
}

/// Normalized degree centrality, lowest first (ties by name)
///
/// `degree / (n - 1)` for an `n`-node graph. A lone node scores 1.0.
pub fn degree_centrality(graph: &CooccurrenceGraph) -> Vec<NodeScore> {
    let n = graph.node_count();
    let inner = graph.inner();
    let mut scores: Vec<NodeScore> = inner
        .node_indices()
        .map(|ix| {
            let value = if n <= 1 {
                1.0
            } else {
                inner.neighbors(ix).count() as f64 / (n - 1) as f64
            };
            NodeScore {
                name: inner[ix].name.clone(),
                value,
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    scores
}
