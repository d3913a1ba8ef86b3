//! Weighted undirected tag graph

use super::cooccurrence::{EdgeCounts, TagPair};
use super::ranking::TopList;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A tag node; `frequency` is set once the node belongs to a ranked subgraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    pub name: String,
    pub frequency: Option<u32>,
}

/// Undirected graph of tags weighted by co-occurrence count
///
/// One node per distinct tag, at most one edge per tag pair.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceGraph {
    graph: UnGraph<TagNode, u32>,
    index: HashMap<String, NodeIndex>,
}

impl CooccurrenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph with one edge per counted pair
    pub fn from_edge_counts(counts: &EdgeCounts) -> Self {
        let mut graph = Self::new();
        for (pair, count) in counts.iter() {
            let a = graph.ensure_node(pair.first());
            let b = graph.ensure_node(pair.second());
            graph.graph.add_edge(a, b, count);
        }
        graph
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(ix) = self.index.get(name) {
            return *ix;
        }
        let ix = self.graph.add_node(TagNode {
            name: name.to_string(),
            frequency: None,
        });
        self.index.insert(name.to_string(), ix);
        ix
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&TagNode> {
        self.index.get(name).map(|ix| &self.graph[*ix])
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &TagNode> {
        self.graph.node_weights()
    }

    /// Edges as `(pair, count)`
    pub fn edges(&self) -> impl Iterator<Item = (TagPair, u32)> + '_ {
        self.graph.edge_references().filter_map(move |e| {
            let pair = TagPair::new(
                self.graph[e.source()].name.as_str(),
                self.graph[e.target()].name.as_str(),
            )?;
            Some((pair, *e.weight()))
        })
    }

    /// Co-occurrence count between two tags
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        let (ia, ib) = (self.index.get(a)?, self.index.get(b)?);
        let edge = self.graph.find_edge(*ia, *ib)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Number of distinct neighbours of a tag
    pub fn degree(&self, name: &str) -> Option<usize> {
        let ix = self.index.get(name)?;
        Some(self.graph.neighbors(*ix).count())
    }

    /// Neighbour names of a tag, sorted
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let Some(ix) = self.index.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .graph
            .neighbors(*ix)
            .map(|n| self.graph[n].name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Re-extract the pair counts the graph was built from
    pub fn edge_counts(&self) -> EdgeCounts {
        self.edges().collect()
    }

    /// Subgraph induced by the ranked tags
    ///
    /// Keeps the ranked tags that are nodes of this graph, in rank order,
    /// each annotated with its ranked count. Only edges with both ends kept
    /// survive, with their weight unchanged.
    pub fn induced(&self, top: &TopList) -> CooccurrenceGraph {
        let mut sub = CooccurrenceGraph::new();
        let mut mapping: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        for entry in top.iter() {
            if let Some(&old) = self.index.get(&entry.name) {
                let new = sub.ensure_node(&entry.name);
                sub.graph[new].frequency = Some(entry.count);
                mapping.insert(old, new);
            }
        }

        for edge in self.graph.edge_references() {
            if let (Some(&a), Some(&b)) = (mapping.get(&edge.source()), mapping.get(&edge.target())) {
                sub.graph.add_edge(a, b, *edge.weight());
            }
        }

        sub
    }

    /// Largest co-occurrence count, 0 for an edgeless graph
    pub fn max_weight(&self) -> u32 {
        self.graph.edge_weights().copied().max().unwrap_or(0)
    }

    /// Borrow the underlying petgraph graph for layout and rendering
    pub fn inner(&self) -> &UnGraph<TagNode, u32> {
        &self.graph
    }
}
