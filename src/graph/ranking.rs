//! Tag frequency ranking and top-N selection

use super::builder::CooccurrenceGraph;
use super::tags::{DuplicateTagPolicy, TagRecords};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A name with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub name: String,
    pub count: u32,
}

/// Tag occurrence counts over all entities, most frequent first
///
/// Ties are ordered by name so the ranking is reproducible.
pub fn frequencies(records: &TagRecords, policy: DuplicateTagPolicy) -> Vec<RankEntry> {
    let mut counter: HashMap<&str, u32> = HashMap::new();
    for tag in records.occurrences(policy) {
        *counter.entry(tag).or_insert(0) += 1;
    }

    let mut ranked: Vec<RankEntry> = counter
        .into_iter()
        .map(|(name, count)| RankEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// The N most frequent names, descending by count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopList {
    entries: Vec<RankEntry>,
}

impl TopList {
    /// Rank all tags of `records` and keep the first `n`
    pub fn from_records(records: &TagRecords, policy: DuplicateTagPolicy, n: usize) -> Self {
        let mut entries = frequencies(records, policy);
        entries.truncate(n);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn count_of(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.count)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.count_of(name).is_some()
    }

    /// Highest count, 0 when empty
    pub fn max_count(&self) -> u32 {
        self.entries.first().map(|e| e.count).unwrap_or(0)
    }
}

/// Rank the tags of `records` and induce the top-N subgraph of `graph`
pub fn select_top(
    graph: &CooccurrenceGraph,
    records: &TagRecords,
    policy: DuplicateTagPolicy,
    n: usize,
) -> (TopList, CooccurrenceGraph) {
    let top = TopList::from_records(records, policy, n);
    let sub = graph.induced(&top);
    (top, sub)
}
