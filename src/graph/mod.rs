//! Co-occurrence graph construction and ranking

mod builder;
mod centrality;
mod cooccurrence;
mod ranking;
mod tags;

#[cfg(test)]
mod tests;

pub use builder::{CooccurrenceGraph, TagNode};
pub use centrality::{degree_centrality, NodeScore};
pub use cooccurrence::{aggregate, entity_pairs, EdgeCounts, TagPair};
pub use ranking::{frequencies, select_top, RankEntry, TopList};
pub use tags::{normalize_tag, split_tags, DuplicateTagPolicy, TagRecords};
