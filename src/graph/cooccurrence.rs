//! Pairwise tag co-occurrence counting
//!
//! Every entity contributes each unordered pair of its tags once. Pairs
//! are held in lexicographic orientation so (a, b) and (b, a) land on
//! the same counter.

use super::tags::{DuplicateTagPolicy, TagRecords};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unordered pair of distinct tags, stored with `first < second`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TagPair {
    first: String,
    second: String,
}

impl TagPair {
    /// Build the canonical pair; `None` when both tags are the same
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Option<Self> {
        let (a, b) = (a.into(), b.into());
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

impl std::fmt::Display for TagPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Co-occurrence count per tag pair, iterated in canonical pair order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeCounts {
    counts: BTreeMap<TagPair, u32>,
}

impl EdgeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one co-occurrence of `pair`
    pub fn increment(&mut self, pair: TagPair) {
        *self.counts.entry(pair).or_insert(0) += 1;
    }

    /// Set the count of a pair outright; zero counts are not stored
    pub fn set(&mut self, pair: TagPair, count: u32) {
        if count == 0 {
            self.counts.remove(&pair);
        } else {
            self.counts.insert(pair, count);
        }
    }

    /// Count for the pair in either orientation
    pub fn get(&self, a: &str, b: &str) -> Option<u32> {
        let pair = TagPair::new(a, b)?;
        self.counts.get(&pair).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TagPair, u32)> {
        self.counts.iter().map(|(pair, count)| (pair, *count))
    }

    /// Sum of all counts, i.e. the number of pairs generated
    pub fn total(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }
}

impl FromIterator<(TagPair, u32)> for EdgeCounts {
    fn from_iter<I: IntoIterator<Item = (TagPair, u32)>>(iter: I) -> Self {
        let mut counts = EdgeCounts::new();
        for (pair, count) in iter {
            counts.set(pair, count);
        }
        counts
    }
}

/// All 2-combinations of one entity's tags, in list order
///
/// With `k` distinct tags this yields exactly `k * (k - 1) / 2` pairs.
pub fn entity_pairs(tags: &[String], policy: DuplicateTagPolicy) -> Vec<TagPair> {
    let tags = policy.apply(tags);
    let mut pairs = Vec::new();
    for i in 0..tags.len() {
        for j in (i + 1)..tags.len() {
            if let Some(pair) = TagPair::new(tags[i], tags[j]) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

/// Count every pair over all entities
pub fn aggregate(records: &TagRecords, policy: DuplicateTagPolicy) -> EdgeCounts {
    let mut counts = EdgeCounts::new();
    for (_, tags) in records.iter() {
        for pair in entity_pairs(tags, policy) {
            counts.increment(pair);
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pair_orientation_is_canonical() {
        let ab = TagPair::new("b", "a").unwrap();
        assert_eq!(ab.first(), "a");
        assert_eq!(ab.second(), "b");
        assert_eq!(ab, TagPair::new("a", "b").unwrap());
        assert!(TagPair::new("a", "a").is_none());
    }

    #[test]
    fn entity_pairs_is_k_choose_2() {
        for k in 0..8usize {
            let list: Vec<String> = (0..k).map(|i| format!("t{}", i)).collect();
            let expected = k * k.saturating_sub(1) / 2;
            assert_eq!(entity_pairs(&list, DuplicateTagPolicy::Collapse).len(), expected, "k = {}", k);
        }
    }

    #[test]
    fn collapse_ignores_repeated_tags() {
        let list = tags(&["a", "b", "a"]);
        let pairs = entity_pairs(&list, DuplicateTagPolicy::Collapse);
        assert_eq!(pairs, vec![TagPair::new("a", "b").unwrap()]);
    }

    #[test]
    fn keep_inflates_but_never_self_pairs() {
        let list = tags(&["a", "b", "a"]);
        let pairs = entity_pairs(&list, DuplicateTagPolicy::Keep);
        // (a,b), (a,a) skipped, (b,a)
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|p| p.first() != p.second()));
    }

    #[test]
    fn aggregate_counts_entities_sharing_both_tags() {
        let records: TagRecords = vec![
            ("p1", tags(&["x", "y", "z"])),
            ("p2", tags(&["y", "x"])),
            ("p3", tags(&["x", "y"])),
        ]
        .into_iter()
        .collect();

        let counts = aggregate(&records, DuplicateTagPolicy::Collapse);
        assert_eq!(counts.get("x", "y"), Some(3));
        assert_eq!(counts.get("y", "x"), Some(3));
        assert_eq!(counts.get("x", "z"), Some(1));
        assert_eq!(counts.get("q", "x"), None);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn set_zero_removes_pair() {
        let mut counts = EdgeCounts::new();
        let pair = TagPair::new("a", "b").unwrap();
        counts.set(pair.clone(), 4);
        assert_eq!(counts.len(), 1);
        counts.set(pair, 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn iteration_is_sorted_by_pair() {
        let counts: EdgeCounts = vec![
            (TagPair::new("m", "z").unwrap(), 1),
            (TagPair::new("a", "q").unwrap(), 2),
            (TagPair::new("a", "b").unwrap(), 3),
        ]
        .into_iter()
        .collect();
        let order: Vec<String> = counts.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(order, vec!["(a, b)", "(a, q)", "(m, z)"]);
    }
}
