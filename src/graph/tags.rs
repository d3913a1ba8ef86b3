//! Entity → tag-list records and tag normalization

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What happens to a tag that appears more than once on one entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateTagPolicy {
    /// Count each tag once per entity (pairs and frequencies)
    #[default]
    Collapse,
    /// Count every occurrence; repeated tags inflate pair counts and
    /// frequencies, but a tag never pairs with itself
    Keep,
}

impl DuplicateTagPolicy {
    /// The tag list as the counting stages see it
    pub fn apply<'a>(&self, tags: &'a [String]) -> Vec<&'a str> {
        match self {
            Self::Keep => tags.iter().map(String::as_str).collect(),
            Self::Collapse => {
                let mut seen = HashSet::new();
                tags.iter()
                    .map(String::as_str)
                    .filter(|t| seen.insert(*t))
                    .collect()
            }
        }
    }
}

/// Trim and lower-case a raw tag; empty tags are dropped
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}

/// Split a delimited tag field into normalized tags
pub fn split_tags(field: &str, delimiter: &str) -> Vec<String> {
    field.split(delimiter).filter_map(normalize_tag).collect()
}

/// Mapping from entity ID (paper, person) to its tags
///
/// Entities keep their encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecords {
    entries: IndexMap<String, Vec<String>>,
}

impl TagRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity's tags, returning the replaced list
    pub fn insert(&mut self, entity: impl Into<String>, tags: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(entity.into(), tags)
    }

    pub fn get(&self, entity: &str) -> Option<&[String]> {
        self.entries.get(entity).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(entity, tags)` in encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Flat sequence of tag occurrences, one per entity per tag under `policy`
    pub fn occurrences(&self, policy: DuplicateTagPolicy) -> impl Iterator<Item = &str> {
        self.entries.values().flat_map(move |tags| policy.apply(tags))
    }

    /// Swap the roles of entity and tag for the given tags
    ///
    /// Each kept tag becomes an entity whose "tags" are the entities that
    /// carry it. Keys follow the order of `keep`; tags nobody carries are
    /// left out.
    pub fn invert<'a>(
        &self,
        keep: impl IntoIterator<Item = &'a str>,
        policy: DuplicateTagPolicy,
    ) -> TagRecords {
        let mut by_tag: IndexMap<String, Vec<String>> = keep
            .into_iter()
            .map(|tag| (tag.to_string(), Vec::new()))
            .collect();

        for (entity, tags) in self.iter() {
            for tag in policy.apply(tags) {
                if let Some(holders) = by_tag.get_mut(tag) {
                    holders.push(entity.to_string());
                }
            }
        }

        by_tag.retain(|_, holders| !holders.is_empty());
        TagRecords { entries: by_tag }
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for TagRecords {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut records = TagRecords::new();
        for (entity, tags) in iter {
            records.insert(entity, tags);
        }
        records
    }
}
