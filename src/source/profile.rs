//! Expertise profile page parsing
//!
//! A profile page names its owner in the first `h3` of the `.profile`
//! block. Tags come from two places, both comma-separated:
//! - `<body data-tags="...">`, where every entry carries a two-character
//!   prefix that is not part of the tag
//! - `<meta name="keywords" content="...">`, used by older pages

use super::fetch::FetchError;
use crate::graph::normalize_tag;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// A parsed profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    /// De-duplicated, normalized tags in page order
    pub tags: Vec<String>,
}

/// Why a profile produced no record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileFailure {
    #[error("page has no profile name")]
    MissingProfileMarker,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("profile lists no expertise")]
    EmptyTagSet,
}

impl From<FetchError> for ProfileFailure {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Network(msg) => Self::Network(msg),
            FetchError::Status { status } => Self::Status(status),
        }
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector parses")
}

/// Parse a profile page
pub fn parse_profile(html: &str) -> Result<Profile, ProfileFailure> {
    let document = Html::parse_document(html);

    let name = document
        .select(&selector(".profile"))
        .next()
        .and_then(|profile| profile.select(&selector("h3")).next())
        .map(|h3| h3.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(ProfileFailure::MissingProfileMarker)?;

    let mut tags: Vec<String> = Vec::new();

    if let Some(data_tags) = document
        .select(&selector("body"))
        .next()
        .and_then(|body| body.value().attr("data-tags"))
    {
        tags.extend(
            data_tags
                .split(',')
                .filter_map(|entry| normalize_tag(strip_prefix(entry.trim()))),
        );
    }

    if let Some(keywords) = document
        .select(&selector(r#"meta[name="keywords"]"#))
        .next()
        .and_then(|meta| meta.value().attr("content"))
    {
        tags.extend(keywords.split(',').filter_map(normalize_tag));
    }

    let mut seen = HashSet::new();
    tags.retain(|t| seen.insert(t.clone()));

    if tags.is_empty() {
        return Err(ProfileFailure::EmptyTagSet);
    }

    Ok(Profile { name, tags })
}

/// Drop the two-character prefix of a `data-tags` entry
fn strip_prefix(entry: &str) -> &str {
    match entry.char_indices().nth(2) {
        Some((idx, _)) => &entry[idx..],
        None => "",
    }
}

/// Hrefs on a search results page that point at a profile
pub fn profile_links(html: &str, marker: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&selector("a[href]"))
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && href.contains(marker))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"<html>
<head><meta name="keywords" content="Comfort, Seating , usability"></head>
<body data-tags="1:Biomechanics, 2:Comfort,3:Orthopedics">
  <div class="profile"><img src="x.png"><h3> Dr. A. Jansen </h3></div>
</body></html>"#;

    #[test]
    fn parses_name_and_merges_tag_sources() {
        let profile = parse_profile(PROFILE).unwrap();
        assert_eq!(profile.name, "Dr. A. Jansen");
        assert_eq!(
            profile.tags,
            vec!["biomechanics", "comfort", "orthopedics", "seating", "usability"]
        );
    }

    #[test]
    fn missing_profile_block() {
        let html = "<html><body data-tags='1:x'><h3>Someone</h3></body></html>";
        assert_eq!(parse_profile(html), Err(ProfileFailure::MissingProfileMarker));
    }

    #[test]
    fn profile_without_heading() {
        let html = "<html><body><div class='profile'><p>x</p></div></body></html>";
        assert_eq!(parse_profile(html), Err(ProfileFailure::MissingProfileMarker));
    }

    #[test]
    fn profile_without_tags() {
        let html = "<html><body data-tags=''><div class='profile'><h3>B</h3></div></body></html>";
        assert_eq!(parse_profile(html), Err(ProfileFailure::EmptyTagSet));
    }

    #[test]
    fn prefix_strip_is_char_based() {
        assert_eq!(strip_prefix("1:Ergonomie"), "Ergonomie");
        assert_eq!(strip_prefix("é:x"), "x");
        assert_eq!(strip_prefix("1"), "");
    }

    #[test]
    fn finds_profile_links() {
        let html = r#"<a href="/en/staff/personen/a-jansen">A</a>
<a href="https://www.tudelft.nl/personen/b-smit">B</a>
<a href="/io/onderzoek">other</a><a>no href</a>"#;
        assert_eq!(
            profile_links(html, "personen/"),
            vec!["/en/staff/personen/a-jansen", "https://www.tudelft.nl/personen/b-smit"]
        );
    }

    #[test]
    fn fetch_errors_map_to_failures() {
        assert_eq!(
            ProfileFailure::from(FetchError::Status { status: 404 }),
            ProfileFailure::Status(404)
        );
        assert!(matches!(
            ProfileFailure::from(FetchError::Network("reset".into())),
            ProfileFailure::Network(_)
        ));
    }
}
