//! Expertise scraper: search pages → profile pages → tag records
//!
//! Requests run one at a time. A failed search term or profile is logged
//! and skipped; only setup errors (bad base URL) abort the run.

use super::fetch::{FetchError, PageFetcher};
use super::profile::{parse_profile, profile_links, Profile, ProfileFailure};
use super::{SourceError, MIN_TAGS};
use crate::config::ScrapeConfig;
use crate::graph::TagRecords;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Result of fetching and parsing one profile URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutcome {
    pub url: String,
    pub result: Result<Profile, ProfileFailure>,
}

/// What happened during a scrape
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// Search terms whose results page could not be fetched
    pub failed_terms: Vec<(String, FetchError)>,
    pub outcomes: Vec<ProfileOutcome>,
    /// Profiles parsed fine but with fewer than two tags
    pub too_few_tags: usize,
}

impl ScrapeReport {
    pub fn profiles_ok(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ProfileFailure)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.url.as_str(), e)))
    }
}

/// Collects expertise tags per person
pub struct ProfileScraper {
    fetcher: Arc<dyn PageFetcher>,
    config: ScrapeConfig,
}

impl ProfileScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    /// Profile URLs found across all search terms, absolute and de-duplicated
    pub async fn search(&self, report: &mut ScrapeReport) -> Result<Vec<String>, SourceError> {
        let base = Url::parse(&self.config.base_url)?;
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for term in &self.config.search_terms {
            info!(term = %term, "searching for people with expertise");
            let html = match self.fetcher.fetch(&self.config.search_url, &[("q", term.as_str())]).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(term = %term, error = %e, "search failed, skipping term");
                    report.failed_terms.push((term.clone(), e));
                    continue;
                }
            };

            for href in profile_links(&html, &self.config.profile_marker) {
                let resolved = match base.join(&href) {
                    Ok(url) => url.to_string(),
                    Err(e) => {
                        debug!(href = %href, error = %e, "unresolvable profile link");
                        continue;
                    }
                };
                if seen.insert(resolved.clone()) {
                    urls.push(resolved);
                }
            }
        }

        Ok(urls)
    }

    /// Fetch and parse one profile
    pub async fn fetch_profile(&self, url: &str) -> ProfileOutcome {
        let result = match self.fetcher.fetch(url, &[]).await {
            Ok(html) => parse_profile(&html),
            Err(e) => Err(ProfileFailure::from(e)),
        };
        ProfileOutcome {
            url: url.to_string(),
            result,
        }
    }

    /// Run the full scrape
    pub async fn scrape(&self) -> Result<(TagRecords, ScrapeReport), SourceError> {
        let mut report = ScrapeReport::default();
        let urls = self.search(&mut report).await?;
        info!(profiles = urls.len(), "profile links found");

        let mut records = TagRecords::new();
        for url in urls {
            let outcome = self.fetch_profile(&url).await;
            match &outcome.result {
                Ok(profile) => {
                    info!(name = %profile.name, tags = profile.tags.len(), "collected expertise");
                    if profile.tags.len() < MIN_TAGS {
                        report.too_few_tags += 1;
                    } else if records.insert(profile.name.clone(), profile.tags.clone()).is_some() {
                        warn!(name = %profile.name, "duplicate profile name, keeping the later page");
                    }
                }
                Err(failure) => {
                    warn!(url = %outcome.url, reason = %failure, "skipping profile");
                }
            }
            report.outcomes.push(outcome);
        }

        info!(
            people = records.len(),
            failed = report.outcomes.len() - report.profiles_ok(),
            failed_terms = report.failed_terms.len(),
            "scrape finished"
        );
        Ok((records, report))
    }
}
