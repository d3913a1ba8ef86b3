//! Tag sources: delimited keyword files and scraped expertise profiles
//!
//! Both produce [`TagRecords`](crate::graph::TagRecords) and share the same
//! skip rules: malformed input is dropped with a log line, and entities
//! left with fewer than two tags cannot co-occur so are discarded.

mod delimited;
mod fetch;
mod profile;
mod scrape;

pub use delimited::{load_delimited, read_delimited, LoadStats};
pub use fetch::{FetchError, HttpFetcher, PageFetcher, StaticFetcher};
pub use profile::{parse_profile, profile_links, Profile, ProfileFailure};
pub use scrape::{ProfileOutcome, ProfileScraper, ScrapeReport};

use thiserror::Error;

/// Errors that stop a source from producing records
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Minimum number of tags an entity needs to form a pair
pub const MIN_TAGS: usize = 2;
