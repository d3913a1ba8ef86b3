//! Shared fixtures for tagnet integration tests
//!
//! A small keyword file and a fake expertise site served through
//! `StaticFetcher`.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::{expertise_site, keyword_csv, write_keyword_file, BASE_URL, SEARCH_URL};
