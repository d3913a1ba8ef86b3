//! Run configuration
//!
//! Every parameter of a run lives here instead of in constants: cut-offs,
//! delimiters, output naming, render sizes and the scraper's search setup.
//! A config is read from YAML (all fields optional), then overridden by
//! CLI flags, then validated before any stage runs.

use crate::graph::DuplicateTagPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Full run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub render: RenderConfig,
    pub scrape: ScrapeConfig,
}

/// Parameters shared by every pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of most frequent tags kept in the ranked subgraph
    pub top_n: usize,
    /// Separator between tags inside one field
    pub tag_delimiter: String,
    /// Separator between columns of the input file
    pub field_delimiter: char,
    /// Prefix of every artifact file name
    pub output_prefix: String,
    /// Directory artifacts are written to
    pub output_dir: PathBuf,
    /// What happens to a tag repeated within one entity
    pub duplicate_tags: DuplicateTagPolicy,
    /// Display name of the frequency attribute on ranked nodes
    pub node_attribute: String,
}

impl PipelineConfig {
    /// Path of an output artifact: `<output_dir>/<prefix>_<suffix>`
    pub fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}", self.output_prefix, suffix))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: 70,
            tag_delimiter: ";".to_string(),
            field_delimiter: ',',
            output_prefix: "Keywords".to_string(),
            output_dir: PathBuf::from("."),
            duplicate_tags: DuplicateTagPolicy::Collapse,
            node_attribute: "Number of papers".to_string(),
        }
    }
}

/// Plot settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Skip all image output when false
    pub enabled: bool,
    /// Size of the network plots in pixels
    pub width: u32,
    pub height: u32,
    /// Size of the bar charts in pixels
    pub bar_width: u32,
    pub bar_height: u32,
    /// Also draw the force-directed layout of the unranked graph
    pub full_graph: bool,
    /// Simulation steps of the force-directed layout
    pub layout_iterations: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 2000,
            height: 2000,
            bar_width: 700,
            bar_height: 1100,
            full_graph: false,
            layout_iterations: 300,
        }
    }
}

/// Where and how expertise profiles are scraped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Base that relative profile links are resolved against
    pub base_url: String,
    /// Search endpoint; each term is sent as the `q` query parameter
    pub search_url: String,
    pub search_terms: Vec<String>,
    /// Substring identifying a profile link on a search results page
    pub profile_marker: String,
    pub timeout_secs: u64,
    /// Cut-off for the inverted (people) graph
    pub people_top_n: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.tudelft.nl/".to_string(),
            search_url: "https://www.tudelft.nl/io/onderzoek/expertise".to_string(),
            search_terms: [
                "scanning",
                "usability",
                "biomechanics",
                "orthopedics",
                "digital human modeling",
                "physical ergonomics",
                "anthropometry",
                "comfort",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            profile_marker: "personen/".to_string(),
            timeout_secs: 30,
            people_top_n: 50,
        }
    }
}

impl Config {
    /// Defaults for the expertise dataset (different cut-off and naming)
    pub fn expertise_defaults() -> Self {
        let mut config = Self::default();
        config.pipeline.top_n = 50;
        config.pipeline.output_prefix = "Expertises".to_string();
        config.pipeline.node_attribute = "Number of staff".to_string();
        config.render.bar_width = 1170;
        config.render.bar_height = 827;
        config.render.full_graph = true;
        config
    }

    /// Parse a configuration from YAML text
    ///
    /// Missing sections and fields fall back to `base`.
    pub fn from_yaml_str(yaml: &str, base: Config) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(base);
        }
        let base_value = serde_yaml::to_value(&base)?;
        let overlay: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let merged = merge_yaml(base_value, overlay);
        Ok(serde_yaml::from_value(merged)?)
    }

    /// Load a configuration file, layering it over `base`
    pub fn load(path: &Path, base: Config) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text, base)
    }

    /// Check the values every run depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        if p.top_n == 0 {
            return Err(ConfigError::Invalid("pipeline.top_n must be at least 1".into()));
        }
        if p.tag_delimiter.is_empty() {
            return Err(ConfigError::Invalid("pipeline.tag_delimiter must not be empty".into()));
        }
        self.field_delimiter_byte()?;
        if p.output_prefix.is_empty() {
            return Err(ConfigError::Invalid("pipeline.output_prefix must not be empty".into()));
        }
        let r = &self.render;
        if r.enabled && (r.width == 0 || r.height == 0 || r.bar_width == 0 || r.bar_height == 0) {
            return Err(ConfigError::Invalid("render sizes must be non-zero".into()));
        }
        Ok(())
    }

    /// Extra checks for runs that scrape profiles
    pub fn validate_scrape(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let s = &self.scrape;
        if s.search_terms.is_empty() {
            return Err(ConfigError::Invalid("scrape.search_terms must not be empty".into()));
        }
        if s.people_top_n == 0 {
            return Err(ConfigError::Invalid("scrape.people_top_n must be at least 1".into()));
        }
        url::Url::parse(&s.base_url)
            .map_err(|e| ConfigError::Invalid(format!("scrape.base_url: {}", e)))?;
        url::Url::parse(&s.search_url)
            .map_err(|e| ConfigError::Invalid(format!("scrape.search_url: {}", e)))?;
        Ok(())
    }

    /// Field delimiter as the byte the CSV reader expects
    pub fn field_delimiter_byte(&self) -> Result<u8, ConfigError> {
        let c = self.pipeline.field_delimiter;
        u8::try_from(c).ok().filter(u8::is_ascii).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "pipeline.field_delimiter must be a single-byte character, got {:?}",
                c
            ))
        })
    }
}

/// Recursively overlay one YAML mapping on another
fn merge_yaml(base: serde_yaml::Value, overlay: serde_yaml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => value,
                };
                base_map.insert(key, merged);
            }
            Value::Mapping(base_map)
        }
        (_, overlay) => overlay,
    }
}
