//! Top-level error type

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::render::RenderError;
use crate::source::SourceError;
use thiserror::Error;

/// Errors that abort a tagnet run
#[derive(Debug, Error)]
pub enum TagnetError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Result type for tagnet operations
pub type TagnetResult<T> = Result<T, TagnetError>;
