//! Delimited file loader (entity ID, tag field)

use super::{SourceError, MIN_TAGS};
use crate::config::Config;
use crate::graph::{split_tags, TagRecords};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// What the loader kept and skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub kept: usize,
    pub malformed: usize,
    pub empty: usize,
    pub too_few_tags: usize,
    pub replaced: usize,
}

/// Read records from any reader
///
/// The first row is a header. Column 0 is the entity ID, column 1 the tag
/// field; further columns are ignored.
pub fn read_delimited<R: Read>(reader: R, config: &Config) -> Result<(TagRecords, LoadStats), SourceError> {
    let pipeline = &config.pipeline;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(config.field_delimiter_byte()?)
        .from_reader(reader);

    let mut records = TagRecords::new();
    let mut stats = LoadStats::default();

    for (line, row) in csv_reader.records().enumerate() {
        stats.rows += 1;
        let row = match row {
            Ok(row) => row,
            Err(e) if is_row_error(&e) => {
                debug!(line = line + 2, error = %e, "skipping unreadable row");
                stats.malformed += 1;
                continue;
            }
            Err(e) => return Err(SourceError::Csv(e)),
        };

        let (Some(id), Some(field)) = (row.get(0), row.get(1)) else {
            debug!(line = line + 2, "skipping row with fewer than two columns");
            stats.malformed += 1;
            continue;
        };

        let id = id.trim();
        if id.is_empty() || field.trim().is_empty() {
            stats.empty += 1;
            continue;
        }

        let tags = split_tags(field, &pipeline.tag_delimiter);
        let tags = pipeline
            .duplicate_tags
            .apply(&tags)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if tags.len() < MIN_TAGS {
            stats.too_few_tags += 1;
            continue;
        }

        if records.insert(id, tags).is_some() {
            warn!(entity = id, "duplicate entity ID, keeping the later row");
            stats.replaced += 1;
        } else {
            stats.kept += 1;
        }
    }

    Ok((records, stats))
}

/// Errors confined to one row; anything else (I/O) aborts the read
fn is_row_error(e: &csv::Error) -> bool {
    matches!(
        e.kind(),
        csv::ErrorKind::Utf8 { .. } | csv::ErrorKind::UnequalLengths { .. }
    )
}

/// Load records from a file on disk
pub fn load_delimited(path: &Path, config: &Config) -> Result<TagRecords, SourceError> {
    let file = std::fs::File::open(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let (records, stats) = read_delimited(file, config)?;
    info!(
        path = %path.display(),
        rows = stats.rows,
        kept = records.len(),
        malformed = stats.malformed,
        empty = stats.empty,
        too_few_tags = stats.too_few_tags,
        replaced = stats.replaced,
        "loaded tag records"
    );
    Ok(records)
}
