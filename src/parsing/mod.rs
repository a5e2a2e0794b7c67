//! Parsers for the tab-separated tables the solver consumes.
//!
//! This module provides parsers for:
//!
//! - **Segment reference tables**: germline V/J/D rows with reference points
//! - **Synonym tables**: species-keyed legacy-id to canonical-id conversions
//! - **Input record tables**: CDR3 rows with candidate segment ids
//!
//! All readers are gzip-transparent by file extension.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cdr3_solver::parsing::segments::parse_segment_file;
//! use std::path::Path;
//!
//! let rows = parse_segment_file(Path::new("segments.tsv")).unwrap();
//! ```

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod records;
pub mod segments;
pub mod synonyms;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid table format: {0}")]
    InvalidFormat(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Too many rows: {0} exceeds maximum allowed (1000000)")]
    TooManyRows(usize),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read a possibly-gzipped file to a string
pub(crate) fn read_table(path: &Path) -> Result<String, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut contents = String::new();
    if is_gzipped(path) {
        GzDecoder::new(file).read_to_string(&mut contents)?;
    } else {
        std::io::BufReader::new(file).read_to_string(&mut contents)?;
    }
    Ok(contents)
}

/// Split a header line into column names.
///
/// A leading `#` on the first cell (a common repertoire-table convention,
/// e.g. `#species`) is stripped.
pub(crate) fn header_columns(line: &str) -> Vec<String> {
    line.split('\t')
        .enumerate()
        .map(|(i, cell)| {
            let cell = cell.trim();
            let cell = if i == 0 {
                cell.trim_start_matches('#')
            } else {
                cell
            };
            cell.to_lowercase()
        })
        .collect()
}

/// Index of a required column in the header
pub(crate) fn require_column(
    columns: &[String],
    name: &'static str,
) -> Result<usize, ParseError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or(ParseError::MissingColumn(name))
}
