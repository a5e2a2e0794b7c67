//! Parser for germline segment reference tables.
//!
//! Expected columns (tab-separated, header required, `#species` accepted for
//! the first header cell): `species`, `gene`, `segment`, `id`,
//! `reference_point`, `sequence`. Rows whose segment type is neither
//! Variable nor Joining, or whose gene is not a known locus, are skipped
//! with a warning.

use std::path::Path;

use tracing::warn;

use crate::core::segment::SegmentRecord;
use crate::core::types::{Gene, SegmentType};
use crate::parsing::{header_columns, read_table, require_column, ParseError};
use crate::utils::validation::{check_row_limit, normalize_species};

/// Parse a segment reference table from a TSV file (gzip-transparent)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors of
/// [`parse_segment_text`].
pub fn parse_segment_file(path: &Path) -> Result<Vec<SegmentRecord>, ParseError> {
    parse_segment_text(&read_table(path)?)
}

/// Parse segment reference rows from TSV text
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent,
/// `ParseError::InvalidFormat` for short rows or a bad reference point, or
/// `ParseError::TooManyRows` if the limit is exceeded.
pub fn parse_segment_text(text: &str) -> Result<Vec<SegmentRecord>, ParseError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("Empty segment table".to_string()))?;
    let columns = header_columns(header);
    let species_col = require_column(&columns, "species")?;
    let gene_col = require_column(&columns, "gene")?;
    let segment_col = require_column(&columns, "segment")?;
    let id_col = require_column(&columns, "id")?;
    let reference_point_col = require_column(&columns, "reference_point")?;
    let sequence_col = require_column(&columns, "sequence")?;
    let width = columns.len();

    let mut records = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < width {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {width}",
                fields.len()
            )));
        }

        let Some(segment_type) = SegmentType::parse(fields[segment_col].trim()) else {
            // Diversity and other non-junction rows are not indexed
            continue;
        };
        let gene_cell = fields[gene_col].trim();
        let Some(gene) = Gene::parse(gene_cell) else {
            warn!("Skipping segment row on line {line_num}: unknown gene '{gene_cell}'");
            continue;
        };

        let reference_point: usize = fields[reference_point_col].trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid reference point on line {}: '{}'",
                line_num, fields[reference_point_col]
            ))
        })?;

        if check_row_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRows(records.len()));
        }

        records.push(SegmentRecord::new(
            normalize_species(fields[species_col].trim()),
            gene,
            segment_type,
            fields[id_col].trim(),
            reference_point,
            fields[sequence_col].trim().to_uppercase(),
        ));
    }

    Ok(records)
}
