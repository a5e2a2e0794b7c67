//! Parser for nomenclature synonym tables.
//!
//! Expected columns: `species`, `legacy_id`, `canonical_id`.

use std::path::Path;

use crate::parsing::{header_columns, read_table, require_column, ParseError};

/// Parse a synonym table from a TSV file (gzip-transparent)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors of
/// [`parse_synonym_text`].
pub fn parse_synonym_file(path: &Path) -> Result<Vec<(String, String, String)>, ParseError> {
    parse_synonym_text(&read_table(path)?)
}

/// Parse (species, legacy id, canonical id) triples from TSV text
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent or
/// `ParseError::InvalidFormat` for short rows.
pub fn parse_synonym_text(text: &str) -> Result<Vec<(String, String, String)>, ParseError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("Empty synonym table".to_string()))?;
    let columns = header_columns(header);
    let species_col = require_column(&columns, "species")?;
    let legacy_col = require_column(&columns, "legacy_id")?;
    let canonical_col = require_column(&columns, "canonical_id")?;
    let width = columns.len();

    let mut entries = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < width {
            return Err(ParseError::InvalidFormat(format!(
                "Line {} has {} fields, expected {width}",
                i + 1,
                fields.len()
            )));
        }

        entries.push((
            fields[species_col].trim().to_string(),
            fields[legacy_col].trim().to_string(),
            fields[canonical_col].trim().to_string(),
        ));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_synonym_text() {
        let tsv = "#species\tlegacy_id\tcanonical_id\n\
                   HomoSapiens\tTCRBV19S1\tTRBV19\n\
                   HomoSapiens\tTCRBV9S1\tTRBV9\n";

        let entries = parse_synonym_text(tsv).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            (
                "HomoSapiens".to_string(),
                "TCRBV19S1".to_string(),
                "TRBV19".to_string()
            )
        );
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let tsv = "#species\tlegacy_id\nHomoSapiens\tTCRBV19S1\n";
        let err = parse_synonym_text(tsv).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn("canonical_id")));
    }

    #[test]
    fn test_empty_table_has_no_entries() {
        let entries = parse_synonym_text("#species\tlegacy_id\tcanonical_id\n").unwrap();
        assert!(entries.is_empty());
    }
}
