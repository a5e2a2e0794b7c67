//! Parser for input CDR3 record tables.
//!
//! Expected columns: `cdr3`, `v`, `j`, `species`, and optionally `gene`
//! (required only for best-segment assignment). The `v` and `j` cells may
//! carry comma-separated candidate lists and are passed through verbatim.

use std::path::Path;

use tracing::warn;

use crate::core::record::Cdr3Record;
use crate::core::types::Gene;
use crate::parsing::{header_columns, read_table, require_column, ParseError};
use crate::utils::validation::{check_row_limit, is_valid_amino_sequence};

/// Parse CDR3 records from a TSV file (gzip-transparent)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors of
/// [`parse_record_text`].
pub fn parse_record_file(path: &Path) -> Result<Vec<Cdr3Record>, ParseError> {
    parse_record_text(&read_table(path)?)
}

/// Parse CDR3 records from TSV text
///
/// # Errors
///
/// Returns `ParseError::MissingColumn` if a required column is absent,
/// `ParseError::InvalidFormat` for short rows, or `ParseError::TooManyRows`
/// if the limit is exceeded.
pub fn parse_record_text(text: &str) -> Result<Vec<Cdr3Record>, ParseError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("Empty record table".to_string()))?;
    let columns = header_columns(header);
    let cdr3_col = require_column(&columns, "cdr3")?;
    let v_col = require_column(&columns, "v")?;
    let j_col = require_column(&columns, "j")?;
    let species_col = require_column(&columns, "species")?;
    let gene_col = columns.iter().position(|c| c == "gene");
    let width = columns.len();

    let mut records = Vec::new();
    for (i, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let line_num = i + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < width {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {width}",
                fields.len()
            )));
        }

        let gene = gene_col.and_then(|col| {
            let cell = fields[col].trim();
            if cell.is_empty() {
                return None;
            }
            let gene = Gene::parse(cell);
            if gene.is_none() {
                warn!("Unknown gene '{cell}' on line {line_num}, ignoring");
            }
            gene
        });

        if check_row_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRows(records.len()));
        }

        let cdr3 = fields[cdr3_col].trim();
        if !is_valid_amino_sequence(cdr3) {
            // Still fixed; the failure taxonomy classifies it downstream
            warn!("Unusual cdr3 '{cdr3}' on line {line_num}");
        }

        records.push(Cdr3Record {
            cdr3: cdr3.to_string(),
            v: fields[v_col].trim().to_string(),
            j: fields[j_col].trim().to_string(),
            species: fields[species_col].trim().to_string(),
            gene,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_text() {
        let tsv = "cdr3\tv\tj\tspecies\n\
                   CASSIVGGNEQFF\tTRBV19\tTRBJ2-1\tHomoSapiens\n\
                   CASSLAPGATNEKLF\tTRBV5-1,TRBV5-4\tTRBJ1-4\tHomoSapiens\n";

        let records = parse_record_text(tsv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cdr3, "CASSIVGGNEQFF");
        assert_eq!(records[1].v, "TRBV5-1,TRBV5-4");
        assert_eq!(records[0].gene, None);
    }

    #[test]
    fn test_parse_record_text_with_gene() {
        let tsv = "cdr3\tv\tj\tspecies\tgene\n\
                   CASSIVGGNEQFF\tTRBV19\tTRBJ2-1\tHomoSapiens\tTRB\n";

        let records = parse_record_text(tsv).unwrap();
        assert_eq!(records[0].gene, Some(Gene::Trb));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let tsv = "cdr3\tv\tspecies\nCASSF\tTRBV9\tHomoSapiens\n";
        let err = parse_record_text(tsv).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn("j")));
    }

    #[test]
    fn test_unknown_gene_cell_ignored() {
        let tsv = "cdr3\tv\tj\tspecies\tgene\n\
                   CASSF\tTRBV9\tTRBJ1-2\tHomoSapiens\tIGH\n";

        let records = parse_record_text(tsv).unwrap();
        assert_eq!(records[0].gene, None);
    }
}
