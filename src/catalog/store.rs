use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::codon::translate_linear;
use crate::core::segment::SegmentRecord;
use crate::core::types::{Gene, SegmentType};
use crate::parsing::segments::{parse_segment_file, parse_segment_text};
use crate::parsing::ParseError;
use crate::utils::validation::normalize_species;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to parse segment table: {0}")]
    ParseError(#[from] ParseError),

    #[error("Segment table contains no Variable or Joining rows")]
    Empty,
}

/// The germline segment library: per species, the CDR3-proximal amino-acid
/// window of every V and J segment.
///
/// Built once from a segment reference table and read-only afterward. Rows
/// whose segment type is neither Variable nor Joining (e.g. Diversity) are
/// dropped at load time; the remaining nucleotide sequences are trimmed to
/// their proximal window and translated.
#[derive(Debug)]
pub struct SegmentLibrary {
    /// All V/J rows in table order, window untrimmed
    records: Vec<SegmentRecord>,

    /// Index: species -> segment id -> translated proximal window
    windows: HashMap<String, HashMap<String, String>>,
}

impl SegmentLibrary {
    /// Load the embedded default segment table
    pub fn load_embedded() -> Result<Self, LibraryError> {
        // Embedded at compile time; structure validated by build.rs
        const EMBEDDED_SEGMENTS: &str = include_str!("../../catalogs/segments.tsv");
        Self::from_records(parse_segment_text(EMBEDDED_SEGMENTS)?)
    }

    /// Load a segment table from a TSV file (gzip-transparent)
    pub fn load_from_file(path: &Path) -> Result<Self, LibraryError> {
        Self::from_records(parse_segment_file(path)?)
    }

    /// Build the library from already-parsed segment rows
    pub fn from_records(records: Vec<SegmentRecord>) -> Result<Self, LibraryError> {
        if records.is_empty() {
            return Err(LibraryError::Empty);
        }

        let mut windows: HashMap<String, HashMap<String, String>> = HashMap::new();
        for record in &records {
            let frame_from_end = record.segment_type == SegmentType::Joining;
            let translated = translate_linear(record.proximal_window(), frame_from_end);
            windows
                .entry(record.species.clone())
                .or_default()
                .insert(record.id.clone(), translated);
        }

        Ok(Self { records, windows })
    }

    /// The translated CDR3-proximal window of one segment, if present.
    ///
    /// `species` may be in any case; ids are exact.
    pub fn segment_window(&self, species: &str, id: &str) -> Option<&str> {
        self.windows
            .get(&normalize_species(species))?
            .get(id)
            .map(String::as_str)
    }

    /// Whether any segment with this id exists for the species
    pub fn contains(&self, species: &str, id: &str) -> bool {
        self.segment_window(species, id).is_some()
    }

    /// Whether the library holds any segment for the species
    pub fn has_species(&self, species: &str) -> bool {
        self.windows.contains_key(&normalize_species(species))
    }

    /// All V/J rows, in table order
    pub fn records(&self) -> &[SegmentRecord] {
        &self.records
    }

    /// Rows of one segment type for a species/gene pair, in table order
    pub fn records_for(
        &self,
        species: &str,
        gene: Gene,
        segment_type: SegmentType,
    ) -> impl Iterator<Item = &SegmentRecord> + '_ {
        let species = normalize_species(species);
        self.records.iter().filter(move |r| {
            r.species == species && r.gene == gene && r.segment_type == segment_type
        })
    }

    /// Number of indexed segments
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
