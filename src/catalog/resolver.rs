use std::collections::HashMap;
use std::path::Path;

use crate::catalog::store::SegmentLibrary;
use crate::parsing::synonyms::{parse_synonym_file, parse_synonym_text};
use crate::parsing::ParseError;
use crate::utils::validation::normalize_species;

/// How many `-{i}*01` family-member suffixes the resolver probes
const MAX_FAMILY_PROBE: u32 = 100;

/// Species-keyed legacy-id -> canonical-id conversions
#[derive(Debug, Default)]
pub struct SynonymTable {
    conversions: HashMap<(String, String), String>,
}

impl SynonymTable {
    /// Load the embedded default conversions
    pub fn load_embedded() -> Result<Self, ParseError> {
        const EMBEDDED_SYNONYMS: &str = include_str!("../../catalogs/synonyms.tsv");
        Ok(Self::from_entries(parse_synonym_text(EMBEDDED_SYNONYMS)?))
    }

    /// Load conversions from a TSV file (gzip-transparent)
    pub fn load_from_file(path: &Path) -> Result<Self, ParseError> {
        Ok(Self::from_entries(parse_synonym_file(path)?))
    }

    /// Build the table from (species, legacy, canonical) triples
    pub fn from_entries(entries: Vec<(String, String, String)>) -> Self {
        let conversions = entries
            .into_iter()
            .map(|(species, legacy, canonical)| ((normalize_species(&species), legacy), canonical))
            .collect();
        Self { conversions }
    }

    /// An empty table: every id is its own canonical form
    pub fn empty() -> Self {
        Self::default()
    }

    /// Canonical form of a legacy id, if the table knows one.
    /// `species` must already be normalized.
    pub fn canonical(&self, species: &str, id: &str) -> Option<&str> {
        self.conversions
            .get(&(species.to_string(), id.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

/// Normalizes arbitrary incoming segment ids into ids present in the
/// segment library.
///
/// Incoming ids may be missing their allele suffix, use legacy naming, or
/// name only a family. Resolution first substitutes legacy names via the
/// synonym table, then probes systematically: the id as-is, the id with its
/// allele suffix stripped, and the id with everything after the first dash
/// stripped, each combined with the suffixes `""`, `"*01"`, and `"-{i}*01"`
/// for i in 1..=100. The first probe present in the library wins.
pub struct NomenclatureResolver<'a> {
    library: &'a SegmentLibrary,
    synonyms: &'a SynonymTable,
}

impl<'a> NomenclatureResolver<'a> {
    pub fn new(library: &'a SegmentLibrary, synonyms: &'a SynonymTable) -> Self {
        Self { library, synonyms }
    }

    /// The synonym-substituted form of an incoming id, before any probing.
    ///
    /// This is what a failed fix reports as the closest id attempted.
    pub fn normalize(&self, species: &str, raw_id: &str) -> String {
        let species = normalize_species(species);
        match self.synonyms.canonical(&species, raw_id) {
            Some(canonical) => canonical.to_string(),
            None => raw_id.to_string(),
        }
    }

    /// Resolve an incoming id to an id present in the library.
    ///
    /// Returns `None` when every probe misses - a normal outcome meaning
    /// "no reference available", not an error.
    pub fn resolve(&self, species: &str, raw_id: &str) -> Option<String> {
        let id = self.normalize(species, raw_id);

        if !self.library.has_species(species) {
            return None;
        }

        let mut variants = vec![id.clone()];
        for simplified in [strip_allele(&id), strip_family_member(&id)] {
            if !variants.iter().any(|v| v == simplified) {
                variants.push(simplified.to_string());
            }
        }

        for variant in &variants {
            if self.library.contains(species, variant) {
                return Some(variant.clone());
            }
            let with_allele = format!("{variant}*01");
            if self.library.contains(species, &with_allele) {
                return Some(with_allele);
            }
            for i in 1..=MAX_FAMILY_PROBE {
                let candidate = format!("{variant}-{i}*01");
                if self.library.contains(species, &candidate) {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

/// Id with the allele suffix stripped: "TRBV19*01" -> "TRBV19"
fn strip_allele(id: &str) -> &str {
    id.split('*').next().unwrap_or(id)
}

/// Id truncated at the first family-member dash: "TRBV5-1*01" -> "TRBV5"
fn strip_family_member(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
