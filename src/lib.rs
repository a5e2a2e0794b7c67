//! # cdr3-solver
//!
//! A library for reconciling CDR3 junction sequences with germline V/J
//! segment references.
//!
//! Immune-receptor repertoire tables from external sources often carry CDR3
//! junctions whose boundaries disagree with the V and J segments they name:
//! a residue clipped off the conserved cysteine, a legacy segment id, an
//! allele that was never recorded. `cdr3-solver` reconciles each junction
//! against a reference segment library and reports the minimal edit that
//! makes the boundaries consistent - or a classified failure when none does.
//!
//! ## Features
//!
//! - **Nomenclature resolution**: legacy names, missing alleles, and
//!   family-only ids are normalized into the library
//! - **K-mer overlap fixing**: the longest exact overlap decides between
//!   trim, extend, replace, and rejection, per side
//! - **Closed outcome taxonomy**: every attempt ends in one of seven ranked
//!   fix types; nothing raises
//! - **Codon-compatible fallback**: segments can be picked by raw
//!   nucleotide identity when no trimmed amino-acid reference applies
//! - **Parallel batch fixing**: order-preserving map over record tables
//!
//! ## Example
//!
//! ```rust,no_run
//! use cdr3_solver::catalog::resolver::SynonymTable;
//! use cdr3_solver::{Cdr3Fixer, SegmentLibrary};
//!
//! // Load the embedded segment library
//! let library = SegmentLibrary::load_embedded().unwrap();
//! let synonyms = SynonymTable::load_embedded().unwrap();
//!
//! // Fix one junction against its candidate segments
//! let fixer = Cdr3Fixer::new(&library, &synonyms);
//! let result = fixer.fix_both("CASSIVGGNEQFF", "TRBV19", "TRBJ2-1", "HomoSapiens");
//!
//! println!("{} v={} j={} good={}", result.cdr3, result.v_id, result.j_id, result.good);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Segment library storage and nomenclature resolution
//! - [`core`]: Core data types for segments, records, and fix outcomes
//! - [`matching`]: K-mer overlap fixing and codon-compatible alignment
//! - [`parsing`]: Parsers for segment, synonym, and record tables
//! - [`batch`]: Order-preserving parallel batch evaluation
//! - [`cli`]: Command-line interface implementation

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::catalog::resolver::{NomenclatureResolver, SynonymTable};
pub use crate::catalog::store::SegmentLibrary;
pub use crate::core::record::{Cdr3Record, FixerResult};
pub use crate::core::segment::SegmentRecord;
pub use crate::core::types::*;
pub use crate::matching::codon_align::{SegmentAligner, SegmentAssignment};
pub use crate::matching::fixer::{Cdr3Fixer, FixerConfig, OneSideFixResult};
pub use crate::matching::scanner::{KmerScanner, SearchResult};
