//! Germline segment library storage and nomenclature resolution.
//!
//! The library holds, per species, the CDR3-proximal amino-acid window of
//! every V and J segment from the reference table. A default table is
//! compiled into the binary, but custom tables can be loaded from TSV files.
//!
//! ## Embedded tables
//!
//! The default data covers the TRA/TRB loci for:
//!
//! - **HomoSapiens**: common TRBV/TRBJ/TRAV/TRAJ segments plus legacy-name
//!   conversions
//! - **MusMusculus**: a minimal TRB set
//!
//! ## Example
//!
//! ```rust,no_run
//! use cdr3_solver::catalog::resolver::{NomenclatureResolver, SynonymTable};
//! use cdr3_solver::SegmentLibrary;
//!
//! // Load the embedded tables
//! let library = SegmentLibrary::load_embedded().unwrap();
//! let synonyms = SynonymTable::load_embedded().unwrap();
//!
//! // Normalize an allele-less id into the library
//! let resolver = NomenclatureResolver::new(&library, &synonyms);
//! let id = resolver.resolve("HomoSapiens", "TRBV19");
//! assert_eq!(id.as_deref(), Some("TRBV19*01"));
//! ```
//!
//! ## Custom tables
//!
//! ```rust,no_run
//! use cdr3_solver::SegmentLibrary;
//! use std::path::Path;
//!
//! let custom = SegmentLibrary::load_from_file(Path::new("segments.tsv")).unwrap();
//! ```

pub mod resolver;
pub mod store;
