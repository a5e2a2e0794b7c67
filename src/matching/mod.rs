//! Matching engines: k-mer overlap fixing and codon-compatible alignment.
//!
//! Two independent paths select and reconcile segments:
//!
//! - [`fixer::Cdr3Fixer`] scans the translated segment library for the
//!   longest exact overlap with each end of the CDR3 and applies the minimal
//!   edit (trim, add, replace) or a classified failure.
//! - [`codon_align::SegmentAligner`] scores raw nucleotide segments against
//!   the amino-acid query under codon degeneracy, for when no trimmed
//!   amino-acid reference is available.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cdr3_solver::catalog::resolver::SynonymTable;
//! use cdr3_solver::{Cdr3Fixer, SegmentLibrary};
//!
//! let library = SegmentLibrary::load_embedded().unwrap();
//! let synonyms = SynonymTable::load_embedded().unwrap();
//! let fixer = Cdr3Fixer::new(&library, &synonyms);
//!
//! let result = fixer.fix_both("CASSIVGGNEQFF", "TRBV19", "TRBJ2-1", "HomoSapiens");
//! assert!(result.good);
//! ```

pub mod codon_align;
pub mod fixer;
pub mod scanner;

pub use self::codon_align::{SegmentAligner, SegmentAssignment};
pub use self::fixer::{Cdr3Fixer, FixerConfig, OneSideFixResult};
pub use self::scanner::{KmerScanner, SearchResult};
