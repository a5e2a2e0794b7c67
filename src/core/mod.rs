//! Core data types for CDR3/germline-segment reconciliation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`SegmentRecord`]: One germline V/J segment row with its reference point
//! - [`Cdr3Record`]: One input junction with its candidate segment ids
//! - [`FixerResult`]: The flat per-CDR3 outcome record
//! - [`Gene`], [`SegmentType`], [`FixType`], [`Refinement`]: classification types
//! - [`codon`]: the standard genetic code, forward and backward
//!
//! ## Segment identifiers
//!
//! Incoming ids vary in convention:
//!
//! | Convention | Example |
//! |------------|------------|
//! | IMGT with allele | TRBV19*01 |
//! | IMGT, allele omitted | TRBV19 |
//! | IMGT, family only | TRBV5 |
//! | Legacy (Arden) | TCRBV19S1 |
//!
//! Matching against the library uses **exact ids** - equivalence is defined
//! only through the nomenclature resolver's synonym table and allele probing.

pub mod codon;
pub mod record;
pub mod segment;
pub mod types;

pub use self::record::{Cdr3Record, FixerResult};
pub use self::segment::SegmentRecord;
pub use self::types::{FixType, Gene, Refinement, SegmentType};
