//! Command-line interface for cdr3-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **fix**: Reconcile a table of CDR3 records with their V/J segments
//! - **align**: Assign best-fitting segments by nucleotide identity
//! - **library**: List or show segments in the reference library
//!
//! ## Usage
//!
//! ```text
//! # Fix a table of records
//! cdr3-solver fix records.tsv
//!
//! # JSON output for scripting
//! cdr3-solver fix records.tsv --format json
//!
//! # Custom reference tables, looser replace bound
//! cdr3-solver fix records.tsv --segments segments.tsv --max-replace-size 2
//!
//! # Pick segments by codon-compatible alignment, refining existing fixes
//! cdr3-solver align records.tsv --refine
//!
//! # Inspect the library
//! cdr3-solver library list --species HomoSapiens
//! cdr3-solver library show "TRBV19*01"
//! ```

use clap::{Parser, Subcommand};

pub mod align;
pub mod fix;
pub mod library;

#[derive(Parser)]
#[command(name = "cdr3-solver")]
#[command(version)]
#[command(about = "Reconcile CDR3 junction sequences with germline V/J segment references")]
#[command(
    long_about = "cdr3-solver reconciles immune-receptor CDR3 junctions with the germline V and J segments they name.\n\nFor every record it resolves the segment ids against a reference library, finds the best overlap on each side, and reports:\n- The minimal edit (trim, extend, replace) or a classified failure\n- Both boundary offsets and canonicity flags\n- An aggregate quality flag for downstream review"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fix CDR3 boundaries against the segment library
    Fix(fix::FixArgs),

    /// Assign best segments by codon-compatible nucleotide alignment
    Align(align::AlignArgs),

    /// Inspect the segment library
    Library(library::LibraryArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
