use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::catalog::store::SegmentLibrary;
use crate::cli::fix::load_library;
use crate::cli::OutputFormat;
use crate::core::codon::translate_linear;
use crate::core::segment::SegmentRecord;
use crate::core::types::SegmentType;
use crate::utils::validation::normalize_species;

#[derive(Args)]
pub struct LibraryArgs {
    #[command(subcommand)]
    pub command: LibraryCommands,
}

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// List all segments in the library
    List {
        /// Path to a custom segment reference table
        #[arg(long)]
        segments: Option<PathBuf>,

        /// Filter by species (e.g. "HomoSapiens")
        #[arg(long)]
        species: Option<String>,

        /// Filter by gene (e.g. "TRB")
        #[arg(long)]
        gene: Option<String>,
    },

    /// Show details of a specific segment
    Show {
        /// Segment id (e.g. "TRBV19*01")
        #[arg(required = true)]
        id: String,

        /// Path to a custom segment reference table
        #[arg(long)]
        segments: Option<PathBuf>,

        /// Species to look in
        #[arg(long, default_value = "HomoSapiens")]
        species: String,
    },
}

#[derive(Serialize)]
struct SegmentSummary<'a> {
    species: &'a str,
    gene: String,
    segment_type: String,
    id: &'a str,
    window: String,
}

/// Execute library subcommand
///
/// # Errors
///
/// Returns an error if the segment table cannot be read or the requested
/// segment does not exist.
pub fn run(args: LibraryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        LibraryCommands::List {
            segments,
            species,
            gene,
        } => {
            let library = load_library(segments.as_deref(), verbose)?;
            let species = species.map(|s| normalize_species(&s));
            let gene = gene.map(|g| g.to_uppercase());

            let rows: Vec<&SegmentRecord> = library
                .records()
                .iter()
                .filter(|r| species.as_deref().map_or(true, |s| r.species == s))
                .filter(|r| gene.as_deref().map_or(true, |g| r.gene.to_string() == g))
                .collect();

            emit_list(&rows, format)?;
        }
        LibraryCommands::Show {
            id,
            segments,
            species,
        } => {
            let library = load_library(segments.as_deref(), verbose)?;
            let species_key = normalize_species(&species);
            let record = library
                .records()
                .iter()
                .find(|r| r.species == species_key && r.id == id)
                .ok_or_else(|| anyhow::anyhow!("No segment '{id}' for species '{species}'"))?;

            emit_show(record, &library, format)?;
        }
    }
    Ok(())
}

fn window(record: &SegmentRecord) -> String {
    let frame_from_end = record.segment_type == SegmentType::Joining;
    translate_linear(record.proximal_window(), frame_from_end)
}

fn emit_list(rows: &[&SegmentRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let summaries: Vec<SegmentSummary<'_>> = rows
                .iter()
                .map(|r| SegmentSummary {
                    species: &r.species,
                    gene: r.gene.to_string(),
                    segment_type: r.segment_type.to_string(),
                    id: &r.id,
                    window: window(r),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Tsv => {
            println!("species\tgene\tsegment\tid\twindow");
            for r in rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    r.species,
                    r.gene,
                    r.segment_type,
                    r.id,
                    window(r)
                );
            }
        }
        OutputFormat::Text => {
            println!("{} segments:", rows.len());
            for r in rows {
                println!(
                    "  {:<12} {:<4} {:<8} {:<14} {}",
                    r.species,
                    r.gene.to_string(),
                    r.segment_type.to_string(),
                    r.id,
                    window(r)
                );
            }
        }
    }
    Ok(())
}

fn emit_show(
    record: &SegmentRecord,
    library: &SegmentLibrary,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        OutputFormat::Tsv | OutputFormat::Text => {
            println!("id:              {}", record.id);
            println!("species:         {}", record.species);
            println!("gene:            {}", record.gene);
            println!("segment type:    {}", record.segment_type);
            println!("reference point: {}", record.reference_point);
            println!("sequence:        {}", record.sequence);
            println!("window (nt):     {}", record.proximal_window());
            if let Some(aa) = library.segment_window(&record.species, &record.id) {
                println!("window (aa):     {aa}");
            }
        }
    }
    Ok(())
}
