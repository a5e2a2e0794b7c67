use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::batch::assign_records;
use crate::cli::fix::{load_library, load_synonyms, run_batch};
use crate::cli::OutputFormat;
use crate::matching::codon_align::{RefinedFix, SegmentAligner, SegmentAssignment};
use crate::matching::fixer::Cdr3Fixer;
use crate::parsing::records::parse_record_file;

#[derive(Args)]
pub struct AlignArgs {
    /// Input record table (TSV with columns: cdr3, v, j, species, gene)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Path to a custom segment reference table
    #[arg(long)]
    pub segments: Option<PathBuf>,

    /// Path to a custom nomenclature synonym table (only used with --refine)
    #[arg(long)]
    pub synonyms: Option<PathBuf>,

    /// Fix the records first, then fold the assignments into the fixes
    #[arg(long)]
    pub refine: bool,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,
}

#[derive(Serialize)]
struct AssignmentRow<'a> {
    cdr3: &'a str,
    #[serde(flatten)]
    assignment: Option<&'a SegmentAssignment>,
}

/// Execute align subcommand
///
/// # Errors
///
/// Returns an error if a table cannot be read or the library is invalid.
pub fn run(args: AlignArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let records = parse_record_file(&args.input)?;

    if verbose {
        let with_gene = records.iter().filter(|r| r.gene.is_some()).count();
        eprintln!(
            "Parsed {} records from input ({with_gene} with a gene)",
            records.len()
        );
    }

    let library = load_library(args.segments.as_deref(), verbose)?;
    let aligner = SegmentAligner::new(&library);

    let assignments = assign_records(&aligner, &records);

    if args.refine {
        let synonyms = load_synonyms(args.synonyms.as_deref())?;
        let fixer = Cdr3Fixer::new(&library, &synonyms);
        let fixes = run_batch(&fixer, &records, args.threads)?;

        let refined: Vec<RefinedFix> = fixes
            .iter()
            .zip(&assignments)
            .map(|(fix, assignment)| match assignment {
                Some(assignment) => aligner.refine(fix, assignment),
                // No gene, no assignment: the fix stands as-is
                None => aligner.refine(
                    fix,
                    &SegmentAssignment {
                        v_id: None,
                        v_match_len: -1,
                        j_id: None,
                        j_match_len: -1,
                    },
                ),
            })
            .collect();

        emit_refined(&refined, format)?;
        return Ok(());
    }

    emit_assignments(&records, &assignments, format)?;
    Ok(())
}

fn emit_assignments(
    records: &[crate::core::record::Cdr3Record],
    assignments: &[Option<SegmentAssignment>],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<AssignmentRow<'_>> = records
                .iter()
                .zip(assignments)
                .map(|(record, assignment)| AssignmentRow {
                    cdr3: &record.cdr3,
                    assignment: assignment.as_ref(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Tsv => {
            println!("cdr3\tvId\tvMatchLen\tjId\tjMatchLen");
            for (record, assignment) in records.iter().zip(assignments) {
                match assignment {
                    Some(a) => println!(
                        "{}\t{}\t{}\t{}\t{}",
                        record.cdr3,
                        a.v_id.as_deref().unwrap_or(""),
                        a.v_match_len,
                        a.j_id.as_deref().unwrap_or(""),
                        a.j_match_len
                    ),
                    None => println!("{}\t\t-1\t\t-1", record.cdr3),
                }
            }
        }
        OutputFormat::Text => {
            for (record, assignment) in records.iter().zip(assignments) {
                match assignment {
                    Some(a) => println!(
                        "{}\n  V: {} (len={})\n  J: {} (len={})",
                        record.cdr3,
                        a.v_id.as_deref().unwrap_or("-"),
                        a.v_match_len,
                        a.j_id.as_deref().unwrap_or("-"),
                        a.j_match_len
                    ),
                    None => println!("{}\n  no gene, skipped", record.cdr3),
                }
            }
        }
    }
    Ok(())
}

fn emit_refined(refined: &[RefinedFix], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(refined)?);
        }
        OutputFormat::Tsv => {
            let mut columns: Vec<&str> = Vec::from(crate::core::record::FixerResult::COLUMNS);
            columns.push("vRefinement");
            columns.push("jRefinement");
            println!("{}", columns.join("\t"));
            for r in refined {
                let mut row: Vec<String> = Vec::from(r.result.to_row());
                row.push(r.v_refinement.to_string());
                row.push(r.j_refinement.to_string());
                println!("{}", row.join("\t"));
            }
        }
        OutputFormat::Text => {
            for r in refined {
                println!(
                    "{}\n  V: {} (vEnd={}) {}\n  J: {} (jStart={}) {}\n  good={}",
                    r.result.cdr3,
                    r.result.v_id,
                    r.result.v_end,
                    r.v_refinement,
                    r.result.j_id,
                    r.result.j_start,
                    r.j_refinement,
                    r.result.good
                );
            }
        }
    }
    Ok(())
}
