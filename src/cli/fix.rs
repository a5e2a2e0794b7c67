use std::path::PathBuf;

use clap::Args;

use crate::batch::fix_records;
use crate::catalog::resolver::SynonymTable;
use crate::catalog::store::SegmentLibrary;
use crate::cli::OutputFormat;
use crate::core::record::{Cdr3Record, FixerResult};
use crate::matching::fixer::{
    Cdr3Fixer, FixerConfig, DEFAULT_MAX_REPLACE_SIZE, DEFAULT_MIN_HIT_SIZE,
};
use crate::parsing::records::parse_record_file;

#[derive(Args)]
pub struct FixArgs {
    /// Input record table (TSV with columns: cdr3, v, j, species; gzip ok)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Path to a custom segment reference table
    #[arg(long)]
    pub segments: Option<PathBuf>,

    /// Path to a custom nomenclature synonym table
    #[arg(long)]
    pub synonyms: Option<PathBuf>,

    /// Longest CDR3 prefix a replace may discard before being rejected
    #[arg(long, default_value_t = DEFAULT_MAX_REPLACE_SIZE)]
    pub max_replace_size: usize,

    /// Minimum overlap length the scanner will consider a hit
    #[arg(long, default_value_t = DEFAULT_MIN_HIT_SIZE)]
    pub min_hit_size: usize,

    /// Worker threads for batch fixing (defaults to available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Execute fix subcommand
///
/// # Errors
///
/// Returns an error if a table cannot be read or the library is invalid.
pub fn run(args: FixArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let records = parse_record_file(&args.input)?;

    if verbose {
        eprintln!("Parsed {} records from input", records.len());
    }

    let library = load_library(args.segments.as_deref(), verbose)?;
    let synonyms = load_synonyms(args.synonyms.as_deref())?;

    let config = FixerConfig {
        max_replace_size: args.max_replace_size,
        min_hit_size: args.min_hit_size,
    };
    let fixer = Cdr3Fixer::with_config(&library, &synonyms, config);

    let results = run_batch(&fixer, &records, args.threads)?;

    if verbose {
        let good = results.iter().filter(|r| r.good).count();
        let fixed = results.iter().filter(|r| r.fix_needed).count();
        eprintln!(
            "Fixed {} of {} records ({good} good, {fixed} changed)",
            results.len(),
            records.len()
        );
    }

    emit(&results, format)?;
    Ok(())
}

pub(crate) fn load_library(
    segments: Option<&std::path::Path>,
    verbose: bool,
) -> anyhow::Result<SegmentLibrary> {
    let library = if let Some(path) = segments {
        SegmentLibrary::load_from_file(path)?
    } else {
        SegmentLibrary::load_embedded()?
    };

    if verbose {
        eprintln!("Loaded segment library with {} segments", library.len());
    }
    Ok(library)
}

pub(crate) fn load_synonyms(synonyms: Option<&std::path::Path>) -> anyhow::Result<SynonymTable> {
    Ok(if let Some(path) = synonyms {
        SynonymTable::load_from_file(path)?
    } else {
        SynonymTable::load_embedded()?
    })
}

pub(crate) fn run_batch(
    fixer: &Cdr3Fixer<'_>,
    records: &[Cdr3Record],
    threads: Option<usize>,
) -> anyhow::Result<Vec<FixerResult>> {
    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(|| fix_records(fixer, records)))
        }
        None => Ok(fix_records(fixer, records)),
    }
}

fn emit(results: &[FixerResult], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Tsv => {
            println!("{}", FixerResult::COLUMNS.join("\t"));
            for result in results {
                println!("{}", result.to_row().join("\t"));
            }
        }
        OutputFormat::Text => {
            for result in results {
                let edit = if result.fix_needed {
                    format!("{} -> {}", result.cdr3_old, result.cdr3)
                } else {
                    result.cdr3.clone()
                };
                println!(
                    "{edit}\n  V: {} {} (vEnd={})\n  J: {} {} (jStart={})\n  good={}",
                    result.v_id,
                    result.v_fix_type,
                    result.v_end,
                    result.j_id,
                    result.j_fix_type,
                    result.j_start,
                    result.good
                );
            }
        }
    }
    Ok(())
}
