//! Run orchestration.
//!
//! One run prepares a fresh `<stem>_run` directory, decides whether the input
//! needs chunking, drives the store → aggregate → prune pipeline over every
//! chunk, merges the chunk summaries, and writes the final tables. A stale
//! run directory from a previous invocation is removed first.

use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::chunk;
use crate::config::Config;
use crate::error::TallyError;
use crate::format::SequenceFormat;
use crate::kmer::KmerLength;
use crate::prune::order_rows;
use crate::report;

/// What a completed run produced, for reporting to the caller.
#[derive(Debug)]
pub struct RunOutcome {
    /// Detected input format.
    pub format: SequenceFormat,
    /// Total sequence records tallied.
    pub sequences: usize,
    /// Number of chunks the input was processed in (1 when unchunked).
    pub chunks: usize,
    /// Number of k-mers in the final summary.
    pub significant_kmers: usize,
    /// The run directory holding all outputs.
    pub workdir: PathBuf,
    /// Path of the final summary table.
    pub summary_path: PathBuf,
}

/// Executes one tallying run.
///
/// # Errors
///
/// Fails fast on the first error anywhere in the pipeline; partial chunk
/// summaries already on disk are left behind but never merged into a final
/// summary.
pub fn run(config: &Config) -> Result<RunOutcome, TallyError> {
    let k = KmerLength::new(config.k)?;
    let input = &config.path;
    let stem = chunk::file_stem(input);

    let format = SequenceFormat::from_file(input)?;
    let input_size = fs::metadata(input)
        .map_err(|source| TallyError::SequenceRead {
            source,
            path: input.clone(),
        })?
        .len();

    let workdir = prepare_workdir(config, &stem)?;

    let chunk_files = if input_size >= config.chunk_threshold {
        info!(
            size = input_size,
            threshold = config.chunk_threshold,
            "large input: splitting into record-aligned chunks"
        );
        chunk::split(input, config.chunk_threshold, format.marker(), &workdir)?
    } else {
        vec![input.clone()]
    };

    let chunk::MergedRun { merged, sequences } =
        chunk::run_and_merge(&chunk_files, k, config.min_count, config.threads, &workdir)?;

    let rows = order_rows(merged);
    let summary_path = workdir.join(format!("{stem}_summary.{}", config.format.extension()));
    report::write_summary(&summary_path, k, &rows, config.format)?;

    info!(
        sequences,
        chunks = chunk_files.len(),
        significant = rows.len(),
        summary = %summary_path.display(),
        "run complete"
    );

    Ok(RunOutcome {
        format,
        sequences,
        chunks: chunk_files.len(),
        significant_kmers: rows.len(),
        workdir,
        summary_path,
    })
}

fn prepare_workdir(config: &Config, stem: &str) -> Result<PathBuf, TallyError> {
    let base = config
        .outdir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let workdir = base.join(format!("{stem}_run"));
    let workdir_err = |source| TallyError::Workdir {
        source,
        path: workdir.clone(),
    };

    if workdir.exists() {
        fs::remove_dir_all(&workdir).map_err(workdir_err)?;
    }
    fs::create_dir_all(&workdir).map_err(workdir_err)?;
    Ok(workdir)
}
