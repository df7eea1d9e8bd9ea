//! Record-aligned chunk splitting and the per-chunk summary merge.
//!
//! Inputs at or above the size threshold are split into sub-files before the
//! pipeline runs. A split happens only immediately before a record-marker
//! line, never inside a record, so every chunk parses on its own. Each chunk
//! runs the full store → aggregate → prune pipeline and leaves its pruned
//! summary and per-sequence table on disk; the pruned summaries are then
//! merged by summing counts per k-mer into the grand table used for final
//! reporting. The first chunk that fails aborts the whole run; partial
//! global counts would silently corrupt downstream statistics.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::cli::SummaryFormat;
use crate::error::TallyError;
use crate::kmer::{KmerCounts, KmerLength};
use crate::prune::significant;
use crate::report;
use crate::store::SequenceStore;

/// Reference input-size threshold and chunk byte target: 100 MiB.
pub const DEFAULT_CHUNK_THRESHOLD: u64 = 100 * 1024 * 1024;

/// The merged result of running the pipeline over every chunk.
#[derive(Debug)]
pub struct MergedRun {
    /// Grand counts: per-chunk pruned summaries summed by k-mer.
    pub merged: KmerCounts,
    /// Total number of sequence records across all chunks.
    pub sequences: usize,
}

/// Splits `input` into record-aligned sub-files of roughly `chunk_bytes`.
///
/// A new chunk starts at the next line beginning with `marker` once the
/// current chunk has reached the byte target. Chunk files are named
/// `<stem>_chunk<i><ext>` under `workdir`.
///
/// # Errors
///
/// Returns [`TallyError::ChunkSplit`] on any I/O failure.
pub fn split(
    input: &Path,
    chunk_bytes: u64,
    marker: u8,
    workdir: &Path,
) -> Result<Vec<PathBuf>, TallyError> {
    let split_err = |source| TallyError::ChunkSplit {
        source,
        path: input.to_path_buf(),
    };

    let stem = file_stem(input);
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()));

    let mut reader = BufReader::new(File::open(input).map_err(split_err)?);
    let mut chunks = Vec::new();
    let mut writer: Option<BufWriter<File>> = None;
    let mut written: u64 = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line).map_err(split_err)?;
        if n == 0 {
            break;
        }

        let at_record_start = line.first() == Some(&marker);
        if writer.is_none() || (at_record_start && written >= chunk_bytes) {
            if let Some(mut done) = writer.take() {
                done.flush().map_err(split_err)?;
            }
            let path = chunk_path(workdir, &stem, ext.as_deref(), chunks.len());
            writer = Some(BufWriter::new(File::create(&path).map_err(split_err)?));
            written = 0;
            chunks.push(path);
        }
        if let Some(out) = writer.as_mut() {
            out.write_all(&line).map_err(split_err)?;
            written += line.len() as u64;
        }
    }

    if let Some(mut done) = writer.take() {
        done.flush().map_err(split_err)?;
    }
    info!(chunks = chunks.len(), input = %input.display(), "split input");
    Ok(chunks)
}

/// Runs the counting pipeline over each chunk and merges the pruned
/// summaries.
///
/// Each chunk leaves `<chunkstem>_summary.csv` and `<chunkstem>.csv` in
/// `workdir` before its summary is folded into the grand table.
pub fn run_and_merge(
    chunk_files: &[PathBuf],
    k: KmerLength,
    min_count: u64,
    threads: Option<usize>,
    workdir: &Path,
) -> Result<MergedRun, TallyError> {
    let mut summaries = Vec::with_capacity(chunk_files.len());
    let mut sequences = 0;

    for chunk in chunk_files {
        let store = SequenceStore::from_path(chunk)?;
        sequences += store.len();

        let agg = aggregate(&store, k, min_count, threads)?;
        let rows = significant(&agg.global, min_count);
        debug!(
            chunk = %chunk.display(),
            sequences = store.len(),
            distinct = agg.global.len(),
            significant = rows.len(),
            "chunk tallied"
        );

        let stem = file_stem(chunk);
        report::write_summary(
            &workdir.join(format!("{stem}_summary.csv")),
            k,
            &rows,
            SummaryFormat::Csv,
        )?;
        report::write_sequences(
            &workdir.join(format!("{stem}.csv")),
            &store,
            &rows,
            &agg.kept_by_sequence,
        )?;

        summaries.push(rows.into_iter().collect::<KmerCounts>());
    }

    Ok(MergedRun {
        merged: merge_summaries(summaries),
        sequences,
    })
}

/// Sums chunk summaries by k-mer key.
pub fn merge_summaries<I>(summaries: I) -> KmerCounts
where
    I: IntoIterator<Item = KmerCounts>,
{
    let mut merged = KmerCounts::default();
    for summary in summaries {
        for (kmer, count) in summary {
            *merged.entry(kmer).or_insert(0) += count;
        }
    }
    merged
}

fn chunk_path(workdir: &Path, stem: &str, ext: Option<&str>, index: usize) -> PathBuf {
    workdir.join(format!("{stem}_chunk{index}{}", ext.unwrap_or_default()))
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "input".to_string(), |s| s.to_string_lossy().into_owned())
}
