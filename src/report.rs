//! Output tables.
//!
//! Two tables leave a run: a summary with one row per significant k-mer
//! (index label `{k}-mers`, column `Count`) and a per-sequence table with one
//! row per input sequence (index label `Sequence`), one column per
//! significant k-mer holding the sequence's kept local count (0 when the
//! local count missed the threshold), then `length`, `GC_Percent` and
//! `AT_Percent` derived from the raw residue string. The summary can also be
//! written as TSV or JSON; the per-sequence table is always CSV.

use bytes::Bytes;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::cli::SummaryFormat;
use crate::error::TallyError;
use crate::kmer::KmerLength;
use crate::aggregate::KeptBySequence;
use crate::store::SequenceStore;

/// A summary row, used for JSON serialization.
#[derive(Serialize)]
struct SummaryEntry {
    kmer: String,
    count: u64,
}

/// Sequence length and nucleotide composition percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub length: usize,
    pub gc_percent: i64,
    pub at_percent: i64,
}

/// Computes length and rounded GC/AT percentages from raw residues.
///
/// Counting is byte-exact over `G`, `C`, `A`, `T`; other symbols only
/// contribute to the length.
pub fn composition(residues: &[u8]) -> Composition {
    let length = residues.len();
    if length == 0 {
        return Composition {
            length,
            gc_percent: 0,
            at_percent: 0,
        };
    }
    let gc = residues.iter().filter(|&&b| b == b'G' || b == b'C').count();
    let at = residues.iter().filter(|&&b| b == b'A' || b == b'T').count();
    let percent = |n: usize| ((n as f64 / length as f64) * 100.0).round() as i64;
    Composition {
        length,
        gc_percent: percent(gc),
        at_percent: percent(at),
    }
}

/// Writes the summary table for the significant k-mers.
pub fn write_summary(
    path: &Path,
    k: KmerLength,
    rows: &[(Bytes, u64)],
    format: SummaryFormat,
) -> Result<(), TallyError> {
    match format {
        SummaryFormat::Csv => write_summary_delimited(path, k, rows, b','),
        SummaryFormat::Tsv => write_summary_delimited(path, k, rows, b'\t'),
        SummaryFormat::Json => write_summary_json(path, rows),
    }
}

fn write_summary_delimited(
    path: &Path,
    k: KmerLength,
    rows: &[(Bytes, u64)],
    delimiter: u8,
) -> Result<(), TallyError> {
    let csv_err = |source| TallyError::Csv {
        source,
        path: path.to_path_buf(),
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(csv_err)?;

    writer
        .write_record([format!("{k}-mers"), "Count".to_string()])
        .map_err(csv_err)?;
    for (kmer, count) in rows {
        writer
            .write_record([kmer_label(kmer), count.to_string()])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TallyError::WriteReport {
        source,
        path: path.to_path_buf(),
    })
}

fn write_summary_json(path: &Path, rows: &[(Bytes, u64)]) -> Result<(), TallyError> {
    let entries: Vec<SummaryEntry> = rows
        .iter()
        .map(|(kmer, count)| SummaryEntry {
            kmer: kmer_label(kmer),
            count: *count,
        })
        .collect();

    let write_err = |source| TallyError::WriteReport {
        source,
        path: path.to_path_buf(),
    };
    let mut file = File::create(path).map_err(write_err)?;
    serde_json::to_writer_pretty(&mut file, &entries).map_err(|source| TallyError::Json {
        source,
        path: path.to_path_buf(),
    })?;
    writeln!(file).map_err(write_err)
}

/// Writes the per-sequence table.
///
/// Column order follows `rows` (the significant set in summary order); row
/// order follows the store's file record order.
pub fn write_sequences(
    path: &Path,
    store: &SequenceStore,
    rows: &[(Bytes, u64)],
    kept: &KeptBySequence,
) -> Result<(), TallyError> {
    let csv_err = |source| TallyError::Csv {
        source,
        path: path.to_path_buf(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let mut header = Vec::with_capacity(rows.len() + 4);
    header.push("Sequence".to_string());
    header.extend(rows.iter().map(|(kmer, _)| kmer_label(kmer)));
    header.extend(
        ["length", "GC_Percent", "AT_Percent"]
            .into_iter()
            .map(String::from),
    );
    writer.write_record(&header).map_err(csv_err)?;

    for seq in store {
        let empty = crate::kmer::KmerCounts::default();
        let counts = kept.get(&seq.name).unwrap_or(&empty);
        let stats = composition(&seq.residues);

        let mut record = Vec::with_capacity(header.len());
        record.push(seq.name.clone());
        record.extend(
            rows.iter()
                .map(|(kmer, _)| counts.get(kmer).copied().unwrap_or(0).to_string()),
        );
        record.push(stats.length.to_string());
        record.push(stats.gc_percent.to_string());
        record.push(stats.at_percent.to_string());
        writer.write_record(&record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TallyError::WriteReport {
        source,
        path: path.to_path_buf(),
    })
}

fn kmer_label(kmer: &Bytes) -> String {
    String::from_utf8_lossy(kmer).into_owned()
}
