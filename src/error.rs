//! Error types for ktally.
//!
//! This module provides exhaustive, strongly-typed errors for all operations
//! in the library, enabling precise error handling and informative messages.
//! Every error is fatal to the run or chunk in which it occurs: counting is
//! deterministic and pure, so there is no retry policy.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in ktally operations.
#[derive(Debug, Error)]
pub enum TallyError {
    /// K-mer length is zero.
    #[error(transparent)]
    InvalidKmerLength(#[from] KmerLengthError),

    /// Malformed or empty sequence record stream.
    #[error("format error in '{}': {details}", .path.display())]
    Format { details: String, path: PathBuf },

    /// Failed to read a sequence file.
    #[error("failed to read sequence file '{}': {source}", .path.display())]
    SequenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// I/O failure while splitting an oversized input into chunks.
    #[error("failed to split '{}' into chunks: {source}", .path.display())]
    ChunkSplit {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The counting worker pool could not be built.
    #[error("failed to build worker pool: {source}")]
    WorkerPool {
        #[source]
        source: rayon::ThreadPoolBuildError,
    },

    /// Failed to create or reset the run directory.
    #[error("failed to prepare run directory '{}': {source}", .path.display())]
    Workdir {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to write a CSV/TSV table.
    #[error("failed to write table '{}': {source}", .path.display())]
    Csv {
        #[source]
        source: csv::Error,
        path: PathBuf,
    },

    /// Failed to serialize the JSON summary.
    #[error("failed to write JSON summary '{}': {source}", .path.display())]
    Json {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },

    /// Failed to write a report file.
    #[error("failed to write report '{}': {source}", .path.display())]
    WriteReport {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

/// Error for an invalid k-mer length.
///
/// The sliding window is defined for any k of at least one; there is no upper
/// bound since k-mers are kept as byte strings rather than packed words.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid k-mer length {k}: must be at least 1")]
pub struct KmerLengthError {
    /// The invalid k value that was provided.
    pub k: usize,
}
