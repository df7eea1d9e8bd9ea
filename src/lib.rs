//! A fast, parallel k-mer tally for FASTA and FASTQ files.
//!
//! ktally counts all overlapping substrings of a fixed length k across the
//! sequences of one input file, sums the counts into a global table, prunes
//! k-mers below a minimum-count threshold, and writes a global summary plus a
//! per-sequence count table. Oversized inputs are split into record-aligned
//! chunks whose pruned summaries are merged into one grand summary.
//!
//! # Example
//!
//! ```rust,no_run
//! use ktally::cli::SummaryFormat;
//! use ktally::config::Config;
//!
//! let config = Config {
//!     k: 3,
//!     path: "sample.fa".into(),
//!     min_count: 10,
//!     threads: None,
//!     outdir: None,
//!     chunk_threshold: ktally::chunk::DEFAULT_CHUNK_THRESHOLD,
//!     format: SummaryFormat::Csv,
//! };
//! let outcome = ktally::run::run(&config)?;
//! println!(
//!     "{} significant {}-mers across {} sequences",
//!     outcome.significant_kmers, config.k, outcome.sequences
//! );
//! # Ok::<(), ktally::TallyError>(())
//! ```

pub mod aggregate;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod kmer;
pub mod prune;
pub mod report;
pub mod run;
pub mod store;

pub use error::{KmerLengthError, TallyError};
pub use kmer::KmerLength;
pub use run::RunOutcome;
