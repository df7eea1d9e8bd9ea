//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::chunk::DEFAULT_CHUNK_THRESHOLD;

/// A fast, parallel k-mer tally for FASTA and FASTQ files.
#[derive(Parser, Debug)]
#[command(name = "ktally")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// K-mer length (at least 1)
    #[arg(value_parser = parse_k)]
    pub k: usize,

    /// Path to a FASTA or FASTQ file
    pub path: PathBuf,

    /// Minimum count threshold (k-mers below this are pruned)
    #[arg(short = 'c', long, default_value = "10")]
    pub min_count: u64,

    /// Number of counting workers (defaults to all cores)
    #[arg(short = 'n', long, value_parser = parse_threads)]
    pub threads: Option<usize>,

    /// Directory the run directory is created in (defaults to the current directory)
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// Input size in bytes above which the file is split into record-aligned chunks
    #[arg(long, default_value_t = DEFAULT_CHUNK_THRESHOLD)]
    pub chunk_threshold: u64,

    /// Summary output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: SummaryFormat,

    /// Suppress informational output (warnings and errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the global summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SummaryFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// Tab-separated values
    Tsv,
    /// JSON array format
    Json,
}

impl SummaryFormat {
    /// File extension for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if k == 0 {
        return Err("k-mer length must be at least 1".to_string());
    }
    Ok(k)
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if n == 0 {
        return Err("worker count must be at least 1".to_string());
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_k_accepts_positive() {
        assert_eq!(parse_k("1"), Ok(1));
        assert_eq!(parse_k("31"), Ok(31));
    }

    #[test]
    fn parse_k_rejects_zero_and_junk() {
        assert!(parse_k("0").is_err());
        assert!(parse_k("abc").is_err());
        assert!(parse_k("-3").is_err());
    }

    #[test]
    fn format_extensions() {
        assert_eq!(SummaryFormat::Csv.extension(), "csv");
        assert_eq!(SummaryFormat::Tsv.extension(), "tsv");
        assert_eq!(SummaryFormat::Json.extension(), "json");
    }

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::parse_from(["ktally", "3", "reads.fa"]);
        assert_eq!(args.k, 3);
        assert_eq!(args.min_count, 10);
        assert_eq!(args.threads, None);
        assert_eq!(args.chunk_threshold, DEFAULT_CHUNK_THRESHOLD);
        assert_eq!(args.format, SummaryFormat::Csv);
        assert!(!args.quiet);
    }
}
