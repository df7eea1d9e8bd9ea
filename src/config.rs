use std::{fs, path::PathBuf};

use crate::cli::{Args, SummaryFormat};
use crate::error::TallyError;

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub k: usize,
    pub path: PathBuf,
    pub min_count: u64,
    pub threads: Option<usize>,
    pub outdir: Option<PathBuf>,
    pub chunk_threshold: u64,
    pub format: SummaryFormat,
}

impl Config {
    /// Builds a config from parsed arguments, checking the input path exists.
    pub fn from_args(args: &Args) -> Result<Config, TallyError> {
        fs::metadata(&args.path).map_err(|source| TallyError::SequenceRead {
            source,
            path: args.path.clone(),
        })?;

        Ok(Config {
            k: args.k,
            path: args.path.clone(),
            min_count: args.min_count,
            threads: args.threads,
            outdir: args.outdir.clone(),
            chunk_threshold: args.chunk_threshold,
            format: args.format,
        })
    }
}
