//! Input format detection.
//!
//! The record format of an input file is decided by its content, not its
//! extension: the first line carrying a record marker (`>` for FASTA, `@` for
//! FASTQ) fixes the mode for the whole file.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TallyError;

/// Input sequence file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFormat {
    /// FASTA format (`>`-prefixed headers).
    Fasta,
    /// FASTQ format (`@`-prefixed headers, `+`-prefixed quality separators).
    Fastq,
}

impl SequenceFormat {
    /// Detects the format from the first content line of a file.
    ///
    /// Returns `None` when the line starts with neither record marker; the
    /// caller treats that as a format error rather than guessing.
    pub fn detect(first_line: &str) -> Option<Self> {
        match first_line.as_bytes().first() {
            Some(b'>') => Some(Self::Fasta),
            Some(b'@') => Some(Self::Fastq),
            _ => None,
        }
    }

    /// Detects the format of a file from its first non-blank line.
    ///
    /// # Errors
    ///
    /// Returns [`TallyError::Format`] for an empty or marker-less file and
    /// [`TallyError::SequenceRead`] when the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, TallyError> {
        let read_err = |source| TallyError::SequenceRead {
            source,
            path: path.to_path_buf(),
        };
        let reader = BufReader::new(File::open(path).map_err(read_err)?);
        for line in reader.lines() {
            let line = line.map_err(read_err)?;
            let line = line.trim_start();
            if line.is_empty() {
                continue;
            }
            return Self::detect(line).ok_or_else(|| TallyError::Format {
                details: "no FASTA or FASTQ record marker before sequence content".to_string(),
                path: path.to_path_buf(),
            });
        }
        Err(TallyError::Format {
            details: "empty input: no FASTA or FASTQ records".to_string(),
            path: path.to_path_buf(),
        })
    }

    /// The record-start marker byte for this format.
    ///
    /// Chunk splitting aligns sub-files on lines beginning with this byte,
    /// matching what the parser treats as a record start.
    pub const fn marker(self) -> u8 {
        match self {
            Self::Fasta => b'>',
            Self::Fastq => b'@',
        }
    }
}

impl fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fasta => write!(f, "fasta"),
            Self::Fastq => write!(f, "fastq"),
        }
    }
}
