//! Sequence records and the ordered store built from one input file.
//!
//! Parsing keeps the reference tool's exact record semantics. FASTA headers
//! are truncated at the first `#` and trimmed, residue lines are concatenated
//! with embedded `*` stop-codon markers stripped. FASTQ names are the first
//! whitespace-delimited token after `@`; only the first sequence line before
//! the `+` separator is captured and quality lines are ignored, so multi-line
//! FASTQ sequences are not supported. Iteration order over the store equals
//! file record order, which downstream per-sequence tables rely on.

use bytes::Bytes;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::TallyError;
use crate::format::SequenceFormat;

/// One named sequence record.
#[derive(Debug, Clone)]
pub struct Sequence {
    /// Record name, unique within one input file.
    pub name: String,
    /// Residue string; alphabet is not validated by this crate.
    pub residues: Bytes,
    /// The format of the file this record came from.
    pub format: SequenceFormat,
}

/// An ordered mapping from sequence name to record, in file record order.
#[derive(Debug)]
pub struct SequenceStore {
    format: SequenceFormat,
    records: Vec<Sequence>,
    index: FxHashMap<String, usize>,
}

impl SequenceStore {
    /// Parses one FASTA or FASTQ file into an ordered store.
    ///
    /// # Errors
    ///
    /// Returns [`TallyError::SequenceRead`] when the file cannot be opened or
    /// read, and [`TallyError::Format`] when the record stream is empty,
    /// carries no record marker, or contains a record with a name but no
    /// residues.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TallyError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TallyError::SequenceRead {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parses an already-open reader; `path` is used in error messages only.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self, TallyError> {
        let mut lines = reader.lines();

        // Format detection: the first non-blank line must carry a record
        // marker, which fixes the mode for the whole file.
        let mut first = None;
        for line in lines.by_ref() {
            let line = line.map_err(|source| TallyError::SequenceRead {
                source,
                path: path.to_path_buf(),
            })?;
            if !line.trim().is_empty() {
                first = Some(line);
                break;
            }
        }
        let Some(first) = first else {
            return Err(TallyError::Format {
                details: "empty input: no FASTA or FASTQ records".to_string(),
                path: path.to_path_buf(),
            });
        };
        let Some(format) = SequenceFormat::detect(first.trim_start()) else {
            return Err(TallyError::Format {
                details: "no FASTA or FASTQ record marker before sequence content".to_string(),
                path: path.to_path_buf(),
            });
        };

        let mut store = Self {
            format,
            records: Vec::new(),
            index: FxHashMap::default(),
        };
        let rest = std::iter::once(Ok(first)).chain(lines);
        match format {
            SequenceFormat::Fasta => store.parse_fasta(rest, path)?,
            SequenceFormat::Fastq => store.parse_fastq(rest, path)?,
        }
        Ok(store)
    }

    /// The detected format of the parsed file.
    pub const fn format(&self) -> SequenceFormat {
        self.format
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in file order.
    pub fn records(&self) -> &[Sequence] {
        &self.records
    }

    /// Looks a record up by name.
    pub fn get(&self, name: &str) -> Option<&Sequence> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Iterates records in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.records.iter()
    }

    fn insert(&mut self, name: String, residues: String) {
        let residues = Bytes::from(residues);
        if let Some(&i) = self.index.get(&name) {
            // Duplicate names overwrite in place, keeping the first position.
            self.records[i].residues = residues;
        } else {
            self.index.insert(name.clone(), self.records.len());
            self.records.push(Sequence {
                name,
                residues,
                format: self.format,
            });
        }
    }

    fn parse_fasta<I>(&mut self, lines: I, path: &Path) -> Result<(), TallyError>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        let mut name: Option<String> = None;
        let mut residues = String::new();

        for line in lines {
            let line = line.map_err(|source| TallyError::SequenceRead {
                source,
                path: path.to_path_buf(),
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('>') {
                if let Some(done) = name.take() {
                    self.finish_fasta_record(done, &mut residues, path)?;
                }
                name = Some(clean_fasta_name(header));
            } else if name.is_none() {
                return Err(TallyError::Format {
                    details: "sequence content before the first record header".to_string(),
                    path: path.to_path_buf(),
                });
            } else {
                // Stop-codon markers are stripped from residue lines.
                residues.extend(line.chars().filter(|&c| c != '*'));
            }
        }

        if let Some(done) = name.take() {
            self.finish_fasta_record(done, &mut residues, path)?;
        }
        Ok(())
    }

    fn finish_fasta_record(
        &mut self,
        name: String,
        residues: &mut String,
        path: &Path,
    ) -> Result<(), TallyError> {
        if residues.is_empty() {
            return Err(TallyError::Format {
                details: format!("record '{name}' has a name but no residues"),
                path: path.to_path_buf(),
            });
        }
        self.insert(name, std::mem::take(residues));
        Ok(())
    }

    fn parse_fastq<I>(&mut self, lines: I, path: &Path) -> Result<(), TallyError>
    where
        I: Iterator<Item = std::io::Result<String>>,
    {
        // A `+` line closes the current record; everything after it up to the
        // next `@` header is quality data and is ignored.
        let mut name = String::new();
        let mut seq = String::new();
        let mut in_sequence = false;

        for line in lines {
            let line = line.map_err(|source| TallyError::SequenceRead {
                source,
                path: path.to_path_buf(),
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('@') {
                name = header
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string();
                seq.clear();
                in_sequence = true;
            } else if line.starts_with('+') {
                if in_sequence && !seq.is_empty() {
                    self.insert(name.clone(), std::mem::take(&mut seq));
                }
                in_sequence = false;
            } else if in_sequence && seq.is_empty() {
                seq = line.to_string();
            }
        }

        // A record not closed by a `+` separator at EOF is dropped; a file
        // with markers but no completed record is malformed.
        if self.records.is_empty() {
            return Err(TallyError::Format {
                details: "no complete FASTQ records found".to_string(),
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SequenceStore {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn clean_fasta_name(header: &str) -> String {
    let head = match header.split_once('#') {
        Some((head, _)) => head,
        None => header,
    };
    head.trim().to_string()
}
