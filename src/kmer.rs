//! Per-sequence k-mer tallying.
//!
//! [`tally_sequence`] is the unit of work the aggregator fans out: it is a
//! pure function of one sequence, producing the local count of every distinct
//! k-mer in that sequence plus the subset whose count meets the prune
//! threshold. Counts are defined as the number of (possibly overlapping)
//! occurrences of the exact substring in the whole sequence; since every
//! occurrence of a length-k substring is itself a sliding window, a single
//! counting pass over the windows produces exactly those numbers.

use bytes::Bytes;
use rustc_hash::FxHashMap;
use std::fmt;

use crate::error::KmerLengthError;

/// Occurrence counts keyed by k-mer.
///
/// Keys compare by byte-exact equality with no normalization. Keeping them as
/// [`Bytes`] lets every key share the storage of its source sequence.
pub type KmerCounts = FxHashMap<Bytes, u64>;

/// A validated k-mer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerLength(usize);

impl KmerLength {
    /// Creates a validated k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is zero.
    pub fn new(k: usize) -> Result<Self, KmerLengthError> {
        if k == 0 {
            return Err(KmerLengthError { k });
        }
        Ok(Self(k))
    }

    /// The underlying length.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for KmerLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The result of tallying one sequence.
#[derive(Debug, Clone)]
pub struct SequenceTally {
    /// Name of the tallied sequence.
    pub name: String,
    /// Occurrence count of every distinct k-mer in the sequence.
    pub local: KmerCounts,
    /// The subset of `local` with count at or above the prune threshold.
    pub kept: KmerCounts,
}

/// Tallies all overlapping k-mers of one sequence.
///
/// When `k` exceeds the sequence length the window yields no substrings and
/// both maps come back empty; that is not an error.
pub fn tally_sequence(
    name: &str,
    residues: &Bytes,
    k: KmerLength,
    min_count: u64,
) -> SequenceTally {
    let k = k.get();
    let mut local = KmerCounts::default();

    if residues.len() >= k {
        for i in 0..=residues.len() - k {
            *local.entry(residues.slice(i..i + k)).or_insert(0) += 1;
        }
    }

    let kept = local
        .iter()
        .filter(|(_, &count)| count >= min_count)
        .map(|(kmer, &count)| (kmer.clone(), count))
        .collect();

    SequenceTally {
        name: name.to_string(),
        local,
        kept,
    }
}
