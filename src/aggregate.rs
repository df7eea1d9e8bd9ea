//! Parallel fan-out of per-sequence tallies and the fan-in fold.
//!
//! One counting task runs per sequence; tasks are pure functions of their own
//! sequence and share nothing mutable, so the fan-out needs no locks. The
//! fold runs on the calling thread after every task has finished, summing
//! local counts into the global table and keying each task's kept map by its
//! sequence name. Both sums and inserts are commutative, so the result is
//! independent of task completion order. A panicking task unwinds through
//! rayon and aborts the whole aggregation; skipping a sequence would silently
//! corrupt the global counts.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::error::TallyError;
use crate::kmer::{tally_sequence, KmerCounts, KmerLength, SequenceTally};
use crate::store::SequenceStore;

/// Kept local counts keyed by sequence name.
pub type KeptBySequence = FxHashMap<String, KmerCounts>;

/// The merged result of tallying every sequence in a store.
#[derive(Debug, Default)]
pub struct Aggregate {
    /// Occurrence counts summed across all sequences, before pruning.
    pub global: KmerCounts,
    /// Each sequence's kept (locally pruned) counts.
    pub kept_by_sequence: KeptBySequence,
}

/// Tallies every sequence in the store and folds the results.
///
/// `threads` bounds the worker pool; `None` uses the global rayon pool.
///
/// # Errors
///
/// Returns [`TallyError::WorkerPool`] when a dedicated pool cannot be built.
pub fn aggregate(
    store: &SequenceStore,
    k: KmerLength,
    min_count: u64,
    threads: Option<usize>,
) -> Result<Aggregate, TallyError> {
    let tallies = match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|source| TallyError::WorkerPool { source })?;
            pool.install(|| collect_tallies(store, k, min_count))
        }
        None => collect_tallies(store, k, min_count),
    };
    Ok(fold_tallies(tallies))
}

fn collect_tallies(store: &SequenceStore, k: KmerLength, min_count: u64) -> Vec<SequenceTally> {
    store
        .records()
        .par_iter()
        .map(|seq| tally_sequence(&seq.name, &seq.residues, k, min_count))
        .collect()
}

/// Folds per-sequence tallies into one [`Aggregate`].
///
/// The fold is commutative and associative over the tally list; any
/// permutation of the input produces the same result.
pub fn fold_tallies(tallies: Vec<SequenceTally>) -> Aggregate {
    let mut agg = Aggregate::default();
    for tally in tallies {
        for (kmer, count) in tally.local {
            *agg.global.entry(kmer).or_insert(0) += count;
        }
        agg.kept_by_sequence.insert(tally.name, tally.kept);
    }
    agg
}
