//! Significant k-mer selection.
//!
//! A k-mer is significant when its global count meets the minimum-count
//! threshold. The significant set decides both the rows of the summary table
//! and which columns the per-sequence table retains.

use bytes::Bytes;

use crate::kmer::KmerCounts;

/// Filters global counts down to the significant k-mers.
///
/// Rows come back ordered by count descending, ties broken lexicographically,
/// so report output is deterministic run to run.
pub fn significant(global: &KmerCounts, min_count: u64) -> Vec<(Bytes, u64)> {
    order_rows(
        global
            .iter()
            .filter(|(_, &count)| count >= min_count)
            .map(|(kmer, &count)| (kmer.clone(), count)),
    )
}

/// Orders count rows without filtering.
///
/// Used for the merged grand summary, whose entries were already pruned per
/// chunk and are not re-filtered after the merge.
pub fn order_rows<I>(rows: I) -> Vec<(Bytes, u64)>
where
    I: IntoIterator<Item = (Bytes, u64)>,
{
    let mut rows: Vec<(Bytes, u64)> = rows.into_iter().collect();
    rows.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}
