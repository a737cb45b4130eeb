//! Methods for index-weight records.
use crate::types::weights::IndexWeight;

/// Sort the pairs by index and collapse equal-index runs by summing their
/// weights. Returns the compacted length.
pub fn unique_sort(weights: &mut Vec<IndexWeight>) -> usize {
    weights.sort_by_key(|w| w.index);
    weights.dedup_by(|a, b| {
        if a.index == b.index {
            b.weight += a.weight;
            true
        } else {
            false
        }
    });
    weights.len()
}
