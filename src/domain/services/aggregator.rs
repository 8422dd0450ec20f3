//! Result Aggregator Service
//!
//! Merges per-batch record lists into the final ordered result list.

use crate::domain::entities::LookupRecord;

/// Aggregator for per-batch results.
pub struct ResultAggregator;

impl ResultAggregator {
    /// Concatenate batch results in batch order.
    ///
    /// No sorting, filtering or deduplication happens here. The output
    /// length is the sum of the input lengths.
    pub fn aggregate<I>(batches: I) -> Vec<LookupRecord>
    where
        I: IntoIterator<Item = Vec<LookupRecord>>,
    {
        let mut results = Vec::new();
        for batch in batches {
            results.extend(batch);
        }
        results
    }
}
