//! Batch Planner Service
//!
//! Splits a normalized address set into the fixed-size chunks that are
//! sent upstream one at a time.

/// A contiguous slice of the address set sent in one upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    /// Zero-based position of this batch in dispatch order
    pub index: usize,
    /// Position of the first address of this batch in the full set
    pub offset: usize,
    pub addresses: &'a [String],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Number of addresses covered once this batch completes.
    pub fn end(&self) -> usize {
        self.offset + self.addresses.len()
    }
}

/// Planner for batch partitioning.
pub struct BatchPlanner;

impl BatchPlanner {
    /// Partition `addresses` into consecutive batches of at most
    /// `batch_size` elements. A `batch_size` of zero is treated as one.
    pub fn plan(addresses: &[String], batch_size: usize) -> Vec<Batch<'_>> {
        let size = batch_size.max(1);
        addresses
            .chunks(size)
            .enumerate()
            .map(|(index, chunk)| Batch {
                index,
                offset: index * size,
                addresses: chunk,
            })
            .collect()
    }

    /// Number of batches `plan` produces for `len` addresses.
    pub fn batch_count(len: usize, batch_size: usize) -> usize {
        len.div_ceil(batch_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("10.0.{}.{}", i / 256, i % 256)).collect()
    }

    #[test]
    fn test_plan_250_into_three_batches() {
        let addrs = addresses(250);
        let batches = BatchPlanner::plan(&addrs, 100);

        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(batches[2].offset, 200);
        assert_eq!(batches[2].end(), 250);
    }

    #[test]
    fn test_plan_is_contiguous_and_disjoint() {
        let addrs = addresses(1234);
        let batches = BatchPlanner::plan(&addrs, 100);

        let mut expected_offset = 0;
        for (i, batch) in batches.iter().enumerate() {
            assert_eq!(batch.index, i);
            assert_eq!(batch.offset, expected_offset);
            assert_eq!(batch.addresses, &addrs[batch.offset..batch.end()]);
            expected_offset = batch.end();
        }
        assert_eq!(expected_offset, addrs.len());

        let rejoined: Vec<String> = batches
            .iter()
            .flat_map(|b| b.addresses.iter().cloned())
            .collect();
        assert_eq!(rejoined, addrs);
    }

    #[test]
    fn test_plan_exact_multiple() {
        let addrs = addresses(200);
        let batches = BatchPlanner::plan(&addrs, 100);
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 100));
    }

    #[test]
    fn test_plan_empty() {
        let batches = BatchPlanner::plan(&[], 100);
        assert!(batches.is_empty());
    }

    #[test]
    fn test_plan_zero_batch_size_treated_as_one() {
        let addrs = addresses(3);
        let batches = BatchPlanner::plan(&addrs, 0);
        assert_eq!(batches.len(), 3);
    }

    #[test]
    fn test_batch_count_matches_plan() {
        for n in [0, 1, 99, 100, 101, 250, 6000] {
            let addrs = addresses(n);
            assert_eq!(
                BatchPlanner::batch_count(n, 100),
                BatchPlanner::plan(&addrs, 100).len(),
                "n = {}",
                n
            );
        }
    }
}
