//! Row partitioning for parallel work.

use std::ops::Range;

/// A contiguous run of rows `[offset, offset + rows)` handed to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    pub offset: usize,
    pub rows: usize,
}

impl RowBlock {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.rows
    }
}

/// Splits `n` rows into at most `workers` contiguous blocks.
///
/// Every block but the last gets `n / workers` rows and the last one absorbs
/// the remainder. With `workers <= 1` the whole matrix is a single block.
/// Empty blocks are never emitted, which happens when `workers > n`.
///
/// ```
/// use block_matrix::{RowBlock, partition_rows};
///
/// let blocks = partition_rows(7, 3);
/// assert_eq!(
///     blocks,
///     vec![
///         RowBlock { offset: 0, rows: 2 },
///         RowBlock { offset: 2, rows: 2 },
///         RowBlock { offset: 4, rows: 3 },
///     ]
/// );
/// ```
pub fn partition_rows(n: usize, workers: usize) -> Vec<RowBlock> {
    let per_worker = if workers > 1 { n / workers } else { n };
    let workers = workers.max(1);

    let mut blocks = Vec::with_capacity(workers);
    let mut offset = 0;
    for i in 0..workers {
        let rows = if i < workers - 1 {
            per_worker
        } else {
            n - offset
        };
        if rows > 0 {
            blocks.push(RowBlock { offset, rows });
            offset += rows;
        }
    }
    blocks
}
