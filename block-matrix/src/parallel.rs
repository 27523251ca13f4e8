//! Fan-out/fan-in matrix multiplication over blocking workers.

use futures_util::future::join_all;
use tracing::debug;

use crate::Error;
use crate::matrix::Matrix;
use crate::multiply::BlockTask;
use crate::partition::partition_rows;

/// Computes `a × b` by splitting the rows of `a` across `workers` tasks.
///
/// The worker set is scoped to this call: one blocking task is spawned per
/// row block, each receives owned copies of its inputs, and all of them are
/// joined before the result is returned. Partial products are merged at their
/// own offset, so the order in which workers finish has no effect.
///
/// A worker that panics fails the whole multiplication with
/// [`Error::Worker`].
pub async fn parallel_multiply(a: &Matrix, b: &Matrix, workers: usize) -> Result<Matrix, Error> {
    if a.cols() != b.rows() {
        return Err(Error::DimensionMismatch {
            op: "parallel_multiply",
            left: a.shape(),
            right: b.shape(),
        });
    }

    let blocks = partition_rows(a.rows(), workers);
    let mut handles = Vec::with_capacity(blocks.len());
    for block in blocks {
        let task = BlockTask::new(a, b, block)?;
        debug!(offset = block.offset, rows = block.rows, "dispatching block");
        handles.push(tokio::task::spawn_blocking(move || task.run()));
    }

    let mut result = Matrix::zeros(a.rows(), b.cols());
    for joined in join_all(handles).await {
        let (offset, partial) = joined??;
        result.write_rows(offset, &partial)?;
    }

    Ok(result)
}
