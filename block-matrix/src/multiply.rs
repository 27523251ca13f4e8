//! Dense matrix products over a row block.

use crate::matrix::Matrix;
use crate::partition::RowBlock;
use crate::Error;

/// Computes `left × right` where `left` holds only a slice of rows.
///
/// Accumulation runs over the inner dimension in ascending order, so a block
/// product is bit-identical to the matching rows of a full [`multiply`].
pub fn multiply_block(left: &Matrix, right: &Matrix) -> Result<Matrix, Error> {
    if left.cols() != right.rows() {
        return Err(Error::DimensionMismatch {
            op: "multiply",
            left: left.shape(),
            right: right.shape(),
        });
    }

    let mut result = Matrix::zeros(left.rows(), right.cols());
    for i in 0..left.rows() {
        let lhs = left.row(i);
        for j in 0..right.cols() {
            let mut sum = 0.0;
            for (k, &l) in lhs.iter().enumerate() {
                sum += l * right.get(k, j);
            }
            result.set(i, j, sum);
        }
    }
    Ok(result)
}

/// Single-threaded `a × b`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, Error> {
    multiply_block(a, b)
}

/// One unit of parallel multiplication work.
///
/// The task owns its slice of the left operand and its own copy of the right
/// operand. It lives only until its partial product has been merged.
#[derive(Debug, Clone)]
pub struct BlockTask {
    pub block: RowBlock,
    pub left: Matrix,
    pub right: Matrix,
}

impl BlockTask {
    /// Copies the rows of `a` covered by `block` together with all of `b`.
    pub fn new(a: &Matrix, b: &Matrix, block: RowBlock) -> Result<Self, Error> {
        Ok(Self {
            block,
            left: a.slice_rows(block.range())?,
            right: b.clone(),
        })
    }

    /// Runs the block product and returns it tagged with its row offset.
    pub fn run(self) -> Result<(usize, Matrix), Error> {
        let partial = multiply_block(&self.left, &self.right)?;
        Ok((self.block.offset, partial))
    }
}
