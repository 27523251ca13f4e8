//! Schur-complement determinant of a block matrix.
//!
//! For `M = [[A, B], [C, D]]` with `A` invertible,
//! `det(M) = det(A) · det(D − C·A⁻¹·B)`.

use std::fmt;

use block_matrix::{
    Matrix, SINGULARITY_TOLERANCE, determinant, inverse, multiply, parallel_multiply,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::Error;

/// Identifies which determinant worker published a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeterminantSource {
    /// `det(A)`
    Leading,
    /// `det(D − C·A⁻¹·B)`
    Complement,
}

impl fmt::Display for DeterminantSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeterminantSource::Leading => write!(f, "leading block"),
            DeterminantSource::Complement => write!(f, "Schur complement"),
        }
    }
}

/// Checks that all four blocks are `n×n` for the same `n` and returns `n`.
fn block_size(a: &Matrix, b: &Matrix, c: &Matrix, d: &Matrix) -> Result<usize, Error> {
    let n = a.rows();
    for m in [a, b, c, d] {
        if m.shape() != (n, n) {
            return Err(block_matrix::Error::DimensionMismatch {
                op: "block assembly",
                left: a.shape(),
                right: m.shape(),
            }
            .into());
        }
    }
    Ok(n)
}

/// `det(A)`, failing when `A` cannot be inverted.
fn invertible_determinant(a: &Matrix) -> Result<f64, Error> {
    let det_a = determinant(a)?;
    if det_a.abs() < SINGULARITY_TOLERANCE {
        return Err(block_matrix::Error::NonInvertible { determinant: det_a }.into());
    }
    Ok(det_a)
}

/// Single-threaded Schur pipeline, the baseline for timing comparisons.
pub fn schur_sequential(a: &Matrix, b: &Matrix, c: &Matrix, d: &Matrix) -> Result<f64, Error> {
    block_size(a, b, c, d)?;
    let det_a = invertible_determinant(a)?;

    let a_inv = inverse(a)?;
    let c_a_inv = multiply(c, &a_inv)?;
    let c_a_inv_b = multiply(&c_a_inv, b)?;
    let complement = d.sub(&c_a_inv_b)?;
    let det_complement = determinant(&complement)?;

    Ok(det_a * det_complement)
}

/// Parallel Schur pipeline.
///
/// Both products run through [`parallel_multiply`] with `workers` row blocks.
/// The two final determinants run on two blocking workers that publish
/// `(source, value)` pairs on a channel; both workers are joined before the
/// values are read back by source. A non-invertible `A` is rejected before
/// any worker is spawned.
pub async fn schur_parallel(
    a: &Matrix,
    b: &Matrix,
    c: &Matrix,
    d: &Matrix,
    workers: usize,
) -> Result<f64, Error> {
    block_size(a, b, c, d)?;
    invertible_determinant(a)?;

    let a_inv = inverse(a)?;
    let c_a_inv = parallel_multiply(c, &a_inv, workers).await?;
    let c_a_inv_b = parallel_multiply(&c_a_inv, b, workers).await?;
    let complement = d.sub(&c_a_inv_b)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let leading = spawn_determinant(DeterminantSource::Leading, a.clone(), tx.clone());
    let trailing = spawn_determinant(DeterminantSource::Complement, complement, tx);

    let (leading, trailing) = tokio::join!(leading, trailing);
    leading.map_err(block_matrix::Error::from)??;
    trailing.map_err(block_matrix::Error::from)??;

    let (det_a, det_complement) = collect_determinants(&mut rx).await?;
    Ok(det_a * det_complement)
}

/// Drains published determinants and returns `(det_a, det_complement)`.
///
/// Values are assigned by their source tag, whatever order they arrive in.
/// Returns once every sender has been dropped.
async fn collect_determinants(
    rx: &mut mpsc::UnboundedReceiver<(DeterminantSource, f64)>,
) -> Result<(f64, f64), Error> {
    let mut det_a = None;
    let mut det_complement = None;
    while let Some((source, value)) = rx.recv().await {
        match source {
            DeterminantSource::Leading => det_a = Some(value),
            DeterminantSource::Complement => det_complement = Some(value),
        }
    }

    let det_a = det_a.ok_or(Error::MissingDeterminant(DeterminantSource::Leading))?;
    let det_complement =
        det_complement.ok_or(Error::MissingDeterminant(DeterminantSource::Complement))?;
    Ok((det_a, det_complement))
}

fn spawn_determinant(
    source: DeterminantSource,
    matrix: Matrix,
    tx: mpsc::UnboundedSender<(DeterminantSource, f64)>,
) -> JoinHandle<Result<(), block_matrix::Error>> {
    tokio::task::spawn_blocking(move || {
        let value = determinant(&matrix)?;
        debug!(%source, value, "publishing determinant");
        // The receiver outlives both workers, so a send cannot fail here.
        let _ = tx.send((source, value));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    fn diagonal_example() -> (Matrix, Matrix, Matrix, Matrix) {
        (
            m(vec![vec![2.0, 0.0], vec![0.0, 2.0]]),
            Matrix::identity(2),
            Matrix::identity(2),
            m(vec![vec![3.0, 0.0], vec![0.0, 3.0]]),
        )
    }

    #[test]
    fn test_sequential_diagonal_example() {
        let (a, b, c, d) = diagonal_example();
        let det = schur_sequential(&a, &b, &c, &d).unwrap();
        assert!((det - 25.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_parallel_diagonal_example() {
        let (a, b, c, d) = diagonal_example();
        let det = schur_parallel(&a, &b, &c, &d, 2).await.unwrap();
        assert!((det - 25.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_singular_leading_block() {
        let (_, b, c, d) = diagonal_example();
        let a = Matrix::zeros(2, 2);

        let seq = schur_sequential(&a, &b, &c, &d).unwrap_err();
        assert!(seq.is_non_invertible());

        let par = schur_parallel(&a, &b, &c, &d, 2).await.unwrap_err();
        assert!(par.is_non_invertible());
    }

    #[tokio::test]
    async fn test_mismatched_blocks() {
        let (a, b, c, _) = diagonal_example();
        let d = Matrix::identity(3);

        assert!(matches!(
            schur_sequential(&a, &b, &c, &d),
            Err(Error::Matrix(block_matrix::Error::DimensionMismatch { .. }))
        ));
        assert!(matches!(
            schur_parallel(&a, &b, &c, &d, 2).await,
            Err(Error::Matrix(block_matrix::Error::DimensionMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn test_determinants_matched_by_source_not_arrival() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send((DeterminantSource::Complement, 6.25)).unwrap();
        tx.send((DeterminantSource::Leading, 4.0)).unwrap();
        drop(tx);

        let (det_a, det_complement) = collect_determinants(&mut rx).await.unwrap();
        assert_eq!(det_a, 4.0);
        assert_eq!(det_complement, 6.25);
    }

    #[tokio::test]
    async fn test_missing_determinant_is_reported() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send((DeterminantSource::Leading, 4.0)).unwrap();
        drop(tx);
        assert!(matches!(
            collect_determinants(&mut rx).await,
            Err(Error::MissingDeterminant(DeterminantSource::Complement))
        ));

        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send((DeterminantSource::Complement, 6.25)).unwrap();
        drop(tx);
        assert!(matches!(
            collect_determinants(&mut rx).await,
            Err(Error::MissingDeterminant(DeterminantSource::Leading))
        ));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(DeterminantSource::Leading.to_string(), "leading block");
        assert_eq!(DeterminantSource::Complement.to_string(), "Schur complement");
    }
}
