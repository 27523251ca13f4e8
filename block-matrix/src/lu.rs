//! Determinant and inverse by elimination with partial pivoting.

use crate::Error;
use crate::matrix::Matrix;

/// Magnitude below which a determinant is treated as zero.
///
/// This is a fixed absolute threshold, it does not scale with the size or the
/// magnitude of the matrix entries.
pub const SINGULARITY_TOLERANCE: f64 = 1e-10;

fn require_square(m: &Matrix, op: &'static str) -> Result<(), Error> {
    if m.is_square() {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            op,
            left: m.shape(),
            right: (m.cols(), m.rows()),
        })
    }
}

/// Index of the row at or below `k` with the largest magnitude in column `k`.
fn pivot_row(m: &Matrix, k: usize) -> usize {
    let mut best = k;
    let mut best_val = m.get(k, k).abs();
    for i in (k + 1)..m.rows() {
        let val = m.get(i, k).abs();
        if val > best_val {
            best = i;
            best_val = val;
        }
    }
    best
}

/// Computes `det(m)` through an LU decomposition.
///
/// Singular input is not an error: a column without a usable pivot makes the
/// determinant exactly `0.0`, and nearly singular input returns whatever tiny
/// value elimination produces. The determinant of a `0×0` matrix is `1.0`.
pub fn determinant(m: &Matrix) -> Result<f64, Error> {
    require_square(m, "determinant")?;

    let n = m.rows();
    let mut lu = m.clone();
    let mut det = 1.0;

    for k in 0..n {
        let p = pivot_row(&lu, k);
        if lu.get(p, k) == 0.0 {
            return Ok(0.0);
        }
        if p != k {
            lu.swap_rows(p, k);
            det = -det;
        }

        let pivot = lu.get(k, k);
        det *= pivot;
        for i in (k + 1)..n {
            let factor = lu.get(i, k) / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in (k + 1)..n {
                let v = lu.get(i, j) - factor * lu.get(k, j);
                lu.set(i, j, v);
            }
        }
    }

    Ok(det)
}

/// Computes `m⁻¹` by Gauss-Jordan elimination.
///
/// Fails with [`Error::NonInvertible`] before any elimination work when
/// `|det(m)| < SINGULARITY_TOLERANCE`.
pub fn inverse(m: &Matrix) -> Result<Matrix, Error> {
    let det = determinant(m)?;
    if det.abs() < SINGULARITY_TOLERANCE {
        return Err(Error::NonInvertible { determinant: det });
    }

    let n = m.rows();
    let mut work = m.clone();
    let mut inv = Matrix::identity(n);

    for k in 0..n {
        let p = pivot_row(&work, k);
        work.swap_rows(p, k);
        inv.swap_rows(p, k);

        let pivot = work.get(k, k);
        for v in work.row_mut(k) {
            *v /= pivot;
        }
        for v in inv.row_mut(k) {
            *v /= pivot;
        }

        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = work.get(i, k);
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                let w = work.get(i, j) - factor * work.get(k, j);
                work.set(i, j, w);
                let v = inv.get(i, j) - factor * inv.get(k, j);
                inv.set(i, j, v);
            }
        }
    }

    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiply::multiply;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_determinant_small() {
        let a = m(vec![vec![4.0, 3.0], vec![6.0, 3.0]]);
        assert!((determinant(&a).unwrap() - (-6.0)).abs() < 1e-12);

        let b = m(vec![
            vec![2.0, -3.0, 1.0],
            vec![2.0, 0.0, -1.0],
            vec![1.0, 4.0, 5.0],
        ]);
        assert!((determinant(&b).unwrap() - 49.0).abs() < 1e-9);
    }

    #[test]
    fn test_determinant_needs_row_swap() {
        let a = m(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(determinant(&a).unwrap(), -1.0);
    }

    #[test]
    fn test_determinant_singular_is_zero() {
        let zero = Matrix::zeros(2, 2);
        assert_eq!(determinant(&zero).unwrap(), 0.0);

        let rank_one = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(determinant(&rank_one).unwrap().abs() < SINGULARITY_TOLERANCE);
    }

    #[test]
    fn test_determinant_rejects_non_square() {
        assert!(matches!(
            determinant(&Matrix::zeros(2, 3)),
            Err(Error::DimensionMismatch { op: "determinant", .. })
        ));
    }

    #[test]
    fn test_inverse_times_matrix_is_identity() {
        let a = m(vec![
            vec![4.0, 7.0, 2.0],
            vec![3.0, 6.0, 1.0],
            vec![2.0, 5.0, 3.0],
        ]);
        let inv = inverse(&a).unwrap();
        let product = multiply(&inv, &a).unwrap();
        assert!(product.approx_eq(&Matrix::identity(3), 1e-9));
    }

    #[test]
    fn test_inverse_with_zero_leading_entry() {
        let a = m(vec![vec![0.0, 2.0], vec![3.0, 1.0]]);
        let inv = inverse(&a).unwrap();
        assert!(multiply(&inv, &a).unwrap().approx_eq(&Matrix::identity(2), 1e-12));
    }

    #[test]
    fn test_inverse_singular_fails() {
        let err = inverse(&Matrix::zeros(2, 2)).unwrap_err();
        assert!(matches!(err, Error::NonInvertible { determinant } if determinant == 0.0));

        let tiny = m(vec![vec![1e-6, 0.0], vec![0.0, 1e-6]]);
        assert!(matches!(inverse(&tiny), Err(Error::NonInvertible { .. })));
    }
}
