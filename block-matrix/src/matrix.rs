//! Dense row-major matrix storage.

use std::fmt;
use std::ops::Range;

use crate::Error;

/// A dense `rows × cols` matrix of `f64` stored row-major in one buffer.
///
/// Every stage of the pipeline takes matrices by reference and clones what it
/// hands to a worker, so no two workers ever alias the same buffer.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Builds a matrix from nested rows.
    ///
    /// All rows must have the same length as the first one. An empty outer
    /// vector yields a `0×0` matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |row| row.len());
        let mut data = Vec::with_capacity(n_rows * n_cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::RaggedRow {
                    row: i,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Returns an owned copy of the rows in `range`.
    pub fn slice_rows(&self, range: Range<usize>) -> Result<Self, Error> {
        if range.start > range.end || range.end > self.rows {
            return Err(Error::DimensionMismatch {
                op: "slice_rows",
                left: self.shape(),
                right: (range.end.saturating_sub(range.start), self.cols),
            });
        }
        Ok(Self {
            rows: range.len(),
            cols: self.cols,
            data: self.data[range.start * self.cols..range.end * self.cols].to_vec(),
        })
    }

    /// Copies `block` into this matrix starting at row `offset`.
    pub fn write_rows(&mut self, offset: usize, block: &Matrix) -> Result<(), Error> {
        if block.cols != self.cols || offset + block.rows > self.rows {
            return Err(Error::DimensionMismatch {
                op: "write_rows",
                left: self.shape(),
                right: block.shape(),
            });
        }
        let start = offset * self.cols;
        self.data[start..start + block.data.len()].copy_from_slice(&block.data);
        Ok(())
    }

    /// Element-wise `self - other`.
    pub fn sub(&self, other: &Matrix) -> Result<Self, Error> {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch {
                op: "sub",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// `true` when both shapes match and every element differs by at most `eps`.
    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix {}x{} [", self.rows, self.cols)?;
        for i in 0..self.rows {
            writeln!(f, "  {:?}", self.row(i))?;
        }
        write!(f, "]")
    }
}
