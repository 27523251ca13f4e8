//! Error types for block-matrix operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("matrix dimension mismatch in {op}: left is {left:?}, right is {right:?}")]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("ragged matrix: row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("matrix is not invertible (determinant {determinant:e})")]
    NonInvertible { determinant: f64 },

    #[error("worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
