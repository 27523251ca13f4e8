//! Error types for schur-det operations.

use thiserror::Error;

use crate::schur::DeterminantSource;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Matrix(#[from] block_matrix::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed input at line {line}: {reason}")]
    DataSource { line: usize, reason: String },

    #[error("instance {index} is malformed: {reason}")]
    Instance { index: usize, reason: String },

    #[error("usage error: {0}")]
    Usage(String),

    #[error("no determinant published by the {0} worker")]
    MissingDeterminant(DeterminantSource),
}

impl Error {
    /// `true` when the leading block could not be inverted.
    pub fn is_non_invertible(&self) -> bool {
        matches!(self, Error::Matrix(block_matrix::Error::NonInvertible { .. }))
    }
}
