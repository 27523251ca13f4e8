//! Dense matrices with row-block parallel multiplication.
//!
//! `block-matrix` provides a row-major [`Matrix`] together with the pieces
//! needed to split a product across independent workers and to evaluate
//! determinants and inverses by LU-style elimination.
//!
//! # Parallel Model
//!
//! - **Partitioning**: rows of the left operand are cut into contiguous
//!   blocks, one per worker ([`partition_rows`])
//! - **Workers**: each block runs on its own blocking task and owns copies of
//!   its row slice and of the right operand, nothing is shared
//! - **Merge**: partial products are written back at their recorded offset,
//!   so completion order never matters
//!
//! # Example
//!
//! ```no_run
//! use block_matrix::{Matrix, parallel_multiply};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//!     let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]])?;
//!
//!     let c = parallel_multiply(&a, &b, 2).await?;
//!     assert_eq!(c.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
//!
//!     Ok(())
//! }
//! ```

mod error;
mod lu;
mod matrix;
mod multiply;
mod parallel;
mod partition;

pub use error::Error;
pub use lu::{SINGULARITY_TOLERANCE, determinant, inverse};
pub use matrix::Matrix;
pub use multiply::{BlockTask, multiply, multiply_block};
pub use parallel::parallel_multiply;
pub use partition::{RowBlock, partition_rows};
