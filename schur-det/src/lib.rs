//! Block determinants through the Schur complement.
//!
//! `schur-det` computes `det(M)` for `M = [[A, B], [C, D]]` as
//! `det(A) · det(D − C·A⁻¹·B)` twice per problem instance: once with the
//! products split across row-block workers and the two determinants
//! evaluated concurrently, and once single-threaded as a baseline. The batch
//! driver times both and records each instance independently.
//!
//! # Example
//!
//! ```no_run
//! use schur_det::{parse_instances, run_batch, write_report};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = "1\n2\n2\n1\n1\n3\n";
//!     let records = run_batch(parse_instances(input)?).await;
//!     write_report(std::io::stdout(), &records, chrono::Utc::now())?;
//!     Ok(())
//! }
//! ```

mod batch;
mod config;
mod error;
mod generate;
mod instance;
mod report;
mod schur;

pub use batch::{Comparison, InstanceRecord, TimedResult, run_batch, run_instance};
pub use config::{Config, Mode};
pub use error::Error;
pub use generate::{generate_instance, write_instance};
pub use instance::{ProblemInstance, parse_instances, read_instances};
pub use report::write_report;
pub use schur::{DeterminantSource, schur_parallel, schur_sequential};
