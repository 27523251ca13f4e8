//! Batch driver: runs both Schur variants on every instance and times them.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::Error;
use crate::instance::ProblemInstance;
use crate::schur::{schur_parallel, schur_sequential};

/// A determinant together with the wall-clock time it took to compute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedResult {
    pub determinant: f64,
    pub elapsed: Duration,
}

/// Parallel and sequential results for one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub parallel: TimedResult,
    pub sequential: TimedResult,
}

impl Comparison {
    /// Sequential time divided by parallel time.
    pub fn speedup(&self) -> Option<f64> {
        let parallel = self.parallel.elapsed.as_secs_f64();
        if parallel > 0.0 {
            Some(self.sequential.elapsed.as_secs_f64() / parallel)
        } else {
            None
        }
    }
}

/// Outcome of one instance in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRecord {
    pub index: usize,
    /// `None` when the instance could not be read.
    pub workers: Option<usize>,
    pub outcome: Result<Comparison, String>,
}

/// Runs every instance through both Schur variants.
///
/// Failures stay local to their instance: an instance that could not be
/// parsed, or whose computation fails in either variant, yields an error
/// record and the batch carries on. One record is produced per input entry,
/// in the same order.
pub async fn run_batch(instances: Vec<Result<ProblemInstance, Error>>) -> Vec<InstanceRecord> {
    info!(count = instances.len(), "starting batch");
    let mut records = Vec::with_capacity(instances.len());

    for (index, instance) in instances.into_iter().enumerate() {
        let record = match instance {
            Ok(instance) => InstanceRecord {
                index,
                workers: Some(instance.workers),
                outcome: run_instance(&instance).await.map_err(|e| e.to_string()),
            },
            Err(e) => InstanceRecord {
                index,
                workers: None,
                outcome: Err(e.to_string()),
            },
        };

        match &record.outcome {
            Ok(cmp) => info!(
                index,
                parallel = cmp.parallel.determinant,
                sequential = cmp.sequential.determinant,
                parallel_secs = cmp.parallel.elapsed.as_secs_f64(),
                sequential_secs = cmp.sequential.elapsed.as_secs_f64(),
                "instance done"
            ),
            Err(reason) => warn!(index, %reason, "instance failed"),
        }
        records.push(record);
    }

    records
}

/// Times the parallel variant, then the sequential one.
///
/// Both variants run even when the first fails, so each gets its own timing;
/// the record then carries the first failure.
pub async fn run_instance(instance: &ProblemInstance) -> Result<Comparison, Error> {
    let ProblemInstance { a, b, c, d, workers, .. } = instance;

    let start = Instant::now();
    let parallel = schur_parallel(a, b, c, d, *workers).await;
    let parallel_elapsed = start.elapsed();

    let start = Instant::now();
    let sequential = schur_sequential(a, b, c, d);
    let sequential_elapsed = start.elapsed();

    Ok(Comparison {
        parallel: TimedResult {
            determinant: parallel?,
            elapsed: parallel_elapsed,
        },
        sequential: TimedResult {
            determinant: sequential?,
            elapsed: sequential_elapsed,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_matrix::Matrix;

    fn diagonal(v: f64) -> Matrix {
        Matrix::from_rows(vec![vec![v, 0.0], vec![0.0, v]]).unwrap()
    }

    fn instance(a: Matrix) -> ProblemInstance {
        ProblemInstance::new(2, a, Matrix::identity(2), Matrix::identity(2), diagonal(3.0)).unwrap()
    }

    #[tokio::test]
    async fn test_failures_do_not_abort_batch() {
        let batch = vec![
            Ok(instance(Matrix::zeros(2, 2))),
            Err(Error::Instance {
                index: 1,
                reason: "bad row".to_string(),
            }),
            Ok(instance(diagonal(2.0))),
        ];

        let records = run_batch(batch).await;
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].index, 0);
        assert_eq!(records[0].workers, Some(2));
        assert!(records[0].outcome.as_ref().unwrap_err().contains("not invertible"));

        assert_eq!(records[1].workers, None);
        assert!(records[1].outcome.as_ref().unwrap_err().contains("bad row"));

        let cmp = records[2].outcome.as_ref().unwrap();
        assert!((cmp.parallel.determinant - 25.0).abs() < 1e-12);
        assert!((cmp.sequential.determinant - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_speedup() {
        let cmp = Comparison {
            parallel: TimedResult {
                determinant: 1.0,
                elapsed: Duration::from_millis(50),
            },
            sequential: TimedResult {
                determinant: 1.0,
                elapsed: Duration::from_millis(100),
            },
        };
        assert!((cmp.speedup().unwrap() - 2.0).abs() < 1e-12);

        let instant = Comparison {
            parallel: TimedResult {
                determinant: 1.0,
                elapsed: Duration::ZERO,
            },
            ..cmp
        };
        assert_eq!(instant.speedup(), None);
    }
}
