//! Problem instances and the text format they are read from.
//!
//! # Input Format
//!
//! Instances follow each other until end of input:
//!
//! ```text
//! n
//! worker_count
//! n rows of A, n whitespace-separated numbers each
//! n rows of B
//! n rows of C
//! n rows of D
//! ```
//!
//! Blank lines before an instance header are ignored.

use std::path::Path;

use block_matrix::Matrix;

use crate::Error;

/// One block matrix `[[A, B], [C, D]]` and the worker count to use for it.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub n: usize,
    pub workers: usize,
    pub a: Matrix,
    pub b: Matrix,
    pub c: Matrix,
    pub d: Matrix,
}

impl ProblemInstance {
    /// Builds an instance, checking that all four blocks are `n×n`.
    pub fn new(workers: usize, a: Matrix, b: Matrix, c: Matrix, d: Matrix) -> Result<Self, Error> {
        let n = a.rows();
        for m in [&a, &b, &c, &d] {
            if m.shape() != (n, n) {
                return Err(block_matrix::Error::DimensionMismatch {
                    op: "block assembly",
                    left: a.shape(),
                    right: m.shape(),
                }
                .into());
            }
        }
        Ok(Self {
            n,
            workers,
            a,
            b,
            c,
            d,
        })
    }
}

/// Reads and parses an instance file.
///
/// See [`parse_instances`] for how errors are split between the batch and
/// individual instances.
pub async fn read_instances(
    path: impl AsRef<Path>,
) -> Result<Vec<Result<ProblemInstance, Error>>, Error> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_instances(&content)
}

/// Parses every instance in `input`.
///
/// Structural problems (a header that is not a positive integer, or input
/// ending in the middle of an instance) make the whole input unusable and
/// return [`Error::DataSource`]. Bad content inside an instance (a value that
/// is not a number, a row of the wrong length, a worker count of zero) only
/// turns that instance into an [`Error::Instance`] entry and parsing goes on
/// with the next one.
pub fn parse_instances(input: &str) -> Result<Vec<Result<ProblemInstance, Error>>, Error> {
    let lines: Vec<&str> = input.lines().collect();
    let mut instances = Vec::new();
    let mut pos = 0;

    loop {
        while pos < lines.len() && lines[pos].trim().is_empty() {
            pos += 1;
        }
        if pos >= lines.len() {
            break;
        }

        let n = parse_header(&lines, pos, "matrix size")?;
        if n == 0 {
            return Err(Error::DataSource {
                line: pos + 1,
                reason: "matrix size must be positive".to_string(),
            });
        }
        let header_line = pos + 1;
        let workers = parse_header(&lines, pos + 1, "worker count")?;
        pos += 2;

        let needed = n.checked_mul(4).ok_or_else(|| Error::DataSource {
            line: header_line,
            reason: format!("matrix size {n} is too large"),
        })?;
        let end = match pos.checked_add(needed) {
            Some(end) if end <= lines.len() => end,
            _ => {
                return Err(Error::DataSource {
                    line: lines.len(),
                    reason: format!(
                        "instance {} needs {} matrix rows, found {}",
                        instances.len(),
                        needed,
                        lines.len() - pos
                    ),
                });
            }
        };

        let index = instances.len();
        instances.push(parse_body(index, n, workers, &lines[pos..end], pos));
        pos = end;
    }

    Ok(instances)
}

fn parse_header(lines: &[&str], pos: usize, what: &str) -> Result<usize, Error> {
    let line = lines.get(pos).ok_or_else(|| Error::DataSource {
        line: pos + 1,
        reason: format!("missing {what}"),
    })?;
    line.trim().parse().map_err(|_| Error::DataSource {
        line: pos + 1,
        reason: format!("{what} {:?} is not a non-negative integer", line.trim()),
    })
}

fn parse_body(
    index: usize,
    n: usize,
    workers: usize,
    body: &[&str],
    first_line: usize,
) -> Result<ProblemInstance, Error> {
    if workers == 0 {
        return Err(Error::Instance {
            index,
            reason: "worker count must be positive".to_string(),
        });
    }

    let mut blocks = Vec::with_capacity(4);
    for chunk in body.chunks(n) {
        let mut rows = Vec::with_capacity(n);
        for line in chunk {
            let row = line
                .split_whitespace()
                .map(str::parse::<f64>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| Error::Instance {
                    index,
                    reason: format!("{e} in {line:?}"),
                })?;
            if row.len() != n {
                return Err(Error::Instance {
                    index,
                    reason: format!(
                        "row at line {} has {} values, expected {n}",
                        first_line + blocks.len() * n + rows.len() + 1,
                        row.len()
                    ),
                });
            }
            rows.push(row);
        }
        blocks.push(Matrix::from_rows(rows)?);
    }

    let mut blocks = blocks.into_iter();
    match (blocks.next(), blocks.next(), blocks.next(), blocks.next()) {
        (Some(a), Some(b), Some(c), Some(d)) => ProblemInstance::new(workers, a, b, c, d),
        _ => Err(Error::Instance {
            index,
            reason: "expected four blocks".to_string(),
        }),
    }
}
