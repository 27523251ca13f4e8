//! Random problem instances for benchmarking.

use std::io::{self, Write};

use block_matrix::Matrix;
use rand::Rng;

use crate::Error;
use crate::instance::ProblemInstance;

/// Generates an instance whose leading block is always invertible.
///
/// `A` is upper triangular with a diagonal in `1..=10` and entries in `0..=10`
/// above it, so `det(A)` is the product of non-zero integers. `B`, `C` and `D`
/// hold integers in `0..=100`.
pub fn generate_instance<R: Rng + ?Sized>(
    n: usize,
    workers: usize,
    rng: &mut R,
) -> Result<ProblemInstance, Error> {
    let mut a = Matrix::zeros(n, n);
    for i in 0..n {
        a.set(i, i, f64::from(rng.gen_range(1..=10_u8)));
        for j in (i + 1)..n {
            a.set(i, j, f64::from(rng.gen_range(0..=10_u8)));
        }
    }

    let b = random_matrix(n, rng);
    let c = random_matrix(n, rng);
    let d = random_matrix(n, rng);
    ProblemInstance::new(workers, a, b, c, d)
}

fn random_matrix<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Matrix {
    let mut m = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            m.set(i, j, f64::from(rng.gen_range(0..=100_u8)));
        }
    }
    m
}

/// Serializes `instance` in the input file format.
pub fn write_instance<W: Write>(mut out: W, instance: &ProblemInstance) -> io::Result<()> {
    writeln!(out, "{}", instance.n)?;
    writeln!(out, "{}", instance.workers)?;
    for m in [&instance.a, &instance.b, &instance.c, &instance.d] {
        for i in 0..m.rows() {
            let line = m
                .row(i)
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}
