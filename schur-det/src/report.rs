//! Plain-text report of a batch run.

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::batch::InstanceRecord;

/// Writes one block per record, in record order.
pub fn write_report<W: Write>(
    mut out: W,
    records: &[InstanceRecord],
    generated_at: DateTime<Utc>,
) -> io::Result<()> {
    writeln!(
        out,
        "Schur determinant report ({})",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    writeln!(out)?;

    for record in records {
        match &record.outcome {
            Ok(cmp) => {
                let workers = record.workers.unwrap_or_default();
                writeln!(out, "Result for the given matrices (using {workers} workers):")?;
                writeln!(out, "Parallel method:")?;
                writeln!(out, "\tDeterminant of M: {:?}", cmp.parallel.determinant)?;
                writeln!(
                    out,
                    "\tElapsed time: {:.6} seconds",
                    cmp.parallel.elapsed.as_secs_f64()
                )?;
                writeln!(out, "Sequential method:")?;
                writeln!(out, "\tDeterminant of M: {:?}", cmp.sequential.determinant)?;
                writeln!(
                    out,
                    "\tElapsed time: {:.6} seconds",
                    cmp.sequential.elapsed.as_secs_f64()
                )?;
                if let Some(speedup) = cmp.speedup() {
                    writeln!(out, "\tSpeedup: {speedup:.2}x")?;
                }
            }
            Err(reason) => writeln!(out, "Error in computation: {reason}")?,
        }
        writeln!(out)?;
    }

    out.flush()
}
