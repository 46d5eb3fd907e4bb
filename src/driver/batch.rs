//! Batch mode: evaluate a source file unit by unit

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Context;

use super::{run_unit, LineAccumulator, RunOptions};
use crate::runtime::LispEvaluator;

/// Reads `reader` line by line and evaluates each complete unit as soon as
/// it closes. A trailing unbalanced unit is evaluated at end of input, which
/// reports it as a syntax error.
pub fn run_batch<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    evaluator: &LispEvaluator,
    options: &RunOptions,
) -> anyhow::Result<()> {
    let mut accumulator = LineAccumulator::new();
    let mut units = 0usize;

    for line in reader.lines() {
        let line = line.context("failed to read source line")?;
        if let Some(unit) = accumulator.push_line(&line) {
            units += 1;
            run_unit(evaluator, &unit, out, options)?;
        }
    }

    if let Some(unit) = accumulator.finish() {
        tracing::debug!("flushing unterminated unit at end of input");
        units += 1;
        run_unit(evaluator, &unit, out, options)?;
    }

    tracing::info!(units, "batch run complete");
    out.flush()?;
    Ok(())
}

/// Opens `path` and runs it through [`run_batch`]
pub fn run_file<W: Write>(
    path: &Path,
    out: &mut W,
    evaluator: &LispEvaluator,
    options: &RunOptions,
) -> anyhow::Result<()> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    tracing::info!(path = %path.display(), "running file");
    run_batch(BufReader::new(file), out, evaluator, options)
}
