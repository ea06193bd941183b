//! One-shot matrix commands: load CSV inputs, apply a kernel, write CSV.
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use csvscript_runtime::io;
use csvscript_runtime::math::{Matrix, Vector};

use crate::util::{output_writer, validate_csv_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Transpose,
    Scale(i64),
    Shift(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Multiply,
    Add,
}

/// Load a matrix from a `.csv` file that must already exist.
pub fn load_input(path: &Path) -> Result<Matrix> {
    validate_csv_file(path)?;
    io::load(path).with_context(|| format!("Failed to load matrix: {}", path.display()))
}

pub fn apply_unary(input: &Path, op: UnaryOp) -> Result<Matrix> {
    let matrix = load_input(input)?;
    let result = match op {
        UnaryOp::Transpose => matrix.transpose(),
        UnaryOp::Scale(s) => matrix.scalar_mul(s),
        UnaryOp::Shift(s) => matrix.scalar_add(s),
    };
    log::info!(
        "[CsvScript::Matrix] {:?} {} -> {}x{}",
        op,
        input.display(),
        result.nrows(),
        result.ncols()
    );
    Ok(result)
}

pub fn apply_binary(lhs: &Path, rhs: &Path, op: BinaryOp) -> Result<Matrix> {
    let a = load_input(lhs)?;
    let b = load_input(rhs)?;
    let result = match op {
        BinaryOp::Multiply => a.multiply(&b),
        BinaryOp::Add => a.add(&b),
    }
    .with_context(|| format!("Cannot {:?} {} and {}", op, lhs.display(), rhs.display()))?;
    log::info!(
        "[CsvScript::Matrix] {:?} -> {}x{}",
        op,
        result.nrows(),
        result.ncols()
    );
    Ok(result)
}

/// Extract row `index` and optionally scale then shift it.
pub fn extract_row(
    input: &Path,
    index: usize,
    scale: Option<i64>,
    shift: Option<i64>,
) -> Result<Vector> {
    let matrix = load_input(input)?;
    let mut row = matrix
        .extract_row(index)
        .with_context(|| format!("Cannot extract row {} of {}", index, input.display()))?;
    if let Some(s) = scale {
        row = row.scalar_mul(s);
    }
    if let Some(s) = shift {
        row = row.scalar_add(s);
    }
    Ok(row)
}

/// Save to `output` when given, otherwise print CSV to stdout.
pub fn write_matrix(matrix: &Matrix, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => io::save(path, matrix)
            .with_context(|| format!("Failed to write matrix: {}", path.display())),
        None => {
            let writer = output_writer(None)?;
            io::write_to(writer, matrix).context("Failed to write matrix to stdout")
        }
    }
}

pub fn write_vector(vector: &Vector, output: Option<&PathBuf>) -> Result<()> {
    let line = vector
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let mut writer = output_writer(output).context("Failed to open output")?;
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}
