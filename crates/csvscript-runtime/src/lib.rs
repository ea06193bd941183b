//! csvscript-runtime: integer matrices, CSV persistence and a small script
//! interpreter.
//!
//! The crate provides dense `Matrix`/`Vector` containers with the usual
//! kernels (transpose, multiply, add, scalar shift/scale, row extraction), a
//! CSV codec that infers the matrix shape from raw text before parsing, and
//! the CsvScript statement language that chains those operations over
//! CSV-backed variables.
pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod script;

pub use error::{MatrixError, ParseIssue, Result, ShapeError};
pub use math::{Matrix, MatrixBuilder, Vector};
