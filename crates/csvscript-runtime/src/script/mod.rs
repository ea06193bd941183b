//! CsvScript: a line-oriented statement language over CSV-backed matrices.
//!
//! ```text
//! persistent A
//! persistent E
//! row = E[0] + 1
//! D = transpose A
//! A = D * E
//! ```
//!
//! `persistent X` loads `X.csv` from the configured data directory and, at the
//! end of a successful run, writes the final value of `X` back to it.
pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;

use thiserror::Error;

use crate::error::MatrixError;

pub use interpreter::{run_script, Interpreter, RunReport, Value};
pub use parser::parse_program;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: syntax error: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: undefined variable '{name}'")]
    UndefinedVariable { line: usize, name: String },

    #[error("line {line}: unsupported operation '{op}' on {operands}")]
    UnsupportedOperation {
        line: usize,
        op: &'static str,
        operands: String,
    },

    #[error("line {line}: division by zero")]
    DivisionByZero { line: usize },

    #[error("line {line}: invalid index {value}")]
    InvalidIndex { line: usize, value: i64 },

    #[error("line {line}: {source}")]
    Runtime {
        line: usize,
        #[source]
        source: MatrixError,
    },
}

impl ScriptError {
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Syntax { line, .. }
            | ScriptError::UndefinedVariable { line, .. }
            | ScriptError::UnsupportedOperation { line, .. }
            | ScriptError::DivisionByZero { line }
            | ScriptError::InvalidIndex { line, .. }
            | ScriptError::Runtime { line, .. } => *line,
        }
    }
}
