use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Failures reported by the matrix runtime.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// A CSV source or destination could not be opened, read or written.
    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV text does not describe a rectangular integer matrix.
    #[error("parse failure at line {line}: {issue}")]
    Parse { line: usize, issue: ParseIssue },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("{axis} index {index} out of bounds for length {len}")]
    OutOfBounds {
        axis: Axis,
        index: usize,
        len: usize,
    },
}

/// What went wrong on a CSV line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    InvalidInteger(String),
    FieldCount { expected: usize, found: usize },
    RowCount { expected: usize, found: usize },
    Empty,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseIssue::InvalidInteger(field) => write!(f, "'{}' is not an integer", field),
            ParseIssue::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            ParseIssue::RowCount { expected, found } => {
                write!(f, "expected {} rows, found {}", expected, found)
            }
            ParseIssue::Empty => write!(f, "input contains no rows"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
    Element,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
            Axis::Element => write!(f, "element"),
        }
    }
}

/// Dimension failures, either from combining two operands or from building
/// a container out of an ill-sized buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("incompatible shapes for {op}: {}x{} and {}x{}", .lhs.0, .lhs.1, .rhs.0, .rhs.1)]
    Incompatible {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    BufferLength { rows: usize, cols: usize, len: usize },

    #[error("shape ({rows}, {cols}) has a zero dimension")]
    Empty { rows: usize, cols: usize },
}

impl MatrixError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MatrixError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, MatrixError::Parse { .. })
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, MatrixError::Shape(_))
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, MatrixError::OutOfBounds { .. })
    }
}
