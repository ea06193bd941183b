use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::Zero;

use crate::error::{Axis, MatrixError, Result, ShapeError};
use crate::math::vector::Vector;

/// Dense row-major matrix that exclusively owns its buffer.
///
/// A `Matrix` always has at least one row and one column. Operations that
/// derive a new matrix allocate a fresh buffer; nothing is shared between
/// instances, and the buffer is released when the value is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T = i64> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        check_dims(rows, cols)?;
        if data.len() != rows * cols {
            return Err(ShapeError::BufferLength {
                rows,
                cols,
                len: data.len(),
            }
            .into());
        }
        Ok(Self { data, rows, cols })
    }

    /// Build from nested rows; every row must have the length of the first.
    pub fn from_rows<R>(rows: Vec<R>) -> Result<Self>
    where
        R: Into<Vec<T>>,
    {
        let n_rows = rows.len();
        let mut data = Vec::new();
        let mut cols = 0;
        for (idx, row) in rows.into_iter().enumerate() {
            let row: Vec<T> = row.into();
            if idx == 0 {
                cols = row.len();
                data.reserve(n_rows * cols);
            } else if row.len() != cols {
                return Err(ShapeError::BufferLength {
                    rows: n_rows,
                    cols,
                    len: data.len() + row.len(),
                }
                .into());
            }
            data.extend(row);
        }
        Self::from_shape_vec((n_rows, cols), data)
    }

    /// Assemble without re-validating. Callers guarantee `data.len() == rows * cols`
    /// and non-zero dimensions.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Borrow row `row`. Panics when out of range; see [`Matrix::extract_row`]
    /// for the checked, owning variant.
    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn rows_iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        if row >= self.rows {
            return Err(MatrixError::OutOfBounds {
                axis: Axis::Row,
                index: row,
                len: self.rows,
            });
        }
        if col >= self.cols {
            return Err(MatrixError::OutOfBounds {
                axis: Axis::Column,
                index: col,
                len: self.cols,
            });
        }
        Ok(&self.data[self.offset(row, col)])
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    pub fn to_nested(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        self.rows_iter().map(|row| row.to_vec()).collect()
    }

    /// Copy row `row` into a new, independently owned vector.
    pub fn extract_row(&self, row: usize) -> Result<Vector<T>>
    where
        T: Clone,
    {
        if row >= self.rows {
            return Err(MatrixError::OutOfBounds {
                axis: Axis::Row,
                index: row,
                len: self.rows,
            });
        }
        Ok(Vector::from_parts(self.row_slice(row).to_vec()))
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        check_dims(rows, cols)?;
        Ok(Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        })
    }
}

pub(crate) fn check_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(ShapeError::Empty { rows, cols }.into());
    }
    Ok(())
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.rows_iter().enumerate() {
            write!(f, "[")?;
            for (idx, value) in row.iter().enumerate() {
                write!(f, "{}", value)?;
                if idx + 1 != row.len() {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if r + 1 != self.rows {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
