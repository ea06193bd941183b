//! Row-by-row construction of a [`Matrix`] with explicit partial state.
//!
//! The CSV loader allocates the full buffer for the scanned shape up front
//! and pushes rows as they parse. If a row fails, the builder is dropped and
//! releases exactly the `rows_filled` rows it holds; there is no separate
//! cleanup path to get wrong.
use crate::error::{MatrixError, ParseIssue, Result, ShapeError};
use crate::math::matrix::{check_dims, Matrix};

#[derive(Debug)]
pub struct MatrixBuilder<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    rows_filled: usize,
}

impl<T> MatrixBuilder<T> {
    pub fn with_shape(rows: usize, cols: usize) -> Result<Self> {
        check_dims(rows, cols)?;
        Ok(Self {
            data: Vec::with_capacity(rows * cols),
            rows,
            cols,
            rows_filled: 0,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows_filled(&self) -> usize {
        self.rows_filled
    }

    pub fn is_complete(&self) -> bool {
        self.rows_filled == self.rows
    }

    /// Append one row. The row must have exactly `cols` values and the
    /// builder must not already hold `rows` rows.
    pub fn push_row<I>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if self.is_complete() {
            return Err(ShapeError::BufferLength {
                rows: self.rows,
                cols: self.cols,
                len: (self.rows + 1) * self.cols,
            }
            .into());
        }
        let start = self.data.len();
        self.data.extend(row);
        let found = self.data.len() - start;
        if found != self.cols {
            self.data.truncate(start);
            return Err(ShapeError::BufferLength {
                rows: self.rows,
                cols: self.cols,
                len: start + found,
            }
            .into());
        }
        self.rows_filled += 1;
        Ok(())
    }

    /// Finish construction. Fails with a row-count parse issue when fewer
    /// rows than announced were pushed.
    pub fn finish(self) -> Result<Matrix<T>> {
        if !self.is_complete() {
            return Err(MatrixError::Parse {
                line: self.rows_filled + 1,
                issue: ParseIssue::RowCount {
                    expected: self.rows,
                    found: self.rows_filled,
                },
            });
        }
        Ok(Matrix::from_parts(self.rows, self.cols, self.data))
    }
}
