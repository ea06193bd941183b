//! Algebra kernels. Each takes its operands by reference and returns a
//! freshly allocated result; integer overflow wraps.
use num_traits::{CheckedDiv, WrappingAdd, WrappingMul, WrappingNeg, Zero};

use crate::error::{Result, ShapeError};
use crate::math::matrix::Matrix;
use crate::math::vector::Vector;

impl<T> Matrix<T>
where
    T: Copy,
{
    pub fn transpose(&self) -> Matrix<T> {
        let (rows, cols) = self.shape();
        let src = self.as_slice();
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(src[i * cols + j]);
            }
        }
        Matrix::from_parts(cols, rows, data)
    }
}

impl<T> Matrix<T>
where
    T: Copy + Zero + WrappingAdd + WrappingMul,
{
    pub fn multiply(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.ncols() != other.nrows() {
            return Err(ShapeError::Incompatible {
                op: "multiply",
                lhs: self.shape(),
                rhs: other.shape(),
            }
            .into());
        }
        let (n, inner) = self.shape();
        let m = other.ncols();
        let lhs = self.as_slice();
        let rhs = other.as_slice();

        let mut data = Vec::with_capacity(n * m);
        for i in 0..n {
            let row = &lhs[i * inner..(i + 1) * inner];
            for j in 0..m {
                let mut acc = T::zero();
                for (k, a) in row.iter().enumerate() {
                    acc = acc.wrapping_add(&a.wrapping_mul(&rhs[k * m + j]));
                }
                data.push(acc);
            }
        }
        Ok(Matrix::from_parts(n, m, data))
    }

    pub fn add(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.shape() != other.shape() {
            return Err(ShapeError::Incompatible {
                op: "add",
                lhs: self.shape(),
                rhs: other.shape(),
            }
            .into());
        }
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| a.wrapping_add(b))
            .collect();
        Ok(Matrix::from_parts(self.nrows(), self.ncols(), data))
    }

    pub fn scalar_add(&self, scalar: T) -> Matrix<T> {
        self.mapv(|v| v.wrapping_add(&scalar))
    }

    pub fn scalar_mul(&self, scalar: T) -> Matrix<T> {
        self.mapv(|v| v.wrapping_mul(&scalar))
    }
}

impl<T> Vector<T>
where
    T: Copy + WrappingAdd + WrappingMul,
{
    pub fn scalar_add(&self, scalar: T) -> Vector<T> {
        self.mapv(|v| v.wrapping_add(&scalar))
    }

    pub fn scalar_mul(&self, scalar: T) -> Vector<T> {
        self.mapv(|v| v.wrapping_mul(&scalar))
    }
}

// `checked_div` only fails on a nonzero divisor for `MIN / -1`, whose
// wrapped quotient is `MIN`, the same as `MIN.wrapping_neg()`.
fn wrapping_quotient<T: CheckedDiv + WrappingNeg>(value: &T, divisor: &T) -> T {
    value
        .checked_div(divisor)
        .unwrap_or_else(|| value.wrapping_neg())
}

impl<T> Matrix<T>
where
    T: Copy + Zero + CheckedDiv + WrappingNeg,
{
    /// Divide every element by `scalar`, truncating toward zero.
    /// Returns `None` when `scalar` is zero.
    pub fn scalar_div(&self, scalar: T) -> Option<Matrix<T>> {
        if scalar.is_zero() {
            return None;
        }
        Some(self.mapv(|v| wrapping_quotient(v, &scalar)))
    }
}

impl<T> Vector<T>
where
    T: Copy + Zero + CheckedDiv + WrappingNeg,
{
    pub fn scalar_div(&self, scalar: T) -> Option<Vector<T>> {
        if scalar.is_zero() {
            return None;
        }
        Some(self.mapv(|v| wrapping_quotient(v, &scalar)))
    }
}
