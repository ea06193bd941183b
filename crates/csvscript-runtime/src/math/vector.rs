use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

use num_traits::Zero;

use crate::error::{Axis, MatrixError, Result, ShapeError};

/// Owned, non-empty sequence of integers. Usually a copy of one matrix row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vector<T = i64> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    pub fn from_vec(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(ShapeError::Empty { rows: 1, cols: 0 }.into());
        }
        Ok(Self { data })
    }

    pub(crate) fn from_parts(data: Vec<T>) -> Self {
        debug_assert!(!data.is_empty());
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed vector; kept for API symmetry with `Vec`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.data.get(index).ok_or(MatrixError::OutOfBounds {
            axis: Axis::Element,
            index,
            len: self.data.len(),
        })
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Vector<U>
    where
        F: FnMut(&T) -> U,
    {
        Vector {
            data: self.data.iter().map(|v| f(v)).collect(),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> Vector<T>
where
    T: Clone + Zero,
{
    pub fn zeros(len: usize) -> Result<Self> {
        Self::from_vec(vec![T::zero(); len])
    }
}

impl<T> TryFrom<Vec<T>> for Vector<T> {
    type Error = MatrixError;

    fn try_from(value: Vec<T>) -> Result<Self> {
        Vector::from_vec(value)
    }
}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        value.data
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
