//! Dense integer containers and the kernels that operate on them.
//!
//! Provides `Matrix` (2D, row-major) and `Vector` (1D) plus `MatrixBuilder`
//! for tracked row-by-row construction. Both containers own their storage;
//! every kernel returns a new value.
pub mod builder;
pub mod matrix;
mod ops;
pub mod vector;

pub use builder::MatrixBuilder;
pub use matrix::Matrix;
pub use vector::Vector;
