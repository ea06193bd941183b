//! Integration tests for the algebra kernels.

use csvscript_runtime::error::{Axis, MatrixError, ShapeError};
use csvscript_runtime::math::Matrix;
use proptest::prelude::*;

fn m(rows: Vec<Vec<i64>>) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn transpose_square() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    assert_eq!(a.transpose().to_nested(), vec![vec![1, 3], vec![2, 4]]);
}

#[test]
fn multiply_row_by_column() {
    let a = m(vec![vec![1, 2]]);
    let b = m(vec![vec![3], vec![4]]);
    let c = a.multiply(&b).unwrap();
    assert_eq!(c.shape(), (1, 1));
    assert_eq!(c.to_nested(), vec![vec![11]]);
}

#[test]
fn multiply_rectangular() {
    let a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    let b = m(vec![vec![7, 8], vec![9, 10], vec![11, 12]]);
    let c = a.multiply(&b).unwrap();
    assert_eq!(c.to_nested(), vec![vec![58, 64], vec![139, 154]]);
}

#[test]
fn multiply_incompatible_shapes() {
    let a = m(vec![vec![1, 2]]);
    let b = m(vec![vec![1, 2]]);
    let err = a.multiply(&b).unwrap_err();
    assert!(matches!(
        err,
        MatrixError::Shape(ShapeError::Incompatible {
            op: "multiply",
            lhs: (1, 2),
            rhs: (1, 2)
        })
    ));
}

#[test]
fn add_elementwise() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let b = m(vec![vec![10, 20], vec![30, 40]]);
    assert_eq!(
        a.add(&b).unwrap().to_nested(),
        vec![vec![11, 22], vec![33, 44]]
    );
}

#[test]
fn add_incompatible_shapes() {
    let a = m(vec![vec![1, 2]]);
    let b = m(vec![vec![1], vec![2]]);
    assert!(a.add(&b).unwrap_err().is_shape());
}

#[test]
fn scalar_matrix_ops() {
    let a = m(vec![vec![1, -2], vec![0, 4]]);
    assert_eq!(a.scalar_add(3).to_nested(), vec![vec![4, 1], vec![3, 7]]);
    assert_eq!(a.scalar_mul(-2).to_nested(), vec![vec![-2, 4], vec![0, -8]]);
}

#[test]
fn extract_row_then_shift() {
    let a = m(vec![vec![5, 6, 7]]);
    let row = a.extract_row(0).unwrap();
    assert_eq!(row.as_slice(), &[5, 6, 7]);
    assert_eq!(row.scalar_add(10).as_slice(), &[15, 16, 17]);
    assert_eq!(row.scalar_mul(2).as_slice(), &[10, 12, 14]);
}

#[test]
fn extract_row_out_of_bounds() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    for idx in [2usize, 3, 100] {
        assert!(matches!(
            a.extract_row(idx),
            Err(MatrixError::OutOfBounds {
                axis: Axis::Row,
                len: 2,
                ..
            })
        ));
    }
}

#[test]
fn kernels_leave_inputs_untouched() {
    let a = m(vec![vec![1, 2], vec![3, 4]]);
    let before = a.clone();
    let _ = a.transpose();
    let _ = a.multiply(&a).unwrap();
    let _ = a.add(&a).unwrap();
    let _ = a.scalar_add(7);
    let _ = a.scalar_mul(7);
    assert_eq!(a, before);
}

// ---------------------------------------------------------------------------
// Algebraic properties
// ---------------------------------------------------------------------------

fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-1000i64..1000, rows * cols)
        .prop_map(move |data| Matrix::from_shape_vec((rows, cols), data).unwrap())
}

fn any_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..6, 1usize..6).prop_flat_map(|(r, c)| matrix_strategy(r, c))
}

fn chain() -> impl Strategy<Value = (Matrix, Matrix, Matrix)> {
    (1usize..5, 1usize..5, 1usize..5, 1usize..5).prop_flat_map(|(a, b, c, d)| {
        (
            matrix_strategy(a, b),
            matrix_strategy(b, c),
            matrix_strategy(c, d),
        )
    })
}

proptest! {
    #[test]
    fn prop_double_transpose_is_identity(a in any_matrix()) {
        prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn prop_multiply_is_associative((a, b, c) in chain()) {
        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_scalar_identities(a in any_matrix()) {
        prop_assert_eq!(a.scalar_mul(1), a.clone());
        prop_assert_eq!(a.scalar_add(0), a);
    }

    #[test]
    fn prop_rows_in_range_extract(a in any_matrix()) {
        for i in 0..a.nrows() {
            let row = a.extract_row(i).unwrap();
            prop_assert_eq!(row.as_slice(), a.row_slice(i));
        }
        prop_assert!(a.extract_row(a.nrows()).is_err());
    }
}
