//! Plain array arithmetic on `&[T]` vectors and `&[Vec<T>]` row-major
//! matrices.
//!
//! These are value-in / value-out helpers with no storage abstraction:
//! every function allocates its result. Shape mismatches (including ragged
//! rows) return [`CoreError::DimensionMismatch`].
//!
//! | Function | Computes |
//! |----------|----------|
//! | [`add`], [`scale`], [`copy`] | element-wise vector ops |
//! | [`squared_distance`], [`distance`] | Euclidean distance |
//! | [`identity`] | `I` |
//! | [`matrix_ab`], [`matrix_ab_vec`], [`matrix_abt`], [`matrix_abct`] | products |
//! | [`det`] | determinant |

use crate::Float;
use crate::error::{CoreError, Result};
use crate::linalg::LuDecomposition;
use crate::matrix::Matrix;

/// `v * v`.
#[inline]
pub fn sq<T: Float>(v: T) -> T {
    v * v
}

/// Squared Euclidean distance between two equal-length vectors.
pub fn squared_distance<T: Float>(a: &[T], b: &[T]) -> Result<T> {
    check_len(a, b)?;
    Ok(a
        .iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| acc + sq(y - x)))
}

/// Euclidean distance between two equal-length vectors.
pub fn distance<T: Float>(a: &[T], b: &[T]) -> Result<T> {
    Ok(squared_distance(a, b)?.sqrt())
}

/// Element-wise `a + b`.
pub fn add<T: Float>(a: &[T], b: &[T]) -> Result<Vec<T>> {
    check_len(a, b)?;
    Ok(a.iter().zip(b).map(|(&x, &y)| x + y).collect())
}

/// `v * s`.
pub fn scale<T: Float>(v: &[T], s: T) -> Vec<T> {
    v.iter().map(|&x| x * s).collect()
}

/// A fresh copy of `v`.
pub fn copy<T: Float>(v: &[T]) -> Vec<T> {
    v.to_vec()
}

/// The `n x n` identity.
pub fn identity<T: Float>(n: usize) -> Vec<Vec<T>> {
    (0..n)
        .map(|i| {
            let mut row = vec![T::zero(); n];
            row[i] = T::one();
            row
        })
        .collect()
}

/// `A * B`.
///
/// ```
/// # use sparsela_core::array::matrix_ab;
/// let a = vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]];
/// let b = vec![vec![5.0_f64, 6.0], vec![7.0, 8.0]];
/// assert_eq!(matrix_ab(&a, &b).unwrap(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
/// ```
pub fn matrix_ab<T: Float>(a: &[Vec<T>], b: &[Vec<T>]) -> Result<Vec<Vec<T>>> {
    let (m, inner) = shape(a)?;
    let (b_rows, n) = shape(b)?;
    if inner != b_rows {
        return Err(CoreError::DimensionMismatch {
            expected: vec![inner, n],
            got: vec![b_rows, n],
        });
    }

    let mut out = vec![vec![T::zero(); n]; m];
    for (out_row, a_row) in out.iter_mut().zip(a) {
        for (j, x) in out_row.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (k, &aik) in a_row.iter().enumerate() {
                acc += aik * b[k][j];
            }
            *x = acc;
        }
    }
    Ok(out)
}

/// `A * x` for a vector `x`.
pub fn matrix_ab_vec<T: Float>(a: &[Vec<T>], x: &[T]) -> Result<Vec<T>> {
    let (_, inner) = shape(a)?;
    if inner != x.len() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![inner],
            got: vec![x.len()],
        });
    }
    Ok(a.iter()
        .map(|row| {
            row.iter()
                .zip(x)
                .fold(T::zero(), |acc, (&aik, &xk)| acc + aik * xk)
        })
        .collect())
}

/// `A * B^T`.
pub fn matrix_abt<T: Float>(a: &[Vec<T>], b: &[Vec<T>]) -> Result<Vec<Vec<T>>> {
    let (_, a_cols) = shape(a)?;
    let (_, b_cols) = shape(b)?;
    if a_cols != b_cols {
        return Err(CoreError::DimensionMismatch {
            expected: vec![a_cols],
            got: vec![b_cols],
        });
    }
    Ok(a.iter()
        .map(|a_row| {
            b.iter()
                .map(|b_row| {
                    a_row
                        .iter()
                        .zip(b_row)
                        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
                })
                .collect()
        })
        .collect())
}

/// `A * B * C^T`.
pub fn matrix_abct<T: Float>(a: &[Vec<T>], b: &[Vec<T>], c: &[Vec<T>]) -> Result<Vec<Vec<T>>> {
    matrix_ab(a, &matrix_abt(b, c)?)
}

/// Determinant of a square matrix.
///
/// 2x2 and 3x3 use the closed-form expansion; larger sizes use LU with
/// partial pivoting. The empty matrix has determinant one.
///
/// ```
/// # use sparsela_core::array::det;
/// let a = vec![vec![6.0_f64, 1.0, 1.0], vec![4.0, -2.0, 5.0], vec![2.0, 8.0, 7.0]];
/// assert!((det(&a).unwrap() - (-306.0)).abs() < 1e-10);
/// ```
pub fn det<T: Float>(a: &[Vec<T>]) -> Result<T> {
    let (m, n) = shape(a)?;
    if m != n {
        return Err(CoreError::InvalidArgument {
            reason: "determinant requires a square matrix",
        });
    }
    match n {
        0 => Ok(T::one()),
        1 => Ok(a[0][0]),
        2 => Ok(a[0][0] * a[1][1] - a[1][0] * a[0][1]),
        3 => Ok(a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
            - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
            + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0])),
        _ => LuDecomposition::new(&Matrix::from_rows(a.to_vec())?, true).det(),
    }
}

fn check_len<T>(a: &[T], b: &[T]) -> Result<()> {
    if a.len() != b.len() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![a.len()],
            got: vec![b.len()],
        });
    }
    Ok(())
}

/// `(rows, cols)` of a row-major array, rejecting ragged rows.
fn shape<T>(a: &[Vec<T>]) -> Result<(usize, usize)> {
    let cols = a.first().map_or(0, Vec::len);
    if let Some(bad) = a.iter().find(|r| r.len() != cols) {
        return Err(CoreError::DimensionMismatch {
            expected: vec![cols],
            got: vec![bad.len()],
        });
    }
    Ok((a.len(), cols))
}
