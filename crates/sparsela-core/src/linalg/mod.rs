//! Linear algebra over [`Matrix`].
//!
//! Decompositions: [`LuDecomposition`], [`QrDecomposition`]. Neither ever
//! fails; rank deficiency shows up as zeros on the diagonal of `U` or in
//! [`QrDecomposition::r_diag`].

pub mod decomp;

pub use decomp::LuDecomposition;
pub use decomp::QrDecomposition;

use crate::Float;
use crate::error::Result;
use crate::matrix::Matrix;

/// LU decomposition with partial pivoting.
#[inline]
pub fn lu<T: Float>(a: &Matrix<T>) -> LuDecomposition<T> {
    LuDecomposition::new(a, true)
}

/// Householder QR decomposition.
#[inline]
pub fn qr<T: Float>(a: &Matrix<T>) -> QrDecomposition<T> {
    QrDecomposition::new(a)
}

/// Determinant of a square matrix, via LU with partial pivoting.
///
/// ```
/// # use sparsela_core::matrix::Matrix;
/// # use sparsela_core::linalg;
/// let a = Matrix::from_rows(vec![vec![2.0_f64, 1.0], vec![1.0, 4.0]]).unwrap();
/// assert!((linalg::det(&a).unwrap() - 7.0).abs() < 1e-10);
/// ```
pub fn det<T: Float>(a: &Matrix<T>) -> Result<T> {
    lu(a).det()
}
