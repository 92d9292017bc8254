//! LU decomposition with optional partial pivoting.
//!
//! For an `m x n` matrix `A` (`m >= n` for the usual triangular split),
//! produces a unit lower triangular `L` (`m x n`), an upper triangular
//! `U` (`n x n`) and a row permutation `piv` such that `A[piv, :] = L U`.
//!
//! The factorization always exists, so construction never fails, even for
//! singular or rank-deficient input. A zero pivot leaves that column's
//! multipliers untouched; callers detect singularity by looking for a zero
//! on the diagonal of [`LuDecomposition::u`].

use crate::Float;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;
use crate::tic::Tic;
use crate::vector::{Storage, VectorOps};

/// Columns above which per-column progress is logged at `debug` level.
pub(crate) const PROGRESS_THRESHOLD: usize = 1000;

/// Result of an LU decomposition.
///
/// `L` and `U` are packed into one working matrix in the input's storage:
/// the strictly lower part holds the multipliers of `L` (its unit diagonal
/// is implicit), the diagonal and above hold `U`.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T: Float> {
    lu: Matrix<T>,
    /// `pivots[i]` is the original row now at position `i`.
    pivots: Vec<usize>,
    /// +1 or -1: parity of the row exchanges.
    sign: i32,
}

impl<T: Float> LuDecomposition<T> {
    /// Factor `a`, with partial pivoting if `pivot` is set.
    ///
    /// Column-oriented Crout sweep: for each column `j` a snapshot of the
    /// column is updated together with the live rows, so the elimination
    /// for every row happens in one pass over the dot products.
    ///
    /// ```
    /// # use sparsela_core::matrix::Matrix;
    /// # use sparsela_core::linalg::LuDecomposition;
    /// let a = Matrix::from_rows(vec![vec![2.0_f64, 1.0], vec![1.0, 4.0]]).unwrap();
    /// let lu = LuDecomposition::new(&a, true);
    /// assert!((lu.det().unwrap() - 7.0).abs() < 1e-10);
    /// ```
    pub fn new(a: &Matrix<T>, pivot: bool) -> Self {
        let timer = Tic::new();
        let mut lu = a.clone();
        let (m, n) = lu.shape();
        let mut pivots: Vec<usize> = (0..m).collect();
        let mut sign = 1;
        let mut swaps = 0usize;

        for j in 0..n {
            if n > PROGRESS_THRESHOLD {
                log::debug!("LU column {j} / {n}");
            }

            let mut col_j = lu.column(j);

            // Apply previous transformations. Most of the time goes into
            // this dot product.
            for i in 0..m {
                let row_i = lu.row_mut(i);
                let s = row_i.dot(&col_j, 0..i.min(j));
                col_j.add_at(i, -s);
                row_i.add_at(j, -s);
            }

            let mut p = j;
            if pivot {
                for i in (j + 1)..m {
                    if col_j.get(i).abs() > col_j.get(p).abs() {
                        p = i;
                    }
                }
            }

            if p != j {
                lu.swap_rows(p, j);
                pivots.swap(p, j);
                sign = -sign;
                swaps += 1;
            }

            // Compute multipliers.
            if j < m {
                let ljj = lu.get(j, j);
                if !ljj.is_zero() {
                    let inv = T::one() / ljj;
                    for i in (j + 1)..m {
                        lu.scale_entry(i, j, inv);
                    }
                }
            }
        }

        log::trace!(
            "LU {m}x{n} ({:?}, pivot={pivot}): {swaps} row swaps, {} stored slots, {:.3}s",
            lu.storage(),
            lu.nnz(),
            timer.toc()
        );

        Self { lu, pivots, sign }
    }

    /// Number of rows of the factored matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.lu.nrows()
    }

    /// Number of columns of the factored matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.lu.ncols()
    }

    /// The unit lower triangular factor `L` (`m x n`).
    pub fn l(&self) -> Matrix<T> {
        let (m, n) = self.lu.shape();
        let mut l = Matrix::new(m, n, self.lu.storage());
        for i in 0..m {
            for j in 0..n.min(i + 1) {
                if i == j {
                    l.set(i, j, T::one());
                } else {
                    l.set(i, j, self.lu.get(i, j));
                }
            }
        }
        l
    }

    /// The upper triangular factor `U` (`n x n`).
    pub fn u(&self) -> Matrix<T> {
        let (m, n) = self.lu.shape();
        let mut u = Matrix::new(n, n, self.lu.storage());
        for i in 0..m.min(n) {
            for j in i..n {
                u.set(i, j, self.lu.get(i, j));
            }
        }
        u
    }

    /// The packed working matrix: multipliers of `L` strictly below the
    /// diagonal, `U` on and above it.
    #[inline]
    pub fn packed(&self) -> &Matrix<T> {
        &self.lu
    }

    /// The row permutation: `pivots()[i]` is the original row now at `i`.
    #[inline]
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// +1 for an even number of row exchanges, -1 for odd.
    #[inline]
    pub fn pivot_sign(&self) -> i32 {
        self.sign
    }

    /// The permutation as an `m x m` dense matrix `P`, so that
    /// `P A = L U`.
    pub fn permutation_matrix(&self) -> Matrix<T> {
        let m = self.pivots.len();
        let mut p = Matrix::new(m, m, Storage::Dense);
        for (i, &pi) in self.pivots.iter().enumerate() {
            p.set(i, pi, T::one());
        }
        p
    }

    /// Determinant of a square input: `sign * prod(diag(U))`.
    ///
    /// Returns an error if the factored matrix is not square.
    pub fn det(&self) -> Result<T> {
        let (m, n) = self.lu.shape();
        if m != n {
            return Err(CoreError::InvalidArgument {
                reason: "determinant requires a square matrix",
            });
        }
        let mut d = if self.sign < 0 { -T::one() } else { T::one() };
        for j in 0..n {
            d *= self.lu.get(j, j);
        }
        Ok(d)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const STORAGES: [Storage; 2] = [Storage::Dense, Storage::Sparse];

    fn mat(rows: &[&[f64]], storage: Storage) -> Matrix<f64> {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect())
            .unwrap()
            .to_storage(storage)
    }

    fn approx_eq(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64) -> bool {
        a.shape() == b.shape()
            && a.to_arrays()
                .iter()
                .flatten()
                .zip(b.to_arrays().iter().flatten())
                .all(|(&x, &y)| (x - y).abs() < tol)
    }

    /// `A[piv, :]` as a dense matrix.
    fn permute_rows(a: &Matrix<f64>, piv: &[usize]) -> Matrix<f64> {
        let rows = a.to_arrays();
        Matrix::from_rows(piv.iter().map(|&p| rows[p].clone()).collect()).unwrap()
    }

    fn assert_factors(a: &Matrix<f64>, lu: &LuDecomposition<f64>, tol: f64) {
        let l = lu.l();
        let u = lu.u();
        let (m, n) = a.shape();
        for i in 0..m {
            for j in 0..n {
                if i == j {
                    assert_eq!(l.get(i, j), 1.0);
                } else if j > i {
                    assert_eq!(l.get(i, j), 0.0);
                }
            }
        }
        for i in 0..n {
            for j in 0..i {
                assert_eq!(u.get(i, j), 0.0);
            }
        }
        let pa = permute_rows(a, lu.pivots());
        assert!(approx_eq(&pa, &l.matmul(&u).unwrap(), tol));
        let p = lu.permutation_matrix();
        assert!(approx_eq(&p.matmul(a).unwrap(), &pa, tol));
    }

    #[test]
    fn test_lu_2x2_no_pivot() {
        for storage in STORAGES {
            let a = mat(&[&[4.0, 3.0], &[6.0, 3.0]], storage);
            let lu = LuDecomposition::new(&a, false);
            assert_eq!(lu.pivots(), &[0, 1]);
            assert_eq!(lu.pivot_sign(), 1);
            assert_eq!(lu.l().to_arrays(), vec![vec![1.0, 0.0], vec![1.5, 1.0]]);
            assert_eq!(lu.u().to_arrays(), vec![vec![4.0, 3.0], vec![0.0, -1.5]]);
        }
    }

    #[test]
    fn test_lu_2x2_pivot() {
        for storage in STORAGES {
            let a = mat(&[&[4.0, 3.0], &[6.0, 3.0]], storage);
            let lu = LuDecomposition::new(&a, true);
            assert_eq!(lu.pivots(), &[1, 0]);
            assert_eq!(lu.pivot_sign(), -1);
            assert_factors(&a, &lu, 1e-12);
            assert!((lu.det().unwrap() - (-6.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_lu_3x3() {
        for storage in STORAGES {
            let a = mat(&[&[2.0, 1.0, 1.0], &[4.0, 3.0, 3.0], &[8.0, 7.0, 9.0]], storage);
            let lu = LuDecomposition::new(&a, true);
            assert_factors(&a, &lu, 1e-12);
        }
    }

    #[test]
    fn test_det_3x3() {
        // >>> np.linalg.det([[6,1,1],[4,-2,5],[2,8,7]])
        // -306.0
        for storage in STORAGES {
            let a = mat(&[&[6.0, 1.0, 1.0], &[4.0, -2.0, 5.0], &[2.0, 8.0, 7.0]], storage);
            let lu = LuDecomposition::new(&a, true);
            assert!((lu.det().unwrap() - (-306.0)).abs() < 1e-10);
        }
    }

    #[test]
    fn test_lu_4x4() {
        // >>> np.linalg.det([[1,2,3,4],[5,6,7,8],[2,6,4,8],[3,1,1,2]])
        // 72.0
        for storage in STORAGES {
            let a = mat(
                &[
                    &[1.0, 2.0, 3.0, 4.0],
                    &[5.0, 6.0, 7.0, 8.0],
                    &[2.0, 6.0, 4.0, 8.0],
                    &[3.0, 1.0, 1.0, 2.0],
                ],
                storage,
            );
            let lu = LuDecomposition::new(&a, true);
            assert_factors(&a, &lu, 1e-10);
            assert!((lu.det().unwrap() - 72.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_identity() {
        for storage in STORAGES {
            let eye = Matrix::<f64>::identity(5, storage);
            let lu = LuDecomposition::new(&eye, true);
            assert_eq!(lu.pivots(), &[0, 1, 2, 3, 4]);
            assert_eq!(lu.det().unwrap(), 1.0);
            assert_eq!(lu.u().to_arrays(), eye.to_arrays());
        }
    }

    #[test]
    fn test_zero_row_gives_zero_pivot() {
        for storage in STORAGES {
            let a = mat(&[&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0], &[4.0, 5.0, 6.0]], storage);
            let lu = LuDecomposition::new(&a, true);
            let u = lu.u();
            assert!((0..3).any(|i| u.get(i, i) == 0.0));
            assert_eq!(lu.det().unwrap(), 0.0);
            assert_factors(&a, &lu, 1e-12);
        }
    }

    #[test]
    fn test_zero_column_gives_zero_pivot() {
        for storage in STORAGES {
            let a = mat(&[&[1.0, 0.0, 2.0], &[3.0, 0.0, 4.0], &[5.0, 0.0, 7.0]], storage);
            let lu = LuDecomposition::new(&a, true);
            assert_eq!(lu.u().get(1, 1), 0.0);
            assert_factors(&a, &lu, 1e-12);
        }
    }

    #[test]
    fn test_no_pivot_zero_leading_entry_does_not_fail() {
        // Without pivoting the first pivot is zero; the factorization
        // still completes and U shows the zero.
        let a = mat(&[&[0.0, 1.0], &[1.0, 0.0]], Storage::Dense);
        let lu = LuDecomposition::new(&a, false);
        assert_eq!(lu.u().get(0, 0), 0.0);
        assert_eq!(lu.pivot_sign(), 1);
    }

    #[test]
    fn test_tall_matrix() {
        for storage in STORAGES {
            let a = mat(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]], storage);
            let lu = LuDecomposition::new(&a, true);
            assert_eq!(lu.l().shape(), (3, 2));
            assert_eq!(lu.u().shape(), (2, 2));
            assert_factors(&a, &lu, 1e-12);
            assert!(lu.det().is_err());
        }
    }

    #[test]
    fn test_input_not_modified() {
        for storage in STORAGES {
            let a = mat(&[&[1.0, 2.0], &[3.0, 4.0]], storage);
            let before = a.to_arrays();
            let _ = LuDecomposition::new(&a, true);
            assert_eq!(a.to_arrays(), before);
        }
    }

    #[test]
    fn test_factors_keep_storage() {
        let a = mat(&[&[1.0, 2.0], &[3.0, 4.0]], Storage::Sparse);
        let lu = LuDecomposition::new(&a, true);
        assert_eq!(lu.packed().storage(), Storage::Sparse);
        assert_eq!(lu.l().storage(), Storage::Sparse);
        assert_eq!(lu.u().storage(), Storage::Sparse);
    }
}
