//! QR decomposition via Householder reflections.
//!
//! For an `m x n` matrix `A` with `m >= n`, produces an `m x n` matrix `Q`
//! with orthonormal columns and an `n x n` upper triangular `R` such that
//! `A = Q R`.
//!
//! The factorization always exists, so construction never fails, even for
//! rank-deficient input. A column whose remaining norm is zero is skipped
//! and leaves a zero in [`QrDecomposition::r_diag`]; callers inspect that
//! to detect rank deficiency.

use crate::Float;
use crate::matrix::Matrix;
use crate::tic::Tic;
use crate::vector::Storage;

use super::lu::PROGRESS_THRESHOLD;

/// Result of a Householder QR decomposition.
#[derive(Debug, Clone)]
pub struct QrDecomposition<T: Float> {
    /// Working matrix: Householder vectors on and below the diagonal,
    /// the strictly upper part of `R` above it.
    qr: Matrix<T>,
    /// Diagonal of `R`, kept apart because the packed diagonal holds the
    /// leading entries of the Householder vectors.
    r_diag: Vec<T>,
}

impl<T: Float> QrDecomposition<T> {
    /// Factor `a`.
    ///
    /// ```
    /// # use sparsela_core::matrix::Matrix;
    /// # use sparsela_core::linalg::QrDecomposition;
    /// let a = Matrix::from_rows(vec![
    ///     vec![1.0_f64, 2.0],
    ///     vec![3.0, 4.0],
    ///     vec![5.0, 6.0],
    /// ]).unwrap();
    /// let qr = QrDecomposition::new(&a);
    /// let q = qr.q();
    /// // Q^T Q ≈ I
    /// let qtq = q.transpose().matmul(&q).unwrap();
    /// for i in 0..2 {
    ///     for j in 0..2 {
    ///         let expected = if i == j { 1.0 } else { 0.0 };
    ///         assert!((qtq.get(i, j) - expected).abs() < 1e-10);
    ///     }
    /// }
    /// ```
    #[allow(clippy::many_single_char_names)]
    pub fn new(a: &Matrix<T>) -> Self {
        let timer = Tic::new();
        let mut qr = a.clone();
        let (m, n) = qr.shape();
        let mut r_diag = vec![T::zero(); n];
        let mut deficient = 0usize;

        for k in 0..n {
            if n > PROGRESS_THRESHOLD {
                log::debug!("QR column {k} / {n}");
            }

            let mut nrm = T::zero();
            for i in k..m {
                let v = qr.get(i, k);
                nrm += v * v;
            }
            nrm = nrm.sqrt();

            if nrm.is_zero() {
                deficient += 1;
            } else {
                // Form the k-th Householder vector. The sign of the norm
                // follows the diagonal to avoid cancellation.
                if qr.get(k, k) < T::zero() {
                    nrm = -nrm;
                }
                let inv = T::one() / nrm;
                for i in k..m {
                    qr.scale_entry(i, k, inv);
                }
                qr.add_entry(k, k, T::one());

                // Apply the reflection to the remaining columns.
                let vkk = qr.get(k, k);
                for j in (k + 1)..n {
                    let mut s = T::zero();
                    for i in k..m {
                        s += qr.get(i, k) * qr.get(i, j);
                    }
                    s = -s / vkk;
                    for i in k..m {
                        let v = qr.get(i, k);
                        qr.add_entry(i, j, s * v);
                    }
                }
            }
            r_diag[k] = -nrm;
        }

        log::trace!(
            "QR {m}x{n} ({:?}): {deficient} zero-norm columns, {:.3}s",
            qr.storage(),
            timer.toc()
        );

        Self { qr, r_diag }
    }

    /// Number of rows of the factored matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.qr.nrows()
    }

    /// Number of columns of the factored matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.qr.ncols()
    }

    /// Diagonal of `R`. A zero entry marks a column that was linearly
    /// dependent on the ones before it.
    #[inline]
    pub fn r_diag(&self) -> &[T] {
        &self.r_diag
    }

    /// The orthogonal factor `Q` (`m x n`, dense).
    ///
    /// Built by applying the stored reflections in reverse column order to
    /// the leading identity columns.
    pub fn q(&self) -> Matrix<T> {
        let (m, n) = self.qr.shape();
        let mut q = Matrix::new(m, n, Storage::Dense);

        for k in (0..n.min(m)).rev() {
            q.set(k, k, T::one());

            let vkk = self.qr.get(k, k);
            if vkk.is_zero() {
                continue;
            }
            for j in k..n {
                let mut s = T::zero();
                for i in k..m {
                    s += self.qr.get(i, k) * q.get(i, j);
                }
                s = -s / vkk;
                for i in k..m {
                    q.add_entry(i, j, s * self.qr.get(i, k));
                }
            }
        }
        q
    }

    /// The upper triangular factor `R` (`n x n`), with
    /// [`r_diag`](Self::r_diag) on its diagonal.
    pub fn r(&self) -> Matrix<T> {
        let n = self.qr.ncols();
        let mut r = Matrix::new(n, n, self.qr.storage());
        for i in 0..n {
            r.set(i, i, self.r_diag[i]);
            for j in (i + 1)..n {
                r.set(i, j, self.qr.get(i, j));
            }
        }
        r
    }

    /// The Householder vectors: the lower trapezoidal part of the working
    /// matrix (`m x n`), column `k` holding the `k`-th reflection.
    pub fn householder(&self) -> Matrix<T> {
        let (m, n) = self.qr.shape();
        let mut h = Matrix::new(m, n, self.qr.storage());
        for i in 0..m {
            for j in 0..n.min(i + 1) {
                h.set(i, j, self.qr.get(i, j));
            }
        }
        h
    }
}
