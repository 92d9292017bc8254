//! Row-major matrix over [`Vector`] rows.
//!
//! A [`Matrix`] owns `nrows` row vectors of logical length `ncols`, all in
//! the same [`Storage`]. The two ways of reaching into a matrix have
//! different ownership on purpose:
//!
//! - [`Matrix::row`] / [`Matrix::row_mut`] borrow the live row. Writes
//!   through `row_mut` are writes to the matrix.
//! - [`Matrix::column`] materializes an owned copy. Writes to it never
//!   reach the matrix.
//!
//! The factorizations rely on exactly this split: they update a column
//! snapshot and the live rows side by side.

mod display;

use crate::Float;
use crate::array;
use crate::error::{CoreError, Result};
use crate::vector::{DenseVector, Storage, Vector, VectorOps};

/// A dense- or sparse-row matrix.
///
/// Dimensions are fixed at construction. Cloning performs a deep copy of
/// every row.
#[derive(Debug, Clone)]
pub struct Matrix<T: Float> {
    rows: Vec<Vector<T>>,
    nrows: usize,
    ncols: usize,
    storage: Storage,
}

impl<T: Float> Matrix<T> {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// An all-zero `nrows x ncols` matrix with rows in `storage`.
    pub fn new(nrows: usize, ncols: usize, storage: Storage) -> Self {
        Self {
            rows: (0..nrows).map(|_| storage.zeros(ncols)).collect(),
            nrows,
            ncols,
            storage,
        }
    }

    /// Like [`Matrix::new`], decoding the storage from a bit-flag options
    /// word (see [`Storage::from_flags`]).
    pub fn with_flags(nrows: usize, ncols: usize, flags: u32) -> Self {
        Self::new(nrows, ncols, Storage::from_flags(flags))
    }

    /// The `n x n` identity.
    pub fn identity(n: usize, storage: Storage) -> Self {
        let mut m = Self::new(n, n, storage);
        for i in 0..n {
            m.set(i, i, T::one());
        }
        m
    }

    /// Build an `nrows x ncols` matrix from `f(i, j)`.
    pub fn from_fn<F>(nrows: usize, ncols: usize, storage: Storage, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut m = Self::new(nrows, ncols, storage);
        for i in 0..nrows {
            for j in 0..ncols {
                m.set(i, j, f(i, j));
            }
        }
        m
    }

    /// Adopt row buffers as dense rows. The buffers move into the matrix
    /// without being copied.
    ///
    /// Every row must have the same length, and there must be at least
    /// one row.
    ///
    /// ```
    /// # use sparsela_core::matrix::Matrix;
    /// let m = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    /// assert!(Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0]]).is_err());
    /// assert!(Matrix::<f64>::from_rows(Vec::new()).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(CoreError::InvalidArgument {
                reason: "cannot build a matrix from zero rows",
            });
        };
        let ncols = first.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
            return Err(CoreError::DimensionMismatch {
                expected: vec![ncols],
                got: vec![bad.len()],
            });
        }
        let nrows = rows.len();
        Ok(Self {
            rows: rows
                .into_iter()
                .map(|r| Vector::Dense(DenseVector::from_vec(r)))
                .collect(),
            nrows,
            ncols,
            storage: Storage::Dense,
        })
    }

    /// Copy the matrix into freshly allocated rows of another storage.
    pub fn to_storage(&self, storage: Storage) -> Self {
        if storage == self.storage {
            return self.clone();
        }
        Self {
            rows: self
                .rows
                .iter()
                .map(|r| Vector::from_values(&r.to_dense(), storage))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            storage,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Storage of every row.
    #[inline]
    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Total stored slots across all rows.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(VectorOps::nnz).sum()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.rows[row].get(col)
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.rows[row].set(col, value);
    }

    /// Borrow row `row`.
    #[inline]
    pub fn row(&self, row: usize) -> &Vector<T> {
        &self.rows[row]
    }

    /// Mutably borrow row `row`. This is a live view: changes are changes
    /// to the matrix.
    ///
    /// The row can only be edited in place. It cannot be replaced by a
    /// vector of another length or storage:
    ///
    /// ```compile_fail
    /// # use sparsela_core::prelude::*;
    /// let mut m = Matrix::<f64>::new(2, 3, Storage::Dense);
    /// *m.row_mut(0) = Vector::zeros(5, Storage::Sparse);
    /// ```
    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut dyn VectorOps<T> {
        &mut self.rows[row]
    }

    /// An owned copy of column `col`, in this matrix's storage. Changes to
    /// the returned vector do not affect the matrix.
    pub fn column(&self, col: usize) -> Vector<T> {
        let mut out = self.storage.zeros(self.nrows);
        for (i, row) in self.rows.iter().enumerate() {
            out.set(i, row.get(col));
        }
        out
    }

    /// Dense copy of the contents as one `Vec` per row.
    pub fn to_arrays(&self) -> Vec<Vec<T>> {
        self.rows.iter().map(VectorOps::to_dense).collect()
    }

    // ------------------------------------------------------------------
    // Elementary operations
    // ------------------------------------------------------------------

    /// `self[row, col] *= scale`.
    #[inline]
    pub fn scale_entry(&mut self, row: usize, col: usize, scale: T) {
        self.rows[row].scale_range(scale, col..col + 1);
    }

    /// `self[row, col] += delta`.
    #[inline]
    pub fn add_entry(&mut self, row: usize, col: usize, delta: T) {
        self.rows[row].add_at(col, delta);
    }

    /// Exchange rows `a` and `b`. Only the row handles move.
    #[inline]
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// The `ncols x nrows` transpose, in the same storage.
    pub fn transpose(&self) -> Self {
        let mut out = Self::new(self.ncols, self.nrows, self.storage);
        for (i, row) in self.rows.iter().enumerate() {
            row.transpose_into_column(&mut out, i);
        }
        out
    }

    /// Matrix product `self * rhs` as a dense matrix.
    ///
    /// Returns an error if `self.ncols() != rhs.nrows()`.
    pub fn matmul(&self, rhs: &Self) -> Result<Self> {
        if self.ncols != rhs.nrows {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.ncols],
                got: vec![rhs.nrows],
            });
        }
        if self.nrows == 0 || self.ncols == 0 || rhs.ncols == 0 {
            return Ok(Self::new(self.nrows, rhs.ncols, Storage::Dense));
        }
        let product = array::matrix_ab(&self.to_arrays(), &rhs.to_arrays())?;
        Self::from_rows(product)
    }
}
