//! Row and column vectors with interchangeable storage.
//!
//! Every vector has a fixed logical length and maps an index to a value;
//! indices that are not stored read as zero. Two storage kinds implement
//! the same contract, [`VectorOps`]:
//!
//! | Storage  | Type              | `nnz()`            | Access cost            |
//! |----------|-------------------|--------------------|------------------------|
//! | Dense    | [`DenseVector`]   | logical length     | O(1)                   |
//! | Sparse   | [`SparseVector`]  | stored pairs       | amortized O(1) in order|
//!
//! [`Vector`] is the sum of the two. Matrices hold rows of one kind, and
//! the factorizations in [`crate::linalg`] only ever call [`VectorOps`]
//! methods on it, so they run unchanged on either storage.
//!
//! Index ranges are half-open: `dot(&other, 2..5)` sums indices 2, 3
//! and 4.

mod dense;
mod sparse;

pub use dense::DenseVector;
pub use sparse::{MIN_CAPACITY, SparseVector};

use core::ops::Range;

use crate::Float;
use crate::matrix::Matrix;

/// Physical storage used for the rows of a matrix and the vectors it
/// hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Storage {
    /// Every index physically stored.
    #[default]
    Dense,
    /// Sorted `(index, value)` pairs; unstored indices are zero.
    Sparse,
}

impl Storage {
    /// Bit flag selecting sparse storage in [`Storage::from_flags`].
    pub const SPARSE: u32 = 1;

    /// Decode a bit-flag options word: bit [`Storage::SPARSE`] set selects
    /// sparse storage, anything else is dense.
    ///
    /// ```
    /// # use sparsela_core::vector::Storage;
    /// assert_eq!(Storage::from_flags(0), Storage::Dense);
    /// assert_eq!(Storage::from_flags(Storage::SPARSE), Storage::Sparse);
    /// ```
    #[inline]
    pub fn from_flags(flags: u32) -> Self {
        if flags & Self::SPARSE == 0 {
            Self::Dense
        } else {
            Self::Sparse
        }
    }

    /// The bit-flag options word for this storage.
    #[inline]
    pub fn flags(self) -> u32 {
        match self {
            Self::Dense => 0,
            Self::Sparse => Self::SPARSE,
        }
    }

    /// A zero vector of logical length `len` in this storage.
    pub fn zeros<T: Float>(self, len: usize) -> Vector<T> {
        match self {
            Self::Dense => Vector::Dense(DenseVector::zeros(len)),
            Self::Sparse => Vector::Sparse(SparseVector::new(len)),
        }
    }
}

/// The capability set shared by every vector storage.
///
/// Out-of-range indices passed to [`get`](Self::get), [`set`](Self::set)
/// or [`add_at`](Self::add_at) are a caller bug and panic. No operation
/// changes the logical length.
pub trait VectorOps<T: Float> {
    /// Logical length.
    fn len(&self) -> usize;

    /// Whether the logical length is zero.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of physically stored slots.
    ///
    /// For dense storage this is the length. For sparse storage it counts
    /// stored pairs, which may include explicit zeros (see
    /// [`SparseVector`]).
    fn nnz(&self) -> usize;

    /// Value at `idx`, zero if not stored.
    fn get(&self, idx: usize) -> T;

    /// Store `value` at `idx`.
    fn set(&mut self, idx: usize, value: T);

    /// Dense snapshot of the logical contents.
    fn to_dense(&self) -> Vec<T>;

    /// Sum of `self[i] * other[i]` for `i` in `range`.
    fn dot(&self, other: &Vector<T>, range: Range<usize>) -> T;

    /// Multiply every entry with index in `range` by `scale`.
    fn scale_range(&mut self, scale: T, range: Range<usize>);

    /// `self[idx] += delta`.
    #[inline]
    fn add_at(&mut self, idx: usize, delta: T) {
        let current = self.get(idx);
        self.set(idx, current + delta);
    }

    /// Write this vector into column `col` of `target`, which must have
    /// `self.len()` rows and start with that column all zero.
    fn transpose_into_column(&self, target: &mut Matrix<T>, col: usize);
}

/// A vector in either storage.
#[derive(Debug, Clone)]
pub enum Vector<T: Float> {
    Dense(DenseVector<T>),
    Sparse(SparseVector<T>),
}

impl<T: Float> Vector<T> {
    /// A zero vector of logical length `len`.
    #[inline]
    pub fn zeros(len: usize, storage: Storage) -> Self {
        storage.zeros(len)
    }

    /// Build a vector in `storage` holding `values`. Sparse storage keeps
    /// only the non-zero entries.
    pub fn from_values(values: &[T], storage: Storage) -> Self {
        match storage {
            Storage::Dense => Self::Dense(DenseVector::from_vec(values.to_vec())),
            Storage::Sparse => Self::Sparse(SparseVector::from_dense(values)),
        }
    }

    /// The storage kind of this vector.
    #[inline]
    pub fn storage(&self) -> Storage {
        match self {
            Self::Dense(_) => Storage::Dense,
            Self::Sparse(_) => Storage::Sparse,
        }
    }
}

impl<T: Float> From<DenseVector<T>> for Vector<T> {
    fn from(v: DenseVector<T>) -> Self {
        Self::Dense(v)
    }
}

impl<T: Float> From<SparseVector<T>> for Vector<T> {
    fn from(v: SparseVector<T>) -> Self {
        Self::Sparse(v)
    }
}

impl<T: Float> VectorOps<T> for Vector<T> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            Self::Dense(v) => v.len(),
            Self::Sparse(v) => v.len(),
        }
    }

    #[inline]
    fn nnz(&self) -> usize {
        match self {
            Self::Dense(v) => v.nnz(),
            Self::Sparse(v) => v.nnz(),
        }
    }

    #[inline]
    fn get(&self, idx: usize) -> T {
        match self {
            Self::Dense(v) => v.get(idx),
            Self::Sparse(v) => v.get(idx),
        }
    }

    #[inline]
    fn set(&mut self, idx: usize, value: T) {
        match self {
            Self::Dense(v) => v.set(idx, value),
            Self::Sparse(v) => v.set(idx, value),
        }
    }

    fn to_dense(&self) -> Vec<T> {
        match self {
            Self::Dense(v) => v.to_dense(),
            Self::Sparse(v) => v.to_dense(),
        }
    }

    #[inline]
    fn dot(&self, other: &Vector<T>, range: Range<usize>) -> T {
        match self {
            Self::Dense(v) => v.dot(other, range),
            Self::Sparse(v) => v.dot(other, range),
        }
    }

    #[inline]
    fn scale_range(&mut self, scale: T, range: Range<usize>) {
        match self {
            Self::Dense(v) => v.scale_range(scale, range),
            Self::Sparse(v) => v.scale_range(scale, range),
        }
    }

    #[inline]
    fn add_at(&mut self, idx: usize, delta: T) {
        match self {
            Self::Dense(v) => v.add_at(idx, delta),
            Self::Sparse(v) => v.add_at(idx, delta),
        }
    }

    fn transpose_into_column(&self, target: &mut Matrix<T>, col: usize) {
        match self {
            Self::Dense(v) => v.transpose_into_column(target, col),
            Self::Sparse(v) => v.transpose_into_column(target, col),
        }
    }
}
