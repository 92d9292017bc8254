//! Array-backed vector storage.

use core::ops::Range;

use crate::Float;
use crate::matrix::Matrix;

use super::{Vector, VectorOps};

/// A vector that physically stores every index.
///
/// A thin wrapper over `Vec<T>`; all operations are direct index
/// arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseVector<T: Float> {
    data: Vec<T>,
}

impl<T: Float> DenseVector<T> {
    /// A zero vector of length `len`.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }

    /// Adopt `data` as the vector's storage without copying.
    #[inline]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the vector and return the underlying `Vec<T>`.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Float> VectorOps<T> for DenseVector<T> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn nnz(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> T {
        self.data[idx]
    }

    #[inline]
    fn set(&mut self, idx: usize, value: T) {
        self.data[idx] = value;
    }

    fn to_dense(&self) -> Vec<T> {
        self.data.clone()
    }

    fn dot(&self, other: &Vector<T>, range: Range<usize>) -> T {
        // A sparse operand with fewer stored slots walks its own entries
        // and gathers from us instead of us scanning its zeros.
        if let Vector::Sparse(sparse) = other {
            if sparse.nnz() < self.nnz() {
                return sparse.dot_gather(self, range);
            }
        }

        let mut acc = T::zero();
        for i in range {
            acc += self.data[i] * other.get(i);
        }
        acc
    }

    fn scale_range(&mut self, scale: T, range: Range<usize>) {
        for v in &mut self.data[range] {
            *v *= scale;
        }
    }

    fn transpose_into_column(&self, target: &mut Matrix<T>, col: usize) {
        for (i, &v) in self.data.iter().enumerate() {
            target.set(i, col, v);
        }
    }
}
