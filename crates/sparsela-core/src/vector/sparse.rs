//! Sorted index/value pair storage with cursor-accelerated access.
//!
//! Entries live in two parallel buffers, `indices` and `values`, whose
//! first `nz` slots are valid and sorted strictly ascending by index.
//! The remainder of each buffer is spare capacity; it doubles whenever an
//! insertion finds it exhausted.
//!
//! Lookups remember where the previous lookup ended and scan linearly
//! from there, so in-order sweeps (the access pattern of the LU and QR
//! inner loops) cost amortized O(1) per element instead of a fresh search
//! each time.

use core::cell::Cell;
use core::fmt;
use core::ops::Range;

use crate::Float;
use crate::matrix::Matrix;

use super::{Vector, VectorOps};

/// Capacity of a freshly created sparse vector.
pub const MIN_CAPACITY: usize = 16;

/// A vector storing only `(index, value)` pairs; unstored indices are zero.
///
/// # Stored zeros
///
/// [`set`](VectorOps::set) never materializes a *new* zero entry, but
/// setting an index that is already stored to zero overwrites it in place
/// and keeps the slot. [`nnz`](VectorOps::nnz) therefore counts stored
/// slots, which can exceed the number of non-zero values. There is no
/// compaction.
///
/// # Not thread safe, not reentrant
///
/// `get` moves a search cursor through interior mutability, so even a
/// shared `&SparseVector` mutates on read. The cursor is a [`Cell`], which
/// makes the type `!Sync`: it cannot be shared between threads. Cursor
/// positions are hints only and never change logical contents.
#[derive(Clone)]
pub struct SparseVector<T: Float> {
    len: usize,
    indices: Vec<usize>,
    values: Vec<T>,
    nz: usize,
    get_cursor: Cell<usize>,
    set_cursor: usize,
}

impl<T: Float> SparseVector<T> {
    /// An all-zero vector of logical length `len` with
    /// [`MIN_CAPACITY`] slots reserved.
    pub fn new(len: usize) -> Self {
        Self::with_capacity(len, MIN_CAPACITY)
    }

    /// An all-zero vector with room for `capacity` pairs before growing.
    /// A capacity of zero is bumped to one so that doubling makes progress.
    pub fn with_capacity(len: usize, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            len,
            indices: vec![0; capacity],
            values: vec![T::zero(); capacity],
            nz: 0,
            get_cursor: Cell::new(0),
            set_cursor: 0,
        }
    }

    /// Build from a dense slice, storing only non-zero entries.
    pub fn from_dense(values: &[T]) -> Self {
        let nonzeros = values.iter().filter(|v| !v.is_zero()).count();
        let mut v = Self::with_capacity(values.len(), nonzeros.max(MIN_CAPACITY));
        for (i, &x) in values.iter().enumerate() {
            if !x.is_zero() {
                v.indices[v.nz] = i;
                v.values[v.nz] = x;
                v.nz += 1;
            }
        }
        v
    }

    /// Number of pairs the buffers can hold before the next growth.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.indices.len()
    }

    /// Stored indices, strictly ascending.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices[..self.nz]
    }

    /// Stored values, parallel to [`indices`](Self::indices).
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values[..self.nz]
    }

    /// Iterate the stored `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices().iter().copied().zip(self.values().iter().copied())
    }

    // ------------------------------------------------------------------
    // Storage maintenance
    // ------------------------------------------------------------------

    /// Place `(idx, value)` at `pos`, shifting later pairs right.
    ///
    /// `pos` must be the sorted slot for `idx` and `idx` must not already
    /// be stored. A zero `value` is dropped.
    fn insert(&mut self, pos: usize, idx: usize, value: T) {
        if value.is_zero() {
            return;
        }
        if self.nz == self.capacity() {
            self.grow();
        }

        self.indices.copy_within(pos..self.nz, pos + 1);
        self.values.copy_within(pos..self.nz, pos + 1);
        self.indices[pos] = idx;
        self.values[pos] = value;
        self.nz += 1;
    }

    /// Double the capacity, saturating at `usize::MAX`.
    fn grow(&mut self) {
        let capacity = self.capacity().saturating_mul(2);
        log::trace!(
            "sparse vector (len {}) growing {} -> {capacity} slots",
            self.len,
            self.capacity()
        );
        self.indices.resize(capacity, 0);
        self.values.resize(capacity, T::zero());
    }

    /// First stored position whose index is `>= idx`.
    #[inline]
    fn lower_bound(&self, idx: usize) -> usize {
        self.indices().partition_point(|&i| i < idx)
    }

    #[inline]
    fn check_index(&self, idx: usize) {
        assert!(
            idx < self.len,
            "index {idx} out of bounds for sparse vector of length {}",
            self.len
        );
    }

    #[inline]
    fn check_range(&self, range: &Range<usize>) {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "range {range:?} out of bounds for sparse vector of length {}",
            self.len
        );
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// Walk our own entries inside `range` and gather the matching values
    /// from `other`. Cost is proportional to our stored entries in range.
    pub(super) fn dot_gather<V: VectorOps<T>>(&self, other: &V, range: Range<usize>) -> T {
        self.check_range(&range);
        let start = self.lower_bound(range.start);
        let mut acc = T::zero();
        for (idx, v) in self.iter().skip(start) {
            if idx >= range.end {
                break;
            }
            acc += v * other.get(idx);
        }
        acc
    }

    /// Merge walk over two sorted index lists restricted to `range`.
    fn dot_merge(&self, other: &Self, range: Range<usize>) -> T {
        self.check_range(&range);
        other.check_range(&range);
        let (a_idx, a_val) = (self.indices(), self.values());
        let (b_idx, b_val) = (other.indices(), other.values());

        let mut a = self.lower_bound(range.start);
        let mut b = other.lower_bound(range.start);
        let mut acc = T::zero();

        while a < a_idx.len() && b < b_idx.len() {
            let (ai, bi) = (a_idx[a], b_idx[b]);
            if ai >= range.end || bi >= range.end {
                break;
            }
            if ai == bi {
                acc += a_val[a] * b_val[b];
                a += 1;
                b += 1;
            } else if ai < bi {
                a += 1;
            } else {
                b += 1;
            }
        }
        acc
    }
}

impl<T: Float> VectorOps<T> for SparseVector<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn nnz(&self) -> usize {
        self.nz
    }

    fn get(&self, idx: usize) -> T {
        self.check_index(idx);
        if self.nz == 0 {
            return T::zero();
        }

        let mut c = self.get_cursor.get();
        if c >= self.nz {
            c = self.nz / 2;
        }

        if self.indices[c] < idx {
            while c + 1 < self.nz && self.indices[c + 1] <= idx {
                c += 1;
            }
        } else {
            while c > 0 && self.indices[c - 1] >= idx {
                c -= 1;
            }
        }
        self.get_cursor.set(c);

        if self.indices[c] == idx {
            self.values[c]
        } else {
            T::zero()
        }
    }

    fn set(&mut self, idx: usize, value: T) {
        self.check_index(idx);
        if self.nz == 0 {
            self.insert(0, idx, value);
            return;
        }

        let mut c = self.set_cursor;
        if c >= self.nz {
            c = self.nz / 2;
        }

        if self.indices[c] < idx {
            while c + 1 < self.nz && self.indices[c + 1] <= idx {
                c += 1;
            }
        } else {
            while c > 0 && self.indices[c - 1] >= idx {
                c -= 1;
            }
        }
        self.set_cursor = c;

        // After the scan, `c` is either the slot holding `idx`, the last
        // slot below it, or the first slot above it.
        let stored = self.indices[c];
        if stored == idx {
            self.values[c] = value;
        } else if stored < idx {
            self.insert(c + 1, idx, value);
        } else {
            self.insert(c, idx, value);
        }
    }

    fn to_dense(&self) -> Vec<T> {
        let mut out = vec![T::zero(); self.len];
        for (idx, v) in self.iter() {
            out[idx] = v;
        }
        out
    }

    fn dot(&self, other: &Vector<T>, range: Range<usize>) -> T {
        match other {
            Vector::Sparse(other) => self.dot_merge(other, range),
            other => self.dot_gather(other, range),
        }
    }

    fn scale_range(&mut self, scale: T, range: Range<usize>) {
        self.check_range(&range);
        let start = self.lower_bound(range.start);
        for p in start..self.nz {
            if self.indices[p] >= range.end {
                break;
            }
            self.values[p] *= scale;
        }
    }

    /// Plain linear scan for a stored `idx`; falls back to
    /// [`set`](VectorOps::set) when the index is new.
    fn add_at(&mut self, idx: usize, delta: T) {
        let found = self.indices().iter().position(|&i| i == idx);
        match found {
            Some(p) => self.values[p] += delta,
            None => self.set(idx, delta),
        }
    }

    fn transpose_into_column(&self, target: &mut Matrix<T>, col: usize) {
        for (idx, v) in self.iter() {
            target.set(idx, col, v);
        }
    }
}

impl<T: Float> fmt::Debug for SparseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseVector")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
