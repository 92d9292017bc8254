//! `sparsela-core`: vectors, matrices, and factorizations that work the
//! same over dense and sparse storage.
//!
//! # Layers
//!
//! - [`vector`]: the [`VectorOps`] contract and its two storages,
//!   [`DenseVector`] and [`SparseVector`], unified as [`Vector`].
//! - [`matrix`]: [`Matrix`], a row-major array of [`Vector`] rows.
//! - [`linalg`]: [`LuDecomposition`] and [`QrDecomposition`], written only
//!   against [`VectorOps`].
//! - [`array`]: plain `Vec`-of-rows arithmetic helpers.
//!
//! # Threading
//!
//! Nothing here is thread safe. [`SparseVector`] moves a lookup cursor on
//! every read, through a `Cell`, so it and anything holding it is `!Sync`.

pub mod array;
pub mod dtype;
pub mod error;
pub mod linalg;
pub mod matrix;
pub mod tic;
pub mod vector;

// Re-export key types at crate root for convenience.
pub use dtype::{Float, Scalar};
pub use error::{CoreError, Result};
pub use linalg::{LuDecomposition, QrDecomposition};
pub use matrix::Matrix;
pub use tic::Tic;
pub use vector::{DenseVector, SparseVector, Storage, Vector, VectorOps};

/// Items intended for glob-import: `use sparsela_core::prelude::*;`
pub mod prelude {
    pub use crate::dtype::{Float, Scalar};
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{LuDecomposition, QrDecomposition};
    pub use crate::matrix::Matrix;
    pub use crate::vector::{DenseVector, SparseVector, Storage, Vector, VectorOps};
}
