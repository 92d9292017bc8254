//! # Sparsela
//!
//! Linear algebra over interchangeable dense and sparse row storage.
//!
//! One `use sparsela::prelude::*;` gives you vectors, matrices, and the
//! LU / QR factorizations that run unchanged on either storage kind.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Vectors, matrices, LU, QR, array helpers |

#[cfg(feature = "core")]
pub use sparsela_core as core;

/// Glob-import convenience: `use sparsela::prelude::*;`
#[cfg(feature = "core")]
pub mod prelude {
    pub use sparsela_core::prelude::*;
}
