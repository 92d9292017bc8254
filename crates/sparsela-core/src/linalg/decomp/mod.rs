//! Matrix decompositions.
//!
//! | Decomposition | Module  | Factorization        |
//! |---------------|---------|----------------------|
//! | LU            | [`lu`]  | `A[piv, :] = L U`    |
//! | QR            | [`qr`]  | `A = Q R`            |
//!
//! Both take a private copy of the input and work on it exclusively
//! through row/column [`Vector`](crate::vector::Vector)s, so dense and
//! sparse matrices go through the same code.

pub mod lu;
pub mod qr;

pub use lu::LuDecomposition;
pub use qr::QrDecomposition;
