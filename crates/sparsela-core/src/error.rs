use thiserror::Error;

/// All errors returned by `sparsela-core`.
///
/// Only the outer surface is fallible: building a matrix from caller
/// arrays and the plain array helpers. Vector and matrix element access
/// panics on an out-of-range index, and the factorizations never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `sparsela-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
