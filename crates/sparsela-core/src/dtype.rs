//! Numeric element traits.
//!
//! ```text
//! Scalar
//!   └── Float  (f32, f64)
//! ```
//!
//! Vectors, matrices, and both factorizations are generic over [`Float`].
//! Only the handful of operations the factorizations actually need are
//! exposed; this is not a general numeric tower.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Base trait for element types storable in a vector.
pub trait Scalar:
    Copy
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + Default
    + 'static
{
    /// The additive identity (`0`).
    fn zero() -> Self;

    /// The multiplicative identity (`1`).
    fn one() -> Self;

    /// Whether this value is exactly zero (`-0.0` counts as zero).
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

/// Floating-point element types (`f32`, `f64`).
pub trait Float: Scalar + Neg<Output = Self> {
    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
}

macro_rules! impl_float {
    ($ty:ty) => {
        impl Scalar for $ty {
            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
        }

        impl Float for $ty {
            #[inline]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }
            #[inline]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }
        }
    };
}

impl_float!(f32);
impl_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn norm<T: Float>(xs: &[T]) -> T {
        xs.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()
    }

    #[test]
    fn test_generic_over_widths() {
        assert!((norm(&[3.0_f32, 4.0]) - 5.0).abs() < 1e-6);
        assert!((norm(&[3.0_f64, 4.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert!((-0.0_f64).is_zero());
        assert!(!f64::MIN_POSITIVE.is_zero());
    }
}
