//! Fixed-width text rendering for [`Matrix`].

use core::fmt;

use crate::Float;

use super::Matrix;

/// One line per row, each entry right-aligned in a 15-wide field with six
/// decimals, followed by a blank line.
impl<T: Float> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows {
            write!(f, "[")?;
            for j in 0..self.ncols {
                write!(f, "{:15.6} ", self.get(i, j))?;
            }
            writeln!(f, " ]")?;
        }
        writeln!(f)
    }
}
