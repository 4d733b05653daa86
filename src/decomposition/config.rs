//! Pivot tolerance policy for the LU decompositions.

use serde::{Deserialize, Serialize};

use crate::scalar::Real;

/// Tolerance policy deciding when an elimination pivot counts as zero.
///
/// A pivot `p` of a matrix `A` is treated as zero when
/// `|p| <= max(absolute_floor, relative_epsilon * max_abs(A))`.
///
/// The relative term keeps the decision invariant under uniform scaling of
/// `A`; the absolute floor catches the all-zero matrix, whose max norm is
/// zero. LU without pivoting is numerically fragile, so the boundary
/// behavior of this policy is part of the tested contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotConfig<T> {
    /// Scale-relative zero threshold, multiplied by the largest absolute
    /// entry of the decomposed matrix.
    /// Default: `16 * epsilon` of the scalar type.
    pub relative_epsilon: T,

    /// Absolute lower bound on pivot magnitude.
    /// Default: smallest positive normal value of the scalar type.
    pub absolute_floor: T,
}

impl<T: Real> Default for PivotConfig<T> {
    fn default() -> Self {
        Self {
            relative_epsilon: T::constant(16.0) * T::epsilon(),
            absolute_floor: T::min_positive_value(),
        }
    }
}

impl<T: Real> PivotConfig<T> {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the scale-relative threshold.
    pub fn with_relative_epsilon(mut self, relative_epsilon: T) -> Self {
        self.relative_epsilon = relative_epsilon;
        self
    }

    /// Builder-style setter for the absolute floor.
    pub fn with_absolute_floor(mut self, absolute_floor: T) -> Self {
        self.absolute_floor = absolute_floor;
        self
    }

    /// The zero threshold for a matrix whose largest absolute entry is
    /// `max_abs`.
    #[inline]
    pub fn tolerance_for(&self, max_abs: T) -> T {
        self.absolute_floor.max(self.relative_epsilon * max_abs)
    }
}
