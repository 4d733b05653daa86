//! 2-wide f64 fast path (one SSE2 / NEON register).

use std::simd::{f64x2, num::SimdFloat, StdFloat};

use crate::simd::LaneOps;

/// 2-wide f64 register block.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct F64x2(f64x2);

impl LaneOps<f64, 2> for F64x2 {
    #[inline(always)]
    fn set(lanes: [f64; 2]) -> Self {
        Self(f64x2::from_array(lanes))
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self(f64x2::splat(value))
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 2] {
        self.0.to_array()
    }

    #[inline(always)]
    fn as_slice(&self) -> &[f64] {
        self.0.as_array()
    }

    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [f64] {
        self.0.as_mut_array()
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }

    #[inline(always)]
    fn add_scalar(self, rhs: f64) -> Self {
        Self(self.0 + f64x2::splat(rhs))
    }

    #[inline(always)]
    fn sub_scalar(self, rhs: f64) -> Self {
        Self(self.0 - f64x2::splat(rhs))
    }

    #[inline(always)]
    fn mul_scalar(self, rhs: f64) -> Self {
        Self(self.0 * f64x2::splat(rhs))
    }

    #[inline(always)]
    fn div_scalar(self, rhs: f64) -> Self {
        Self(self.0 / f64x2::splat(rhs))
    }

    #[inline(always)]
    fn neg(self) -> Self {
        Self(-self.0)
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        Self(self.0.mul_add(b.0, c.0))
    }

    #[inline(always)]
    fn sum(self) -> f64 {
        self.0.reduce_sum()
    }

    #[inline(always)]
    fn dot(self, rhs: Self) -> f64 {
        (self.0 * rhs.0).reduce_sum()
    }
}

impl F64x2 {
    /// Permute lanes by compile-time indices.
    #[inline(always)]
    pub fn shuffle<const I0: usize, const I1: usize>(self) -> Self {
        const {
            assert!(I0 < 2 && I1 < 2, "shuffle index out of range");
        }
        let a = self.0.as_array();
        Self(f64x2::from_array([a[I0], a[I1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_ops() {
        let b = F64x2::set([3.0, -1.5]);
        assert_eq!(b.to_array(), [3.0, -1.5]);
        assert_eq!(b.add(F64x2::splat(1.0)).to_array(), [4.0, -0.5]);
        assert_eq!(b.sum(), 1.5);
        assert_eq!(b.dot(b), 9.0 + 2.25);
    }

    #[test]
    fn test_shuffle_swap() {
        let b = F64x2::set([1.0, 2.0]);
        assert_eq!(b.shuffle::<1, 0>().to_array(), [2.0, 1.0]);
        assert_eq!(b.spread::<1>().to_array(), [2.0, 2.0]);
    }
}
