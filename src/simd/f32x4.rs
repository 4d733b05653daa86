//! 4-wide f32 fast path.
//!
//! Wraps `std::simd::f32x4`, which maps to one SSE / NEON register. The
//! same register also backs the 3-wide f32 block (`F32x4<3>`): lane 3 is a
//! padding lane, zero-initialized on construction and never visible through
//! the logical-lane accessors or reductions.

use std::simd::{f32x4, StdFloat};

use crate::simd::LaneOps;

/// 4-wide f32 register block with logical width `N` (3 or 4).
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct F32x4<const N: usize = 4>(f32x4);

impl<const N: usize> LaneOps<f32, N> for F32x4<N> {
    #[inline(always)]
    fn set(lanes: [f32; N]) -> Self {
        const {
            assert!(N >= 1 && N <= 4, "F32x4 holds at most 4 logical lanes");
        }
        let mut reg = [0.0f32; 4];
        reg[..N].copy_from_slice(&lanes);
        Self(f32x4::from_array(reg))
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self(f32x4::splat(value))
    }

    #[inline(always)]
    fn to_array(self) -> [f32; N] {
        let mut out = [0.0f32; N];
        out.copy_from_slice(&self.0.as_array()[..N]);
        out
    }

    #[inline(always)]
    fn as_slice(&self) -> &[f32] {
        &self.0.as_array()[..N]
    }

    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.0.as_mut_array()[..N]
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

    // Padding lanes may divide zero by zero; the resulting NaN stays in the
    // padding and never reaches the logical lanes.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }

    #[inline(always)]
    fn add_scalar(self, rhs: f32) -> Self {
        Self(self.0 + f32x4::splat(rhs))
    }

    #[inline(always)]
    fn sub_scalar(self, rhs: f32) -> Self {
        Self(self.0 - f32x4::splat(rhs))
    }

    #[inline(always)]
    fn mul_scalar(self, rhs: f32) -> Self {
        Self(self.0 * f32x4::splat(rhs))
    }

    #[inline(always)]
    fn div_scalar(self, rhs: f32) -> Self {
        Self(self.0 / f32x4::splat(rhs))
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
    fn sum(self) -> f32 {
        let a = self.0.as_array();
        let mut acc = a[0];
        for &x in &a[1..N] {
            acc += x;
        }
        acc
    }

    #[inline(always)]
    fn dot(self, rhs: Self) -> f32 {
        LaneOps::<f32, N>::sum(LaneOps::<f32, N>::mul(self, rhs))
    }
}

impl F32x4<4> {
    /// Permute lanes by compile-time indices. LLVM folds the rebuild into a
    /// single register shuffle.
    #[inline(always)]
    pub fn shuffle<const I0: usize, const I1: usize, const I2: usize, const I3: usize>(
        self,
    ) -> Self {
        const {
            assert!(I0 < 4 && I1 < 4 && I2 < 4 && I3 < 4, "shuffle index out of range");
        }
        let a = self.0.as_array();
        Self(f32x4::from_array([a[I0], a[I1], a[I2], a[I3]]))
    }
}

impl F32x4<3> {
    /// Permute the three logical lanes by compile-time indices.
    #[inline(always)]
    pub fn shuffle<const I0: usize, const I1: usize, const I2: usize>(self) -> Self {
        const {
            assert!(I0 < 3 && I1 < 3 && I2 < 3, "shuffle index out of range");
        }
        let a = self.0.as_array();
        Self(f32x4::from_array([a[I0], a[I1], a[I2], 0.0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_to_array() {
        let b = <F32x4<4> as LaneOps<f32, 4>>::set([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_padded_width_three() {
        let b = <F32x4<3> as LaneOps<f32, 3>>::set([1.0, 2.0, 3.0]);
        assert_eq!(b.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(b.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(LaneOps::<f32, 3>::sum(b), 6.0);
    }

    #[test]
    fn test_padding_nan_never_escapes() {
        let a = <F32x4<3> as LaneOps<f32, 3>>::set([1.0, 2.0, 3.0]);
        let b = <F32x4<3> as LaneOps<f32, 3>>::set([2.0, 4.0, 8.0]);
        // 0.0 / 0.0 happens in the padding lane.
        let q = LaneOps::<f32, 3>::div(a, b);
        assert_eq!(q.to_array(), [0.5, 0.5, 0.375]);
        assert!(LaneOps::<f32, 3>::sum(q).is_finite());
        assert!(LaneOps::<f32, 3>::dot(q, q).is_finite());
    }

    #[test]
    fn test_arithmetic_matches_scalar() {
        let a = <F32x4<4> as LaneOps<f32, 4>>::set([1.5, -2.0, 0.25, 8.0]);
        let b = <F32x4<4> as LaneOps<f32, 4>>::set([0.5, 4.0, -1.0, 2.0]);
        assert_eq!(a.add(b).to_array(), [2.0, 2.0, -0.75, 10.0]);
        assert_eq!(a.mul(b).to_array(), [0.75, -8.0, -0.25, 16.0]);
        assert_eq!(a.div(b).to_array(), [3.0, -0.5, -0.25, 4.0]);
        assert_eq!(a.mul_scalar(2.0).to_array(), [3.0, -4.0, 0.5, 16.0]);
        assert_eq!(LaneOps::<f32, 4>::dot(a, b), 0.75 - 8.0 - 0.25 + 16.0);
    }

    #[test]
    fn test_shuffle() {
        let b = <F32x4<4> as LaneOps<f32, 4>>::set([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b.shuffle::<3, 2, 1, 0>().to_array(), [4.0, 3.0, 2.0, 1.0]);
        let b3 = <F32x4<3> as LaneOps<f32, 3>>::set([1.0, 2.0, 3.0]);
        assert_eq!(b3.shuffle::<2, 0, 1>().to_array(), [3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_alignment() {
        // The wrapper must keep the 16-byte register alignment.
        assert_eq!(std::mem::align_of::<F32x4<4>>(), 16);
        assert_eq!(std::mem::align_of::<F32x4<3>>(), 16);
    }
}
