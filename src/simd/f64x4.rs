//! 4-wide f64 fast path.
//!
//! Wraps `std::simd::f64x4` (one AVX register, two SSE2/NEON registers).
//! Like [`F32x4`](crate::simd::F32x4), the same register backs the 3-wide
//! f64 block with a zero-initialized padding lane.

use std::simd::{f64x4, StdFloat};

use crate::simd::LaneOps;

/// 4-wide f64 register block with logical width `N` (3 or 4).
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct F64x4<const N: usize = 4>(f64x4);

impl<const N: usize> LaneOps<f64, N> for F64x4<N> {
    #[inline(always)]
    fn set(lanes: [f64; N]) -> Self {
        const {
            assert!(N >= 1 && N <= 4, "F64x4 holds at most 4 logical lanes");
        }
        let mut reg = [0.0f64; 4];
        reg[..N].copy_from_slice(&lanes);
        Self(f64x4::from_array(reg))
    }

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self(f64x4::splat(value))
    }

    #[inline(always)]
    fn to_array(self) -> [f64; N] {
        let mut out = [0.0f64; N];
        out.copy_from_slice(&self.0.as_array()[..N]);
        out
    }

    #[inline(always)]
    fn as_slice(&self) -> &[f64] {
        &self.0.as_array()[..N]
    }

    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [f64] {
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

    // Padding lanes may produce NaN here; it never reaches the logical
    // lanes.
    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }

    #[inline(always)]
    fn add_scalar(self, rhs: f64) -> Self {
        Self(self.0 + f64x4::splat(rhs))
    }

    #[inline(always)]
    fn sub_scalar(self, rhs: f64) -> Self {
        Self(self.0 - f64x4::splat(rhs))
    }

    #[inline(always)]
    fn mul_scalar(self, rhs: f64) -> Self {
        Self(self.0 * f64x4::splat(rhs))
    }

    #[inline(always)]
    fn div_scalar(self, rhs: f64) -> Self {
        Self(self.0 / f64x4::splat(rhs))
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
        let a = self.0.as_array();
        let mut acc = a[0];
        for &x in &a[1..N] {
            acc += x;
        }
        acc
    }

    #[inline(always)]
    fn dot(self, rhs: Self) -> f64 {
        LaneOps::<f64, N>::sum(LaneOps::<f64, N>::mul(self, rhs))
    }
}

impl F64x4<4> {
    /// Permute lanes by compile-time indices.
    #[inline(always)]
    pub fn shuffle<const I0: usize, const I1: usize, const I2: usize, const I3: usize>(
        self,
    ) -> Self {
        const {
            assert!(I0 < 4 && I1 < 4 && I2 < 4 && I3 < 4, "shuffle index out of range");
        }
        let a = self.0.as_array();
        Self(f64x4::from_array([a[I0], a[I1], a[I2], a[I3]]))
    }
}

impl F64x4<3> {
    /// Permute the three logical lanes by compile-time indices.
    #[inline(always)]
    pub fn shuffle<const I0: usize, const I1: usize, const I2: usize>(self) -> Self {
        const {
            assert!(I0 < 3 && I1 < 3 && I2 < 3, "shuffle index out of range");
        }
        let a = self.0.as_array();
        Self(f64x4::from_array([a[I0], a[I1], a[I2], 0.0]))
    }
}
