//! Scalar element traits.
//!
//! Lane blocks, vectors and matrices are generic over their element type.
//! [`Scalar`] is the minimal capability set needed for element-wise
//! arithmetic; [`Real`] adds the floating-point operations required by
//! norms, decompositions and geometry.

use std::fmt::Debug;
use std::ops::Neg;

use num_traits::{Float, MulAdd, Num, NumAssign, NumCast};

/// Element type usable inside a lane block.
///
/// Implemented for `f32`, `f64`, `i32` and `i64` through the blanket impl.
/// The `MulAdd` bound keeps fused multiply-add semantics identical between
/// the generic fallback block and the hardware fast paths: for floats it is
/// a true fused operation, for integers a plain multiply-then-add.
pub trait Scalar:
    Copy
    + Default
    + Debug
    + PartialOrd
    + Num
    + NumAssign
    + NumCast
    + Neg<Output = Self>
    + MulAdd<Output = Self>
    + Send
    + Sync
    + 'static
{
}

impl<T> Scalar for T where
    T: Copy
        + Default
        + Debug
        + PartialOrd
        + Num
        + NumAssign
        + NumCast
        + Neg<Output = Self>
        + MulAdd<Output = Self>
        + Send
        + Sync
        + 'static
{
}

/// Floating-point scalar, required by norms, decompositions and geometry.
pub trait Real: Scalar + Float {
    /// Convert a small `f64` constant (tolerance factors, interpolation
    /// weights) into this scalar type.
    ///
    /// # Panics
    /// Panics if the value is not representable, which cannot happen for
    /// the finite constants this crate feeds it.
    #[inline]
    fn constant(value: f64) -> Self {
        <Self as NumCast>::from(value).expect("constant is representable in every Real type")
    }
}

impl<T: Scalar + Float> Real for T {}
