//! Fixed-dimension vectors on top of the lane-block layer.
//!
//! A [`Vector<T, N>`] owns exactly the lane block [`LaneSelect`] picks for
//! its `(scalar, dimension)` pair, so the 3-wide float vectors ride a
//! padded 4-wide register while every other combination stays tightly
//! packed. All arithmetic is routed through the block, which means the same
//! code path serves both the generic fallback and the hardware fast paths.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::scalar::Real;
use crate::simd::{LaneOps, LaneSelect};

/// Dense vector of `N` scalars.
///
/// Element order is significant (spatial axes: x, y, z, w).
///
/// # Example
/// ```
/// use ganita::Vector;
///
/// let a = Vector::new([1.0f32, 2.0, 3.0]);
/// let b = Vector::new([4.0f32, 5.0, 6.0]);
/// assert_eq!(a.dot(b), 32.0);
/// assert_eq!((a + b).to_array(), [5.0, 7.0, 9.0]);
/// ```
#[derive(Clone, Copy)]
pub struct Vector<T: LaneSelect<N>, const N: usize> {
    block: <T as LaneSelect<N>>::Block,
}

/// 2-dimensional vector.
pub type Vector2<T> = Vector<T, 2>;
/// 3-dimensional vector.
pub type Vector3<T> = Vector<T, 3>;
/// 4-dimensional vector.
pub type Vector4<T> = Vector<T, 4>;

impl<T: LaneSelect<N>, const N: usize> Vector<T, N> {
    /// Create a vector from one value per element.
    #[inline]
    pub fn new(elements: [T; N]) -> Self {
        Self {
            block: <T as LaneSelect<N>>::Block::set(elements),
        }
    }

    /// Create a vector with every element set to `value`.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self {
            block: <T as LaneSelect<N>>::Block::splat(value),
        }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    /// Number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// True when `N == 0`. Provided for slice-like symmetry.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Extract the elements.
    #[inline]
    pub fn to_array(self) -> [T; N] {
        self.block.to_array()
    }

    /// Borrow the elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.block.as_slice()
    }

    /// Mutably borrow the elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.block.as_mut_slice()
    }

    /// Sum of all elements.
    #[inline]
    pub fn sum(self) -> T {
        self.block.sum()
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.block.dot(rhs.block)
    }

    /// Squared Euclidean norm. Avoids the square root of
    /// [`length`](Vector::length); prefer it for comparisons.
    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Fused multiply-add: `self * b + c`, element-wise.
    #[inline]
    pub fn mul_add(self, b: Self, c: Self) -> Self {
        Self {
            block: self.block.mul_add(b.block, c.block),
        }
    }

    /// Broadcast element `LANE` to every element. The index is checked at
    /// compile time.
    #[inline]
    pub fn spread<const LANE: usize>(self) -> Self {
        Self {
            block: self.block.spread::<LANE>(),
        }
    }

    #[inline]
    pub(crate) fn from_block(block: <T as LaneSelect<N>>::Block) -> Self {
        Self { block }
    }

    #[inline]
    pub(crate) fn block(self) -> <T as LaneSelect<N>>::Block {
        self.block
    }
}

impl<T: LaneSelect<N> + Real, const N: usize> Vector<T, N> {
    /// Euclidean norm.
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> T {
        (other - self).length()
    }

    /// Unit vector parallel to `self`.
    ///
    /// Fails with [`Error::DegenerateGeometry`] when the length is zero,
    /// subnormal, or not finite, since dividing by it would produce
    /// garbage rather than a direction.
    #[inline]
    pub fn normalized(self) -> Result<Self> {
        let len = self.length();
        if !len.is_normal() {
            return Err(Error::DegenerateGeometry {
                length: len.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self / len)
    }

    /// Unit vector parallel to `self`, or exactly `fallback` when `self`
    /// is degenerate (the safe form of [`normalized`](Vector::normalized)).
    ///
    /// # Example
    /// ```
    /// use ganita::Vector;
    ///
    /// let up = Vector::new([0.0f32, 0.0, 1.0]);
    /// assert_eq!(Vector::zero().normalized_or(up).to_array(), [0.0, 0.0, 1.0]);
    /// ```
    #[inline]
    pub fn normalized_or(self, fallback: Self) -> Self {
        self.normalized().unwrap_or(fallback)
    }

    /// Project `self` onto the line spanned by `onto`.
    ///
    /// Fails when `onto` is degenerate.
    #[inline]
    pub fn project_onto(self, onto: Self) -> Result<Self> {
        let dir = onto.normalized()?;
        Ok(dir * self.dot(dir))
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    /// Element-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        let mut out = self;
        for x in out.as_mut_slice() {
            *x = x.abs();
        }
        out
    }

    /// Element-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        let mut out = self;
        for (x, &y) in out.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *x = x.min(y);
        }
        out
    }

    /// Element-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        let mut out = self;
        for (x, &y) in out.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *x = x.max(y);
        }
        out
    }

    /// Largest absolute element, the ∞-norm building block.
    #[inline]
    pub fn max_abs(self) -> T {
        self.as_slice()
            .iter()
            .fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }
}

impl<T: LaneSelect<2>> Vector<T, 2> {
    /// First component.
    #[inline]
    pub fn x(self) -> T {
        self.as_slice()[0]
    }

    /// Second component.
    #[inline]
    pub fn y(self) -> T {
        self.as_slice()[1]
    }

    /// 2D cross product (z component of the 3D cross of the embedded
    /// vectors). Also known as the perpendicular dot product.
    #[inline]
    pub fn perp_dot(self, rhs: Self) -> T {
        self.x() * rhs.y() - self.y() * rhs.x()
    }

    /// Counter-clockwise perpendicular vector.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new([-self.y(), self.x()])
    }
}

impl<T: LaneSelect<3>> Vector<T, 3> {
    /// First component.
    #[inline]
    pub fn x(self) -> T {
        self.as_slice()[0]
    }

    /// Second component.
    #[inline]
    pub fn y(self) -> T {
        self.as_slice()[1]
    }

    /// Third component.
    #[inline]
    pub fn z(self) -> T {
        self.as_slice()[2]
    }

    /// 3D cross product (right-handed).
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new([
            self.y() * rhs.z() - self.z() * rhs.y(),
            self.z() * rhs.x() - self.x() * rhs.z(),
            self.x() * rhs.y() - self.y() * rhs.x(),
        ])
    }
}

impl<T: LaneSelect<4>> Vector<T, 4> {
    /// First component.
    #[inline]
    pub fn x(self) -> T {
        self.as_slice()[0]
    }

    /// Second component.
    #[inline]
    pub fn y(self) -> T {
        self.as_slice()[1]
    }

    /// Third component.
    #[inline]
    pub fn z(self) -> T {
        self.as_slice()[2]
    }

    /// Fourth component.
    #[inline]
    pub fn w(self) -> T {
        self.as_slice()[3]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

impl<T: LaneSelect<N>, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(elements: [T; N]) -> Self {
        Self::new(elements)
    }
}

impl<T: LaneSelect<N>, const N: usize> TryFrom<&[T]> for Vector<T, N> {
    type Error = Error;

    /// Fails with [`Error::DimensionMismatch`] unless the slice has exactly
    /// `N` elements. Nothing is constructed on failure.
    fn try_from(slice: &[T]) -> Result<Self> {
        if slice.len() != N {
            return Err(Error::DimensionMismatch {
                expected: N,
                actual: slice.len(),
            });
        }
        let mut elements = [T::zero(); N];
        elements.copy_from_slice(slice);
        Ok(Self::new(elements))
    }
}

impl<T: LaneSelect<N>, const N: usize> Default for Vector<T, N> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────────────

impl<T: LaneSelect<N>, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: LaneSelect<N>, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: LaneSelect<N>, const N: usize> Add for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            block: self.block.add(rhs.block),
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> Sub for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            block: self.block.sub(rhs.block),
        }
    }
}

/// Element-wise product (Hadamard), matching the lane-block contract.
impl<T: LaneSelect<N>, const N: usize> Mul for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            block: self.block.mul(rhs.block),
        }
    }
}

/// Element-wise quotient.
impl<T: LaneSelect<N>, const N: usize> Div for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self {
            block: self.block.div(rhs.block),
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> Add<T> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: T) -> Self {
        Self {
            block: self.block.add_scalar(rhs),
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> Sub<T> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: T) -> Self {
        Self {
            block: self.block.sub_scalar(rhs),
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self {
            block: self.block.mul_scalar(rhs),
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self {
            block: self.block.div_scalar(rhs),
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            block: self.block.neg(),
        }
    }
}

impl<T: LaneSelect<N>, const N: usize> AddAssign for Vector<T, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: LaneSelect<N>, const N: usize> SubAssign for Vector<T, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: LaneSelect<N>, const N: usize> MulAssign<T> for Vector<T, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: LaneSelect<N>, const N: usize> DivAssign<T> for Vector<T, N> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: LaneSelect<N>, const N: usize> PartialEq for Vector<T, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: LaneSelect<N>, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector(")?;
        f.debug_list().entries(self.as_slice()).finish()?;
        write!(f, ")")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde
//
// Hand-written because the storage may be register-padded: the wire format
// is always exactly N scalars, and wrong-length input fails without
// constructing anything.
// ─────────────────────────────────────────────────────────────────────────────

impl<T, const N: usize> Serialize for Vector<T, N>
where
    T: LaneSelect<N> + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for element in self.as_slice() {
            tuple.serialize_element(element)?;
        }
        tuple.end()
    }
}

struct VectorVisitor<T, const N: usize>(std::marker::PhantomData<T>);

impl<'de, T, const N: usize> Visitor<'de> for VectorVisitor<T, N>
where
    T: LaneSelect<N> + Deserialize<'de>,
{
    type Value = Vector<T, N>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "a sequence of {N} scalars")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut elements = [T::zero(); N];
        for (i, slot) in elements.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(i, &self))?;
        }
        Ok(Vector::new(elements))
    }
}

impl<'de, T, const N: usize> Deserialize<'de> for Vector<T, N>
where
    T: LaneSelect<N> + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_tuple(N, VectorVisitor(std::marker::PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction() {
        let v = Vector::new([1.0f32, 2.0, 3.0]);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(v[1], 2.0);
        assert_eq!(Vector::<f64, 4>::splat(2.0).to_array(), [2.0; 4]);
        assert_eq!(Vector::<i32, 5>::zero().to_array(), [0; 5]);
    }

    #[test]
    fn test_try_from_slice() {
        let ok = Vector::<f32, 3>::try_from(&[1.0f32, 2.0, 3.0][..]);
        assert_eq!(ok.unwrap().to_array(), [1.0, 2.0, 3.0]);

        let err = Vector::<f32, 3>::try_from(&[1.0f32, 2.0][..]);
        assert_eq!(
            err.unwrap_err(),
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector::new([1.0f32, 2.0, 3.0, 4.0]);
        let b = Vector::new([4.0f32, 3.0, 2.0, 1.0]);
        assert_eq!((a + b).to_array(), [5.0; 4]);
        assert_eq!((a - b).to_array(), [-3.0, -1.0, 1.0, 3.0]);
        assert_eq!((a * b).to_array(), [4.0, 6.0, 6.0, 4.0]);
        assert_eq!((a * 2.0).to_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((a / 2.0).to_array(), [0.5, 1.0, 1.5, 2.0]);
        assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0, -4.0]);

        let mut c = a;
        c += b;
        assert_eq!(c.to_array(), [5.0; 4]);
    }

    #[test]
    fn test_dot_and_length() {
        let v = Vector::new([3.0f64, 4.0]);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.dot(Vector::new([1.0, 0.0])), 3.0);

        let w = Vector::new([1.0f32, 2.0, 3.0]);
        assert_eq!(w.dot(Vector::new([4.0, 5.0, 6.0])), 32.0);
    }

    #[test]
    fn test_normalized() {
        let v = Vector::new([3.0f32, 0.0, 4.0]);
        let n = v.normalized().unwrap();
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.x(), 0.6, epsilon = 1e-6);
        assert_relative_eq!(n.z(), 0.8, epsilon = 1e-6);

        assert!(matches!(
            Vector::<f32, 3>::zero().normalized(),
            Err(Error::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_normalized_or_returns_fallback_exactly() {
        let fallback = Vector::new([0.0f32, 0.0, 1.0]);
        let out = Vector::<f32, 3>::zero().normalized_or(fallback);
        assert_eq!(out.to_array(), [0.0, 0.0, 1.0]);

        // Non-degenerate input is normalized, parallel to the input.
        let v = Vector::new([0.0f32, 5.0, 0.0]);
        let n = v.normalized_or(fallback);
        assert_eq!(n.to_array(), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_cross() {
        let x = Vector::new([1.0f32, 0.0, 0.0]);
        let y = Vector::new([0.0f32, 1.0, 0.0]);
        assert_eq!(x.cross(y).to_array(), [0.0, 0.0, 1.0]);
        assert_eq!(y.cross(x).to_array(), [0.0, 0.0, -1.0]);

        let a = Vector::new([1.0f64, 2.0, 3.0]);
        let b = Vector::new([4.0f64, 5.0, 6.0]);
        assert_eq!(a.cross(b).to_array(), [-3.0, 6.0, -3.0]);
        // Cross product is orthogonal to both factors.
        assert_relative_eq!(a.cross(b).dot(a), 0.0);
        assert_relative_eq!(a.cross(b).dot(b), 0.0);
    }

    #[test]
    fn test_perp_dot() {
        let a = Vector::new([1.0f32, 0.0]);
        let b = Vector::new([0.0f32, 1.0]);
        assert_eq!(a.perp_dot(b), 1.0);
        assert_eq!(b.perp_dot(a), -1.0);
        assert_eq!(a.perp().to_array(), [0.0, 1.0]);
    }

    #[test]
    fn test_lerp_and_project() {
        let a = Vector::new([0.0f32, 0.0]);
        let b = Vector::new([2.0f32, 4.0]);
        assert_eq!(a.lerp(b, 0.5).to_array(), [1.0, 2.0]);

        let p = Vector::new([3.0f64, 4.0]);
        let onto = Vector::new([1.0f64, 0.0]);
        assert_eq!(p.project_onto(onto).unwrap().to_array(), [3.0, 0.0]);
        assert!(p.project_onto(Vector::zero()).is_err());
    }

    #[test]
    fn test_spread() {
        let v = Vector::new([1.0f32, 2.0, 3.0, 4.0]);
        assert_eq!(v.spread::<2>().to_array(), [3.0; 4]);
    }

    #[test]
    fn test_max_abs() {
        let v = Vector::new([1.0f64, -7.0, 3.0]);
        assert_eq!(v.max_abs(), 7.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let v = Vector::new([1.5f64, -2.0, 3.25]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.5,-2.0,3.25]");
        let back: Vector<f64, 3> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        // Wrong length fails cleanly.
        let short: std::result::Result<Vector<f64, 3>, _> = serde_json::from_str("[1.0,2.0]");
        assert!(short.is_err());
    }

    #[test]
    fn test_values_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Vector<f32, 3>>();
        assert_send_sync::<Vector<f64, 7>>();
        assert_send_sync::<crate::Matrix<f64, 4, 4>>();
        assert_send_sync::<crate::Quaternion<f32>>();
    }

    #[test]
    fn test_integer_vectors() {
        let a = Vector::new([1i32, -2, 3, 4, -5, 6]);
        let b = a * 2;
        assert_eq!(b.to_array(), [2, -4, 6, 8, -10, 12]);
        assert_eq!(a.sum(), 7);
    }
}
