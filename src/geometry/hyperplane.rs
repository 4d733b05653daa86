//! Hyperplanes: points `p` with `dot(normal, p) == offset`.

use serde::{Deserialize, Serialize};

use crate::scalar::Real;
use crate::simd::LaneSelect;
use crate::vector::Vector;

use super::Line;

/// An (N-1)-dimensional plane in N-dimensional space, in Hesse normal
/// form: `dot(normal, p) = offset` with a unit `normal`.
///
/// In two dimensions this is a line; [`Hyperplane::from_line`] converts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperplane<T: LaneSelect<N>, const N: usize> {
    normal: Vector<T, N>,
    offset: T,
}

impl<T: LaneSelect<N> + Real, const N: usize> Hyperplane<T, N> {
    /// Construct from a unit normal and the plane offset.
    ///
    /// The normal must be normalized; this is debug-asserted.
    pub fn new(normal: Vector<T, N>, offset: T) -> Self {
        debug_assert!(
            (normal.length() - T::one()).abs() < T::constant(1e-4),
            "hyperplane normal must be a unit vector"
        );
        Self { normal, offset }
    }

    /// Construct the plane through `base` with the given unit normal.
    pub fn from_base_and_normal(base: Vector<T, N>, normal: Vector<T, N>) -> Self {
        let offset = normal.dot(base);
        Self::new(normal, offset)
    }

    /// The unit normal.
    #[inline]
    pub fn normal(&self) -> Vector<T, N> {
        self.normal
    }

    /// The scalar part of the plane equation.
    #[inline]
    pub fn offset(&self) -> T {
        self.offset
    }

    /// A point on the plane (the one closest to the origin).
    #[inline]
    pub fn base(&self) -> Vector<T, N> {
        self.normal * self.offset
    }

    /// Signed distance of a point from the plane; positive on the side
    /// the normal points to.
    #[inline]
    pub fn signed_distance(&self, point: Vector<T, N>) -> T {
        point.dot(self.normal) - self.offset
    }

    /// The closest point on the plane to `point`.
    #[inline]
    pub fn project(&self, point: Vector<T, N>) -> Vector<T, N> {
        point - self.normal * self.signed_distance(point)
    }
}

impl<T: LaneSelect<2> + Real> Hyperplane<T, 2> {
    /// A 2D line and a 2D hyperplane are the same object; convert by
    /// rotating the direction into a normal.
    pub fn from_line(line: &Line<T, 2>) -> Self {
        let normal = line.direction.perp();
        Self::from_base_and_normal(line.base, normal)
    }
}
