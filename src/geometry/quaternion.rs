//! Quaternions for 3D rotation.

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::Real;
use crate::simd::LaneSelect;
use crate::vector::{Vector, Vector3};

/// A quaternion `w + x*i + y*j + z*k`.
///
/// Unit quaternions represent 3D rotations; [`Quaternion::from_axis_angle`]
/// constructs them and [`Quaternion::rotate`] applies them. Multiplication
/// is the Hamilton product, so `(a * b).rotate(v)` applies `b` first, then
/// `a`, matching rotation-matrix composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion<T> {
    /// Scalar part.
    pub w: T,
    /// First imaginary component.
    pub x: T,
    /// Second imaginary component.
    pub y: T,
    /// Third imaginary component.
    pub z: T,
}

impl<T: Real> Quaternion<T> {
    /// Create a quaternion from its four components.
    #[inline]
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation.
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Squared norm.
    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Norm.
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Component-wise dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.w * rhs.w + self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// The conjugate (inverse rotation for unit quaternions).
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Unit quaternion parallel to `self`.
    ///
    /// Fails with [`Error::DegenerateGeometry`] when the norm is zero,
    /// subnormal or not finite.
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

    /// Unit quaternion parallel to `self`, or exactly `fallback` when
    /// degenerate.
    #[inline]
    pub fn normalized_or(self, fallback: Self) -> Self {
        self.normalized().unwrap_or(fallback)
    }

    /// Multiplicative inverse: `conjugate / length_squared`.
    ///
    /// Fails for a (near-)zero quaternion.
    #[inline]
    pub fn inverse(self) -> Result<Self> {
        let len_sq = self.length_squared();
        if !len_sq.is_normal() {
            return Err(Error::DegenerateGeometry {
                length: len_sq.sqrt().to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.conjugate() / len_sq)
    }

    /// Spherical linear interpolation between unit quaternions, taking the
    /// shorter arc. Falls back to normalized linear interpolation when the
    /// endpoints are nearly parallel, where the spherical formula would
    /// divide by a near-zero sine.
    pub fn slerp(self, other: Self, param: T) -> Self {
        let mut to = other;
        let mut cos_angle = self.dot(other);
        if cos_angle < T::zero() {
            to = -other;
            cos_angle = -cos_angle;
        }

        if cos_angle > T::one() - T::constant(1e-6) {
            let lerped = self * (T::one() - param) + to * param;
            return lerped.normalized_or(self);
        }

        let angle = cos_angle.acos();
        let sin_angle = angle.sin();
        let wa = ((T::one() - param) * angle).sin() / sin_angle;
        let wb = (param * angle).sin() / sin_angle;
        self * wa + to * wb
    }
}

impl<T: Real + LaneSelect<3>> Quaternion<T> {
    /// Rotation of `angle` radians about a unit `axis` (right-handed).
    ///
    /// The axis must be normalized; this is debug-asserted.
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        debug_assert!(
            (axis.length() - T::one()).abs() < T::constant(1e-4),
            "rotation axis must be a unit vector"
        );
        let half = angle * T::constant(0.5);
        let (sin, cos) = (half.sin(), half.cos());
        Self::new(cos, axis.x() * sin, axis.y() * sin, axis.z() * sin)
    }

    /// The imaginary part as a vector.
    #[inline]
    pub fn vector_part(self) -> Vector3<T> {
        Vector::new([self.x, self.y, self.z])
    }

    /// Rotate a vector by this (unit) quaternion.
    #[inline]
    pub fn rotate(self, v: Vector3<T>) -> Vector3<T> {
        // v' = v + w * t + qv x t  with  t = 2 * (qv x v)
        let qv = self.vector_part();
        let t = qv.cross(v) * T::constant(2.0);
        v + t * self.w + qv.cross(t)
    }

    /// The equivalent rotation matrix (for a unit quaternion).
    pub fn to_rotation_matrix(self) -> Matrix<T, 3, 3> {
        let two = T::constant(2.0);
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        Matrix::from_rows([
            [
                T::one() - two * (y * y + z * z),
                two * (x * y - w * z),
                two * (x * z + w * y),
            ],
            [
                two * (x * y + w * z),
                T::one() - two * (x * x + z * z),
                two * (y * z - w * x),
            ],
            [
                two * (x * z - w * y),
                two * (y * z + w * x),
                T::one() - two * (x * x + y * y),
            ],
        ])
    }
}

impl<T: Real> Add for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl<T: Real> Sub for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.w - rhs.w,
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
        )
    }
}

/// Hamilton product.
impl<T: Real> Mul for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl<T: Real> Mul<T> for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.w * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Real> Div<T> for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.w / rhs, self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<T: Real> Neg for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl<T: Real> Default for Quaternion<T> {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}
