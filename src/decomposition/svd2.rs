//! Closed-form singular value decomposition of 2x2 matrices.
//!
//! This is the kernel that two-sided Jacobi SVD algorithms reduce larger
//! problems to, so its conventions are fixed: singular values come back
//! non-negative and descending, `V` is always a proper rotation, and every
//! degenerate input takes an explicit identity-rotation guard instead of
//! dividing by a near-zero quantity.

use crate::matrix::Matrix;
use crate::scalar::Real;
use crate::simd::LaneSelect;
use crate::vector::Vector;

/// Singular value decomposition of a 2x2 matrix:
/// `A = U * diag(sigma) * V^T`.
///
/// Conventions:
/// - `sigma` is non-negative and sorted descending;
/// - `v` is a proper rotation (`det == +1`);
/// - `u` is orthogonal; it carries the reflection when `det(A) < 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Svd2<T: LaneSelect<2> + Real> {
    /// Left orthogonal factor.
    pub u: Matrix<T, 2, 2>,
    /// Singular values, non-negative and descending.
    pub sigma: Vector<T, 2>,
    /// Right rotation factor.
    pub v: Matrix<T, 2, 2>,
}

impl<T: LaneSelect<2> + Real> Svd2<T> {
    /// Recompute `U * diag(sigma) * V^T`, which equals the source matrix
    /// up to rounding.
    pub fn reconstruct(&self) -> Matrix<T, 2, 2> {
        let s = Matrix::from_rows([
            [self.sigma[0], T::zero()],
            [T::zero(), self.sigma[1]],
        ]);
        self.u * s * self.v.transpose()
    }
}

impl<T: LaneSelect<2> + Real> Matrix<T, 2, 2> {
    /// Closed-form singular value decomposition. See [`svd2`].
    pub fn svd(&self) -> Svd2<T> {
        svd2(self)
    }
}

/// Compute the closed-form SVD of a 2x2 real matrix.
///
/// The input is first normalized by its largest absolute entry so the
/// rotation computations run near unit scale (no overflow for huge inputs,
/// no underflow for tiny ones). The all-zero matrix short-circuits to
/// identity rotations and zero singular values.
///
/// # Example
/// ```
/// use ganita::{svd2, Matrix};
///
/// let a = Matrix::from_rows([[3.0f64, 0.0], [4.0, 5.0]]);
/// let svd = svd2(&a);
/// assert!((svd.sigma[0] - 45.0f64.sqrt()).abs() < 1e-12);
/// assert!((svd.sigma[1] - 5.0f64.sqrt()).abs() < 1e-12);
/// ```
pub fn svd2<T: LaneSelect<2> + Real>(a: &Matrix<T, 2, 2>) -> Svd2<T> {
    let scale = a.max_abs();
    if scale == T::zero() {
        log::debug!("svd2: zero matrix, returning identity factors");
        return Svd2 {
            u: Matrix::identity(),
            sigma: Vector::zero(),
            v: Matrix::identity(),
        };
    }
    let m = *a / scale;

    let m00 = m[(0, 0)];
    let m01 = m[(0, 1)];
    let m10 = m[(1, 0)];
    let m11 = m[(1, 1)];

    // First rotation R1 symmetrizes: S = R1 * M with R1 = [[c1, s1], [-s1, c1]].
    // The required angle satisfies s1/c1 = (m10 - m01) / (m00 + m11), which
    // (c1, s1) = (trace, antisymmetric part) / hypot solves without ever
    // dividing by a small denominator alone.
    let trace = m00 + m11;
    let skew = m10 - m01;
    let h = trace.hypot(skew);
    let (c1, s1) = if h <= T::epsilon() {
        (T::one(), T::zero())
    } else {
        (trace / h, skew / h)
    };

    let s00 = c1 * m00 + s1 * m10;
    let s01 = c1 * m01 + s1 * m11;
    let s11 = -s1 * m01 + c1 * m11;

    // Jacobi rotation J diagonalizes the symmetric S: D = J^T * S * J with
    // J = [[c2, s2], [-s2, c2]].
    let (c2, s2, t) = if s01.abs() <= T::epsilon() {
        (T::one(), T::zero(), T::zero())
    } else {
        let tau = (s11 - s00) / (T::constant(2.0) * s01);
        let t = if tau >= T::zero() {
            T::one() / (tau + (T::one() + tau * tau).sqrt())
        } else {
            -T::one() / (-tau + (T::one() + tau * tau).sqrt())
        };
        let c2 = T::one() / (T::one() + t * t).sqrt();
        (c2, t * c2, t)
    };

    let d0 = s00 - t * s01;
    let d1 = s11 + t * s01;

    // A = R1^T * S = (R1^T * J) * D * J^T, so U = R1^T * J and V = J.
    let r1t = Matrix::from_rows([[c1, -s1], [s1, c1]]);
    let j = Matrix::from_rows([[c2, s2], [-s2, c2]]);
    let mut u = r1t * j;
    let mut v = j;

    // Make the singular values non-negative by flipping the matching U
    // column, then sort descending by swapping columns of both factors.
    let mut sigma = [d0.abs(), d1.abs()];
    for (i, &d) in [d0, d1].iter().enumerate() {
        if d < T::zero() {
            u[(0, i)] = -u[(0, i)];
            u[(1, i)] = -u[(1, i)];
        }
    }
    if sigma[0] < sigma[1] {
        sigma.swap(0, 1);
        for row in 0..2 {
            let tmp = u[(row, 0)];
            u[(row, 0)] = u[(row, 1)];
            u[(row, 1)] = tmp;
            let tmp = v[(row, 0)];
            v[(row, 0)] = v[(row, 1)];
            v[(row, 1)] = tmp;
        }
    }

    // Keep V a proper rotation; a reflection moves into U. Flipping the
    // same column of both factors leaves the product unchanged.
    if v[(0, 0)] * v[(1, 1)] - v[(0, 1)] * v[(1, 0)] < T::zero() {
        for row in 0..2 {
            u[(row, 1)] = -u[(row, 1)];
            v[(row, 1)] = -v[(row, 1)];
        }
    }

    Svd2 {
        u,
        sigma: Vector::new(sigma) * scale,
        v,
    }
}
