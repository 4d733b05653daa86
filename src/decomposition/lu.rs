//! LU decomposition, with and without partial pivoting.
//!
//! Both variants run Doolittle elimination: `U` starts as a copy of the
//! input and `L` as identity; each step stores the elimination factor in
//! `L` and subtracts a scaled pivot row from `U` as a whole-block vector
//! operation. The pivoting variant additionally swaps in the
//! largest-magnitude pivot of each column, which bounds element growth and
//! survives zero leading pivots — prefer it whenever the caller does not
//! need the original row order preserved in the factors.

use std::array;

use crate::decomposition::PivotConfig;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::Real;
use crate::simd::LaneSelect;
use crate::vector::Vector;

/// LU decomposition without pivoting: `A = L * U` with unit-lower-
/// triangular `L` and upper-triangular `U`.
///
/// Computed eagerly by [`Matrix::decompose_lu`]; immutable afterwards.
/// Without pivoting a zero (or near-zero) leading pivot poisons the
/// factors, so always consult [`solvable`](LuDecomposition::solvable) (or
/// handle the error from [`solve`](LuDecomposition::solve)).
#[derive(Debug, Clone)]
pub struct LuDecomposition<T: LaneSelect<N> + Real, const N: usize> {
    l: Matrix<T, N, N>,
    u: Matrix<T, N, N>,
    tolerance: T,
}

/// LU decomposition with partial (row) pivoting: `P * A = L * U`.
///
/// Computed eagerly by [`Matrix::decompose_lup`]; immutable afterwards.
/// Fails to solve only for (near-)singular matrices.
#[derive(Debug, Clone)]
pub struct LupDecomposition<T: LaneSelect<N> + Real, const N: usize> {
    l: Matrix<T, N, N>,
    u: Matrix<T, N, N>,
    perm: [usize; N],
    swaps: usize,
    tolerance: T,
}

impl<T: LaneSelect<N> + Real, const N: usize> Matrix<T, N, N> {
    /// LU-decompose with the default [`PivotConfig`].
    pub fn decompose_lu(&self) -> LuDecomposition<T, N> {
        self.decompose_lu_with(PivotConfig::default())
    }

    /// LU-decompose with an explicit pivot tolerance policy.
    pub fn decompose_lu_with(&self, config: PivotConfig<T>) -> LuDecomposition<T, N> {
        let tolerance = config.tolerance_for(self.max_abs());
        let mut l = Self::identity();
        let mut u = *self;

        for col in 0..N.saturating_sub(1) {
            let pivot_row = u.row(col);
            let pivot = pivot_row[col];
            for row in col + 1..N {
                let scale = u[(row, col)] / pivot;
                u.set_row(row, u.row(row) - pivot_row * scale);
                // The subtraction cancels only approximately; make the
                // eliminated entry exactly zero.
                u[(row, col)] = T::zero();
                l[(row, col)] = scale;
            }
        }

        LuDecomposition { l, u, tolerance }
    }

    /// LUP-decompose with the default [`PivotConfig`].
    pub fn decompose_lup(&self) -> LupDecomposition<T, N> {
        self.decompose_lup_with(PivotConfig::default())
    }

    /// LUP-decompose with an explicit pivot tolerance policy.
    pub fn decompose_lup_with(&self, config: PivotConfig<T>) -> LupDecomposition<T, N> {
        let tolerance = config.tolerance_for(self.max_abs());
        let mut l = Self::identity();
        let mut u = *self;
        let mut perm: [usize; N] = array::from_fn(|i| i);
        let mut swaps = 0;

        for col in 0..N.saturating_sub(1) {
            // Largest-magnitude entry of the column at or below the
            // diagonal becomes the pivot.
            let mut pivot_idx = col;
            let mut pivot_mag = u[(col, col)].abs();
            for row in col + 1..N {
                let mag = u[(row, col)].abs();
                if mag > pivot_mag {
                    pivot_mag = mag;
                    pivot_idx = row;
                }
            }

            // Whole column is zero: nothing to eliminate, the matrix is
            // singular but the factorization of the rest continues.
            if pivot_mag == T::zero() {
                continue;
            }

            if pivot_idx != col {
                u.swap_rows(col, pivot_idx);
                perm.swap(col, pivot_idx);
                // Only the already-computed part of L moves with the row.
                for j in 0..col {
                    let tmp = l[(col, j)];
                    l[(col, j)] = l[(pivot_idx, j)];
                    l[(pivot_idx, j)] = tmp;
                }
                swaps += 1;
            }

            let pivot_row = u.row(col);
            let pivot = pivot_row[col];
            for row in col + 1..N {
                let scale = u[(row, col)] / pivot;
                u.set_row(row, u.row(row) - pivot_row * scale);
                u[(row, col)] = T::zero();
                l[(row, col)] = scale;
            }
        }

        LupDecomposition {
            l,
            u,
            perm,
            swaps,
            tolerance,
        }
    }

    /// Determinant, computed through the pivoted decomposition.
    pub fn determinant(&self) -> T {
        self.decompose_lup().determinant()
    }

    /// Inverse, computed by solving the identity columns through the
    /// pivoted decomposition.
    ///
    /// Fails with [`Error::SingularMatrix`] for (near-)singular input.
    pub fn inverse(&self) -> Result<Self> {
        let lup = self.decompose_lup();
        let mut out = Self::zero();
        for col in 0..N {
            let mut e = Vector::zero();
            e[col] = T::one();
            let x = lup.solve(&e)?;
            for row in 0..N {
                out[(row, col)] = x[row];
            }
        }
        Ok(out)
    }
}

/// Shared forward/back substitution. `L` has an implicit unit diagonal.
fn substitute<T: LaneSelect<N> + Real, const N: usize>(
    l: &Matrix<T, N, N>,
    u: &Matrix<T, N, N>,
    b: [T; N],
) -> [T; N] {
    // Forward: L y = b.
    let mut y = b;
    for i in 0..N {
        let mut acc = y[i];
        for j in 0..i {
            acc = acc - l[(i, j)] * y[j];
        }
        y[i] = acc;
    }
    // Back: U x = y.
    let mut x = y;
    for i in (0..N).rev() {
        let mut acc = x[i];
        for j in i + 1..N {
            acc = acc - u[(i, j)] * x[j];
        }
        x[i] = acc / u[(i, i)];
    }
    x
}

/// All diagonal pivots must be finite and above tolerance.
fn pivots_usable<T: LaneSelect<N> + Real, const N: usize>(u: &Matrix<T, N, N>, tolerance: T) -> bool {
    (0..N).all(|i| {
        let mag = u[(i, i)].abs();
        mag.is_finite() && mag > tolerance
    })
}

fn singular_error<T: LaneSelect<N> + Real, const N: usize>(
    u: &Matrix<T, N, N>,
    tolerance: T,
) -> Error {
    let offending = (0..N)
        .map(|i| u[(i, i)].abs())
        .find(|mag| !(mag.is_finite() && *mag > tolerance))
        .unwrap_or(T::zero());
    log::debug!(
        "solve rejected: pivot magnitude {:?} below tolerance {:?}",
        offending,
        tolerance
    );
    Error::SingularMatrix {
        pivot_magnitude: offending.to_f64().unwrap_or(f64::NAN),
        tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
    }
}

impl<T: LaneSelect<N> + Real, const N: usize> LuDecomposition<T, N> {
    /// The unit-lower-triangular factor.
    pub fn l(&self) -> &Matrix<T, N, N> {
        &self.l
    }

    /// The upper-triangular factor.
    pub fn u(&self) -> &Matrix<T, N, N> {
        &self.u
    }

    /// The pivot zero-threshold this decomposition was computed with.
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Whether a direct solve is possible: every diagonal pivot of `U` is
    /// finite and above the tolerance.
    pub fn solvable(&self) -> bool {
        pivots_usable(&self.u, self.tolerance)
    }

    /// Solve `A x = b` by forward- then back-substitution.
    ///
    /// Fails with [`Error::SingularMatrix`] when
    /// [`solvable`](LuDecomposition::solvable) is false.
    pub fn solve(&self, b: &Vector<T, N>) -> Result<Vector<T, N>> {
        if !self.solvable() {
            return Err(singular_error(&self.u, self.tolerance));
        }
        Ok(Vector::new(substitute(&self.l, &self.u, b.to_array())))
    }

    /// Recompute `L * U`, which equals the source matrix up to rounding.
    pub fn reconstruct(&self) -> Matrix<T, N, N> {
        self.l * self.u
    }
}

impl<T: LaneSelect<N> + Real, const N: usize> LupDecomposition<T, N> {
    /// The unit-lower-triangular factor.
    pub fn l(&self) -> &Matrix<T, N, N> {
        &self.l
    }

    /// The upper-triangular factor.
    pub fn u(&self) -> &Matrix<T, N, N> {
        &self.u
    }

    /// The row permutation: row `i` of `P * A` is row `perm[i]` of `A`.
    pub fn permutation(&self) -> &[usize; N] {
        &self.perm
    }

    /// The pivot zero-threshold this decomposition was computed with.
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Expand the permutation into an orthonormal matrix `P` with
    /// `P * A = L * U`.
    pub fn permutation_matrix(&self) -> Matrix<T, N, N> {
        let mut p = Matrix::zero();
        for (i, &from) in self.perm.iter().enumerate() {
            p[(i, from)] = T::one();
        }
        p
    }

    /// Whether a direct solve is possible: the input was not
    /// (near-)singular.
    pub fn solvable(&self) -> bool {
        pivots_usable(&self.u, self.tolerance)
    }

    /// Solve `A x = b`: permute `b`, then forward- and back-substitute.
    ///
    /// Fails with [`Error::SingularMatrix`] when
    /// [`solvable`](LupDecomposition::solvable) is false.
    pub fn solve(&self, b: &Vector<T, N>) -> Result<Vector<T, N>> {
        if !self.solvable() {
            return Err(singular_error(&self.u, self.tolerance));
        }
        let permuted: [T; N] = array::from_fn(|i| b[self.perm[i]]);
        Ok(Vector::new(substitute(&self.l, &self.u, permuted)))
    }

    /// Determinant of the source matrix: the swap-parity-signed product of
    /// `U`'s diagonal.
    pub fn determinant(&self) -> T {
        let mut det = if self.swaps % 2 == 0 {
            T::one()
        } else {
            -T::one()
        };
        for i in 0..N {
            det = det * self.u[(i, i)];
        }
        det
    }

    /// Recompute `L * U`, which equals `P * A` up to rounding.
    pub fn reconstruct(&self) -> Matrix<T, N, N> {
        self.l * self.u
    }
}
